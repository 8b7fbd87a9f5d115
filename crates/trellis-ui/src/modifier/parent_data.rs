use crate::layout::policies::StackParentData;
use std::any::Any;
use std::rc::Rc;
use trellis_ui_layout::{FlexParentData, LayoutModifier};

/// Attaches flex weight and fill for a parent row or column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlexModifier {
    pub data: FlexParentData,
}

impl FlexModifier {
    pub fn new(data: FlexParentData) -> Self {
        Self { data }
    }
}

impl LayoutModifier for FlexModifier {
    fn modify_parent_data(&self, _parent_data: Option<Rc<dyn Any>>) -> Option<Rc<dyn Any>> {
        Some(Rc::new(self.data))
    }

    fn debug_name(&self) -> &str {
        "flex"
    }
}

/// Attaches stack placement for a parent stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackModifier {
    pub data: StackParentData,
}

impl StackModifier {
    pub fn new(data: StackParentData) -> Self {
        Self { data }
    }
}

impl LayoutModifier for StackModifier {
    fn modify_parent_data(&self, _parent_data: Option<Rc<dyn Any>>) -> Option<Rc<dyn Any>> {
        Some(Rc::new(self.data))
    }

    fn debug_name(&self) -> &str {
        "stack"
    }
}
