//! Modifier chains wrapping a node's measure policy.

mod aspect_ratio;
mod fill;
mod padding;
mod parent_data;

pub use aspect_ratio::AspectRatioModifier;
pub use fill::{FillDirection, FillModifier};
pub use padding::PaddingModifier;
pub use parent_data::{FlexModifier, StackModifier};

use crate::layout::policies::StackParentData;
use std::fmt;
use std::rc::Rc;
use trellis_ui_layout::{Alignment, EdgeInsets, FlexParentData, LayoutModifier};

/// An ordered chain of layout modifiers, outermost first.
///
/// Chains are cheap to clone and are built fluently:
/// `Modifier::empty().padding_all(8).fill_max_width()`.
#[derive(Clone, Default)]
pub struct Modifier {
    layers: Rc<Vec<Rc<dyn LayoutModifier>>>,
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends `layer` inside the existing chain.
    pub fn layout(self, layer: impl LayoutModifier + 'static) -> Self {
        self.push(Rc::new(layer))
    }

    fn push(self, layer: Rc<dyn LayoutModifier>) -> Self {
        let mut layers = Rc::unwrap_or_clone(self.layers);
        layers.push(layer);
        Self {
            layers: Rc::new(layers),
        }
    }

    /// Concatenates `next` inside this chain.
    pub fn then(&self, next: Modifier) -> Modifier {
        if self.is_empty() {
            return next;
        }
        if next.is_empty() {
            return self.clone();
        }
        let mut layers = Vec::with_capacity(self.layers.len() + next.layers.len());
        layers.extend(self.layers.iter().cloned());
        layers.extend(next.layers.iter().cloned());
        Modifier {
            layers: Rc::new(layers),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Rc<dyn LayoutModifier>] {
        &self.layers
    }

    pub fn padding(self, insets: EdgeInsets) -> Self {
        self.layout(PaddingModifier::new(insets))
    }

    pub fn padding_all(self, all: i32) -> Self {
        self.padding(EdgeInsets::uniform(all))
    }

    pub fn padding_symmetric(self, horizontal: i32, vertical: i32) -> Self {
        self.padding(EdgeInsets::symmetric(horizontal, vertical))
    }

    pub fn fill_max_width(self) -> Self {
        self.layout(FillModifier::new(FillDirection::Horizontal))
    }

    pub fn fill_max_height(self) -> Self {
        self.layout(FillModifier::new(FillDirection::Vertical))
    }

    pub fn fill_max_size(self) -> Self {
        self.layout(FillModifier::new(FillDirection::Both))
    }

    /// Sizes the node to `width / height == ratio` when the constraints allow it.
    pub fn aspect_ratio(self, ratio: f32) -> Self {
        self.layout(AspectRatioModifier::new(ratio))
    }

    /// Flexible child of a row or column that fills its share.
    pub fn weight(self, weight: f32) -> Self {
        self.weight_with_fill(weight, true)
    }

    pub fn weight_with_fill(self, weight: f32, fill: bool) -> Self {
        self.layout(FlexModifier::new(FlexParentData::new(weight, fill)))
    }

    /// Child of a row or column that takes only the space it needs.
    pub fn inflexible(self) -> Self {
        self.layout(FlexModifier::new(FlexParentData::default()))
    }

    pub fn stack(self, data: StackParentData) -> Self {
        self.layout(StackModifier::new(data))
    }

    /// Child of a stack aligned inside it.
    pub fn align_in_stack(self, alignment: Alignment) -> Self {
        self.stack(StackParentData::aligned(alignment))
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.layers.iter().map(|layer| layer.debug_name()))
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/modifier_tests.rs"]
mod tests;
