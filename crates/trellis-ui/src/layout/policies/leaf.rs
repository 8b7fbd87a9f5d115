use trellis_ui_layout::{
    AlignmentLine, AlignmentLineMap, Constraints, IntPx, IntrinsicScope, LayoutError,
    MeasurePolicy, MeasureResult, MeasureScope, Measurable, Size,
};

/// A childless layout of a fixed size, optionally reporting alignment lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeafMeasurePolicy {
    pub size: Size,
    pub alignment_lines: AlignmentLineMap,
}

impl LeafMeasurePolicy {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            alignment_lines: AlignmentLineMap::new(),
        }
    }

    pub fn px(width: i32, height: i32) -> Self {
        Self::new(Size::px(width, height))
    }

    pub fn with_line(mut self, line: AlignmentLine, value: i32) -> Self {
        self.alignment_lines.insert(line, IntPx(value));
        self
    }
}

impl MeasurePolicy for LeafMeasurePolicy {
    fn measure(
        &self,
        _scope: &mut dyn MeasureScope,
        _measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        Ok(MeasureResult::leaf(constraints.constrain(self.size))
            .with_alignment_lines(self.alignment_lines.clone()))
    }

    fn min_intrinsic_width(
        &self,
        _scope: &dyn IntrinsicScope,
        _measurables: &[Measurable],
        _height: IntPx,
    ) -> IntPx {
        self.size.width
    }

    fn max_intrinsic_width(
        &self,
        _scope: &dyn IntrinsicScope,
        _measurables: &[Measurable],
        _height: IntPx,
    ) -> IntPx {
        self.size.width
    }

    fn min_intrinsic_height(
        &self,
        _scope: &dyn IntrinsicScope,
        _measurables: &[Measurable],
        _width: IntPx,
    ) -> IntPx {
        self.size.height
    }

    fn max_intrinsic_height(
        &self,
        _scope: &dyn IntrinsicScope,
        _measurables: &[Measurable],
        _width: IntPx,
    ) -> IntPx {
        self.size.height
    }

    fn debug_name(&self) -> &str {
        "Leaf"
    }
}
