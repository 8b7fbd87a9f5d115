use trellis_ui_layout::{
    Alignment, Constraints, IntPx, LayoutError, MeasurePolicy, MeasureResult, MeasureScope,
    Measurable, Placement, Size,
};

/// Takes all the space it is offered on bounded axes and aligns its child
/// inside. On an unbounded axis it wraps the child.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignMeasurePolicy {
    pub alignment: Alignment,
}

impl AlignMeasurePolicy {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    pub fn center() -> Self {
        Self::new(Alignment::CENTER)
    }
}

impl Default for AlignMeasurePolicy {
    fn default() -> Self {
        Self::center()
    }
}

fn expand(max: IntPx, child: IntPx, min: IntPx) -> IntPx {
    if max.is_finite() {
        max
    } else {
        child.coerce_at_least(min)
    }
}

impl MeasurePolicy for AlignMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let Some(child) = measurables.first() else {
            let size = Size::new(
                expand(constraints.max_width, IntPx::ZERO, constraints.min_width),
                expand(constraints.max_height, IntPx::ZERO, constraints.min_height),
            );
            return Ok(MeasureResult::leaf(size));
        };
        let placeable = scope.measure(*child, constraints.loosen())?;
        let size = Size::new(
            expand(constraints.max_width, placeable.width(), constraints.min_width),
            expand(constraints.max_height, placeable.height(), constraints.min_height),
        );
        let position = self.alignment.align(size, placeable.size());
        Ok(MeasureResult::with_placements(
            size,
            vec![Placement::new(placeable, position)],
        ))
    }

    fn debug_name(&self) -> &str {
        "Align"
    }
}

/// Wraps its child, growing to the incoming min constraints when the child is
/// smaller, and aligns the child inside.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrapMeasurePolicy {
    pub alignment: Alignment,
}

impl WrapMeasurePolicy {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }
}

impl MeasurePolicy for WrapMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let Some(child) = measurables.first() else {
            return Ok(MeasureResult::leaf(Size::new(
                constraints.min_width,
                constraints.min_height,
            )));
        };
        let placeable = scope.measure(*child, constraints.loosen())?;
        let size = constraints.constrain(placeable.size());
        let position = self.alignment.align(size, placeable.size());
        Ok(MeasureResult::with_placements(
            size,
            vec![Placement::new(placeable, position)],
        ))
    }

    fn debug_name(&self) -> &str {
        "Wrap"
    }
}
