use trellis_ui_layout::{
    Constraints, LayoutError, MeasurePolicy, MeasureResult, MeasureScope, Measurable, Placement,
    Position, Size,
};

/// Measures its child with `constraints` intersected with the incoming ones.
/// Without a child it takes the min size of that intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstrainedBoxMeasurePolicy {
    pub constraints: Constraints,
}

impl ConstrainedBoxMeasurePolicy {
    pub fn new(constraints: Constraints) -> Self {
        Self { constraints }
    }
}

impl MeasurePolicy for ConstrainedBoxMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let child_constraints = self.constraints.enforce(constraints);
        let Some(child) = measurables.first() else {
            return Ok(MeasureResult::leaf(Size::new(
                child_constraints.min_width,
                child_constraints.min_height,
            )));
        };
        let placeable = scope.measure(*child, child_constraints)?;
        Ok(MeasureResult::with_placements(
            child_constraints.constrain(placeable.size()),
            vec![Placement::new(placeable, Position::ZERO)],
        ))
    }

    fn debug_name(&self) -> &str {
        "ConstrainedBox"
    }
}
