use trellis_ui_layout::{
    Constraints, EdgeInsets, IntPx, IntrinsicKind, IntrinsicScope, LayoutError, MeasurePolicy,
    MeasureResult, MeasureScope, Measurable, Placement, Size,
};

/// Insets its single child by `padding`.
#[derive(Clone, Debug, PartialEq)]
pub struct PaddingMeasurePolicy {
    pub padding: EdgeInsets,
}

impl PaddingMeasurePolicy {
    pub fn new(padding: EdgeInsets) -> Self {
        Self { padding }
    }

    fn intrinsic(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        kind: IntrinsicKind,
    ) -> IntPx {
        let (own, other) = if kind.is_width() {
            (self.padding.horizontal_sum(), self.padding.vertical_sum())
        } else {
            (self.padding.vertical_sum(), self.padding.horizontal_sum())
        };
        let child = measurables.first().map_or(IntPx::ZERO, |child| {
            let cross = (kind.cross_size() - other).coerce_at_least(IntPx::ZERO);
            scope.intrinsic(*child, kind.with_cross_size(cross))
        });
        child + own
    }
}

impl MeasurePolicy for PaddingMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let horizontal = self.padding.horizontal_sum();
        let vertical = self.padding.vertical_sum();
        let Some(child) = measurables.first() else {
            return Ok(MeasureResult::leaf(Size::new(
                constraints.min_width,
                constraints.min_height,
            )));
        };
        let placeable = scope.measure(*child, constraints.offset(-horizontal, -vertical))?;
        let size = constraints.constrain(Size::new(
            placeable.width() + horizontal,
            placeable.height() + vertical,
        ));
        Ok(MeasureResult::with_placements(
            size,
            vec![Placement::new(placeable, self.padding.origin())],
        ))
    }

    fn min_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        self.intrinsic(scope, measurables, IntrinsicKind::MinWidth(height))
    }

    fn max_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        self.intrinsic(scope, measurables, IntrinsicKind::MaxWidth(height))
    }

    fn min_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        self.intrinsic(scope, measurables, IntrinsicKind::MinHeight(width))
    }

    fn max_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        self.intrinsic(scope, measurables, IntrinsicKind::MaxHeight(width))
    }

    fn debug_name(&self) -> &str {
        "Padding"
    }
}
