use super::*;
use crate::alignment_line::FIRST_BASELINE;
use std::cell::Cell;

/// Children whose min width is `10 * (index + 1)` and max width twice that,
/// regardless of height. Heights are always 5.
struct FakeChildren {
    flex: FlexParentData,
}

impl IntrinsicScope for FakeChildren {
    fn min_intrinsic_width(&self, measurable: Measurable, _height: IntPx) -> IntPx {
        IntPx(10 * (measurable.node_id() as i32 + 1))
    }

    fn max_intrinsic_width(&self, measurable: Measurable, height: IntPx) -> IntPx {
        self.min_intrinsic_width(measurable, height) * 2
    }

    fn min_intrinsic_height(&self, _measurable: Measurable, _width: IntPx) -> IntPx {
        IntPx(5)
    }

    fn max_intrinsic_height(&self, _measurable: Measurable, _width: IntPx) -> IntPx {
        IntPx(5)
    }

    fn parent_data(&self, measurable: Measurable) -> Option<&dyn Any> {
        if measurable.node_id() == 0 {
            Some(&self.flex)
        } else {
            None
        }
    }
}

/// Lays children out in a row.
struct RowLike {
    measured: Cell<usize>,
}

impl MeasurePolicy for RowLike {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        self.measured.set(self.measured.get() + 1);
        let mut width = IntPx::ZERO;
        let mut height = IntPx::ZERO;
        let mut placements = Vec::new();
        for measurable in measurables {
            let placeable = scope.measure(*measurable, constraints.loosen())?;
            assert_eq!(scope.alignment_line(&placeable, &FIRST_BASELINE)?, None);
            placements.push(Placement::new(placeable, Position::new(width, IntPx::ZERO)));
            width += placeable.width();
            height = height.max(placeable.height());
        }
        Ok(MeasureResult::with_placements(
            constraints.constrain(Size::new(width, height)),
            placements,
        ))
    }
}

struct Failing;

impl MeasurePolicy for Failing {
    fn measure(
        &self,
        _scope: &mut dyn MeasureScope,
        _measurables: &[Measurable],
        _constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        Err(LayoutError::MissingNode { node: 7 })
    }
}

fn children() -> Vec<Measurable> {
    (0..3).map(Measurable::new).collect()
}

#[test]
fn default_intrinsics_measure_with_child_intrinsics() {
    let scope = FakeChildren {
        flex: FlexParentData::default(),
    };
    let policy = RowLike {
        measured: Cell::new(0),
    };
    let measurables = children();

    assert_eq!(
        policy.min_intrinsic_width(&scope, &measurables, IntPx(100)),
        IntPx(60)
    );
    assert_eq!(
        policy.max_intrinsic_width(&scope, &measurables, IntPx(100)),
        IntPx(120)
    );
    assert_eq!(
        policy.max_intrinsic_height(&scope, &measurables, IntPx(100)),
        IntPx(5)
    );
    assert_eq!(policy.measured.get(), 3);
}

#[test]
fn failing_measure_reports_zero_intrinsic() {
    let scope = FakeChildren {
        flex: FlexParentData::default(),
    };
    assert_eq!(
        Failing.min_intrinsic_width(&scope, &children(), IntPx::INFINITY),
        IntPx::ZERO
    );
}

#[test]
fn parent_data_downcasts_by_type() {
    let scope = FakeChildren {
        flex: FlexParentData::new(2.0, true),
    };
    let intrinsics: &dyn IntrinsicScope = &scope;
    assert_eq!(
        intrinsics.flex_parent_data(Measurable::new(0)),
        FlexParentData::new(2.0, true)
    );
    assert!(!intrinsics.flex_parent_data(Measurable::new(1)).has_weight());
    assert!(intrinsics
        .parent_data_as::<String>(Measurable::new(0))
        .is_none());
}

#[test]
fn detached_placeables_have_no_node() {
    let placeable = Placeable::detached(Size::px(3, 4));
    assert_eq!(placeable.node_id(), None);
    assert_eq!(placeable.width(), IntPx(3));
    assert_eq!(Placeable::new(4, Size::ZERO).node_id(), Some(4));
}
