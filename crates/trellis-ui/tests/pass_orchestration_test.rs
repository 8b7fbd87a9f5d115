//! Tests for how a pass decides what to measure and what to lay out.

use trellis_testing::prelude::*;
use trellis_ui::{NodeId, Placement};

/// Measures its only child and places it twice, at `first` and then `second`.
struct PlaceTwice {
    first: Position,
    second: Position,
}

impl MeasurePolicy for PlaceTwice {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let placeable = scope.measure(measurables[0], constraints.loosen())?;
        let (first, second) = (self.first, self.second);
        Ok(MeasureResult::new(
            constraints.constrain(placeable.size()),
            AlignmentLineMap::new(),
            move |scope| {
                scope.place(&placeable, first)?;
                scope.place(&placeable, second)
            },
        ))
    }
}

/// Measures its only child twice from the placement block.
struct MeasureTwiceWhilePlacing;

impl MeasurePolicy for MeasureTwiceWhilePlacing {
    fn measure(
        &self,
        _scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let child = measurables[0];
        Ok(MeasureResult::new(
            Size::new(constraints.max_width, constraints.max_height),
            AlignmentLineMap::new(),
            move |scope| {
                let placeable = scope.measure(child, Constraints::unbounded())?;
                scope.measure(child, Constraints::unbounded())?;
                scope.place(&placeable, Position::ZERO)
            },
        ))
    }
}

/// Measures its only child in the measure block and again while placing.
struct MeasureInBothBlocks;

impl MeasurePolicy for MeasureInBothBlocks {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let child = measurables[0];
        let measured = scope.measure(child, constraints.loosen())?;
        Ok(MeasureResult::new(
            constraints.constrain(measured.size()),
            AlignmentLineMap::new(),
            move |scope| {
                let placeable = scope.measure(child, Constraints::unbounded())?;
                scope.place(&placeable, Position::ZERO)
            },
        ))
    }
}

/// Measures every child but places only the first one.
struct PlaceFirstOnly;

impl MeasurePolicy for PlaceFirstOnly {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let mut placements = Vec::new();
        for measurable in measurables {
            let placeable = scope.measure(*measurable, constraints.loosen())?;
            if placements.is_empty() {
                placements.push(Placement::new(placeable, Position::ZERO));
            }
        }
        Ok(MeasureResult::with_placements(
            Size::new(constraints.max_width, constraints.max_height),
            placements,
        ))
    }
}

/// Reports a fixed size regardless of the constraints it gets.
struct Stubborn(Size);

impl MeasurePolicy for Stubborn {
    fn measure(
        &self,
        _scope: &mut dyn MeasureScope,
        _measurables: &[Measurable],
        _constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        Ok(MeasureResult::leaf(self.0))
    }
}

fn row() -> FlexMeasurePolicy {
    FlexMeasurePolicy::row(LinearArrangement::Start, CrossAxisAlignment::Start)
}

#[test]
fn first_pass_measures_and_lays_out_each_node_once() {
    let mut children = Vec::new();
    let (rule, root) = run_test_layout(Constraints::loose(IntPx(500), IntPx(500)), |rule| {
        let column_children: Vec<NodeId> = (0..3)
            .map(|_| {
                let leaves = [rule.leaf(10, 10), rule.leaf(20, 20)];
                children.extend(leaves);
                rule.parent(row(), &leaves)
            })
            .collect();
        children.extend(column_children.iter().copied());
        rule.parent(
            FlexMeasurePolicy::column(LinearArrangement::Start, CrossAxisAlignment::Start),
            &column_children,
        )
    });

    rule.assert_counts(root, 1, 1);
    for child in children {
        rule.assert_counts(child, 1, 1);
    }
    assert_eq!(rule.size(root), Size::px(30, 60));
}

#[test]
fn resizing_a_child_of_a_filling_container_only_relays_it_out() {
    let mut rule = LayoutTestRule::loose(200, 200);
    let sized = FixedSizePolicy::new(rule.runtime(), 10, 10);
    let leaf = rule.node(sized.clone());
    let container = rule.parent(ContainerMeasurePolicy::sized(50, 50), &[leaf]);
    let root = rule.parent(AlignMeasurePolicy::center(), &[container]);
    rule.set_content(root);
    rule.run().unwrap();
    assert_eq!(rule.position(leaf), Position::px(20, 20));

    sized.resize(20, 20);
    rule.run().unwrap();

    assert_eq!(rule.position(leaf), Position::px(15, 15));
    rule.assert_counts(leaf, 2, 2);
    rule.assert_counts(container, 1, 2);
    rule.assert_counts(root, 1, 1);
}

#[test]
fn resizing_a_child_measured_by_its_parent_remeasures_the_parent() {
    let mut rule = LayoutTestRule::loose(200, 200);
    let sized = FixedSizePolicy::new(rule.runtime(), 10, 10);
    let growing = rule.node(sized.clone());
    let other = rule.leaf(10, 10);
    let root = rule.parent(row(), &[growing, other]);
    rule.set_content(root);
    rule.run().unwrap();

    sized.resize(30, 5);
    rule.run().unwrap();

    assert_eq!(rule.size(root), Size::px(40, 10));
    assert_eq!(rule.position(other), Position::px(30, 0));
    rule.assert_counts(root, 2, 2);
    rule.assert_counts(other, 1, 1);
}

#[test]
fn zero_sized_child_grows_back() {
    let mut rule = LayoutTestRule::loose(200, 200);
    let sized = FixedSizePolicy::new(rule.runtime(), 10, 10);
    let shrinking = rule.node(sized.clone());
    let other = rule.leaf(10, 10);
    let root = rule.parent(row(), &[shrinking, other]);
    rule.set_content(root);
    rule.run().unwrap();

    sized.resize(0, 0);
    rule.run().unwrap();
    assert_eq!(rule.size(shrinking), Size::ZERO);
    assert_eq!(rule.position(other), Position::ZERO);

    sized.resize(10, 10);
    rule.run().unwrap();
    assert_eq!(rule.size(shrinking), Size::px(10, 10));
    assert_eq!(rule.position(other), Position::px(10, 0));
}

#[test]
fn children_added_and_removed_between_passes() {
    let mut rule = LayoutTestRule::loose(200, 200);
    let first = rule.leaf(10, 10);
    let root = rule.parent(row(), &[first]);
    rule.set_content(root);
    rule.run().unwrap();

    let second = rule.leaf(15, 15);
    rule.tree_mut().append_child(root, second).unwrap();
    rule.run().unwrap();
    assert_eq!(rule.position(second), Position::px(10, 0));
    assert_eq!(rule.size(root), Size::px(25, 15));
    rule.assert_counts(root, 2, 2);
    rule.assert_counts(first, 1, 1);

    rule.tree_mut().remove_child(root, first).unwrap();
    rule.run().unwrap();
    assert_eq!(rule.position(second), Position::ZERO);
    assert_eq!(rule.size(root), Size::px(15, 15));
    assert!(!rule.tree().contains(first));
}

#[test]
fn placing_twice_keeps_the_last_position() {
    let (rule, root) = run_test_layout(Constraints::loose(IntPx(100), IntPx(100)), |rule| {
        let child = rule.leaf(10, 10);
        rule.parent(
            PlaceTwice {
                first: Position::px(5, 5),
                second: Position::px(7, 9),
            },
            &[child],
        )
    });

    let child = rule.tree().node(root).unwrap().children().next().unwrap();
    assert_eq!(rule.position(child), Position::px(7, 9));
    assert_eq!(rule.position_in_root(child), Position::px(7, 9));
    rule.assert_counts(child, 1, 1);
}

#[test]
fn measuring_twice_while_placing_fails() {
    let mut rule = LayoutTestRule::loose(100, 100);
    let child = rule.leaf(10, 10);
    let root = rule.parent(MeasureTwiceWhilePlacing, &[child]);
    rule.set_content(root);

    assert_eq!(rule.run(), Err(LayoutError::MeasuredTwice { node: child }));
}

#[test]
fn measuring_in_measure_and_placement_blocks_fails() {
    let mut rule = LayoutTestRule::loose(100, 100);
    let child = rule.leaf(10, 10);
    let root = rule.parent(MeasureInBothBlocks, &[child]);
    rule.set_content(root);

    assert_eq!(rule.run(), Err(LayoutError::MeasuredTwice { node: child }));
    // The rejected measure leaves the child tied to the parent's measure block.
    assert_eq!(rule.size(child), Size::px(10, 10));
}

#[test]
fn measuring_only_while_placing_survives_relayout() {
    let mut rule = LayoutTestRule::loose(100, 100);
    let child = rule.leaf(10, 10);
    let root = rule.parent(ContainerMeasurePolicy::expanded(), &[child]);
    rule.set_content(root);
    rule.run().unwrap();

    rule.tree_mut().mark_needs_layout(root);
    rule.run().unwrap();
    rule.tree_mut().mark_needs_layout(root);
    rule.run().unwrap();

    assert_eq!(rule.position(child), Position::px(45, 45));
    rule.assert_counts(root, 1, 3);
    rule.assert_counts(child, 1, 1);
}

#[test]
fn unplaced_children_are_not_output() {
    let (rule, root) = run_test_layout(Constraints::tight(IntPx(50), IntPx(50)), |rule| {
        let placed = rule.leaf(10, 10);
        let hidden = rule.leaf(10, 10);
        rule.parent(PlaceFirstOnly, &[placed, hidden])
    });

    let children: Vec<_> = rule.tree().node(root).unwrap().children().collect();
    assert!(rule.tree().is_placed(children[0]));
    assert!(!rule.tree().is_placed(children[1]));
    let output: Vec<_> = rule.tree().placed_nodes().iter().map(|p| p.node).collect();
    assert_eq!(output, vec![root, children[0]]);
}

#[test]
fn reported_sizes_are_coerced_into_the_constraints() {
    let mut rule = LayoutTestRule::loose(100, 100);
    let big = rule.node(Stubborn(Size::px(500, 500)));
    let small = rule.node(Stubborn(Size::px(1, 1)));
    let root = rule.parent(row(), &[big, small]);
    rule.set_content(root);
    rule.run().unwrap();
    assert_eq!(rule.size(big), Size::px(100, 100));

    rule.run_with(Constraints::new(IntPx(20), IntPx(20), IntPx(20), IntPx(20)))
        .unwrap();
    assert_eq!(rule.size(root), Size::px(20, 20));
    assert_eq!(rule.size(small), Size::px(1, 1));
}

#[test]
fn relayout_leaves_clean_children_alone() {
    let mut rule = LayoutTestRule::loose(300, 300);
    let leaves = [rule.leaf(10, 10), rule.leaf(10, 10), rule.leaf(10, 10)];
    let root = rule.parent(row(), &leaves);
    rule.set_content(root);
    rule.run().unwrap();

    rule.tree_mut().mark_needs_layout(root);
    rule.run().unwrap();
    rule.tree_mut().mark_needs_measure(leaves[1]);
    rule.run().unwrap();

    rule.assert_counts(root, 1, 2);
    rule.assert_counts(leaves[0], 1, 1);
    rule.assert_counts(leaves[1], 2, 2);
    rule.assert_counts(leaves[2], 1, 1);
}

#[test]
fn pump_until_idle_settles_the_tree() {
    let mut rule = LayoutTestRule::loose(100, 100);
    let sized = FixedSizePolicy::new(rule.runtime(), 10, 10);
    let leaf = rule.node(sized.clone());
    let root = rule.parent(AlignMeasurePolicy::new(Alignment::BOTTOM_END), &[leaf]);
    rule.set_content(root);
    rule.pump_until_idle().unwrap();

    sized.resize(40, 40);
    assert!(rule.tree().needs_pass());
    rule.pump_until_idle().unwrap();

    assert!(!rule.tree().needs_pass());
    assert_eq!(rule.position(leaf), Position::px(60, 60));
}
