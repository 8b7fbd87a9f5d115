use super::*;
use crate::layout::policies::{FlexMeasurePolicy, LeafMeasurePolicy, PaddingMeasurePolicy};
use trellis_core::MutableState;
use trellis_ui_layout::{
    merge_max, AlignmentLine, AlignmentLineMap, EdgeInsets, IntPx, LayoutError, MeasureResult,
    MeasureScope, Placement,
};

fn loose(width: i32, height: i32) -> Constraints {
    Constraints::loose(IntPx(width), IntPx(height))
}

fn leaf(tree: &mut LayoutTree, width: i32, height: i32) -> NodeId {
    tree.create_node(LeafMeasurePolicy::px(width, height))
}

fn row_of(tree: &mut LayoutTree, children: &[NodeId]) -> NodeId {
    let row = tree.create_node(FlexMeasurePolicy::default());
    for child in children {
        tree.append_child(row, *child).unwrap();
    }
    row
}

fn counts(tree: &LayoutTree, node: NodeId) -> (usize, usize) {
    let node = tree.node(node).unwrap();
    (node.measure_count(), node.layout_count())
}

/// Measures its only child twice in the same block.
struct DoubleMeasure;

impl MeasurePolicy for DoubleMeasure {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        scope.measure(measurables[0], constraints)?;
        scope.measure(measurables[0], constraints)?;
        Ok(MeasureResult::leaf(Size::ZERO))
    }
}

/// Measures a node it does not own.
struct MeasureStranger(NodeId);

impl MeasurePolicy for MeasureStranger {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        _measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        scope.measure(Measurable::new(self.0), constraints)?;
        Ok(MeasureResult::leaf(Size::ZERO))
    }
}

/// Square whose side is read from observable state while measuring.
struct StateSized {
    side: MutableState<i32>,
}

impl MeasurePolicy for StateSized {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        _measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let side = self.side.get(scope);
        Ok(MeasureResult::leaf(constraints.constrain(Size::px(side, side))))
    }
}

/// Leaf reporting `line` at a value read from observable state.
struct StateLine {
    line: AlignmentLine,
    value: MutableState<i32>,
}

impl MeasurePolicy for StateLine {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        _measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let mut lines = AlignmentLineMap::new();
        lines.insert(self.line, IntPx(self.value.get(scope)));
        Ok(MeasureResult::leaf(constraints.constrain(Size::px(10, 10))).with_alignment_lines(lines))
    }
}

/// Places its child at an offset read from state inside the placement block.
struct StateOffset {
    offset: MutableState<i32>,
}

impl MeasurePolicy for StateOffset {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let placeable = scope.measure(measurables[0], constraints.loosen())?;
        let offset = self.offset.clone();
        Ok(MeasureResult::new(
            constraints.constrain(placeable.size()),
            AlignmentLineMap::new(),
            move |scope| {
                let x = offset.get(scope);
                scope.place(&placeable, Position::px(x, 0))
            },
        ))
    }
}

/// Places its child at the child's `line` value, read from the placement block.
struct PlaceAtLine {
    line: AlignmentLine,
}

impl MeasurePolicy for PlaceAtLine {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let placeable = scope.measure(measurables[0], constraints.loosen())?;
        let line = self.line;
        Ok(MeasureResult::new(
            Size::px(100, 100),
            AlignmentLineMap::new(),
            move |scope| {
                let y = scope.alignment_line(&placeable, &line)?.unwrap_or(IntPx::ZERO);
                scope.place(&placeable, Position::new(IntPx::ZERO, y))
            },
        ))
    }
}

/// Offsets its child down by the child's `line` value, read while measuring.
struct MeasureAtLine {
    line: AlignmentLine,
}

impl MeasurePolicy for MeasureAtLine {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let placeable = scope.measure(measurables[0], constraints.loosen())?;
        let y = scope
            .alignment_line(&placeable, &self.line)?
            .unwrap_or(IntPx::ZERO);
        Ok(MeasureResult::with_placements(
            Size::new(placeable.width(), placeable.height() + y),
            vec![Placement::new(placeable, Position::new(IntPx::ZERO, y))],
        ))
    }
}

#[test]
fn editing_the_tree_keeps_child_order() {
    let mut tree = LayoutTree::new();
    let a = leaf(&mut tree, 1, 1);
    let b = leaf(&mut tree, 1, 1);
    let c = leaf(&mut tree, 1, 1);
    let row = row_of(&mut tree, &[a, c]);
    tree.insert_child(row, 1, b).unwrap();

    let children: Vec<_> = tree.node(row).unwrap().children().collect();
    assert_eq!(children, vec![a, b, c]);
    assert_eq!(tree.node(b).unwrap().parent(), Some(row));
    assert_eq!(tree.len(), 4);
}

#[test]
fn moving_a_child_detaches_it_from_its_old_parent() {
    let mut tree = LayoutTree::new();
    let child = leaf(&mut tree, 1, 1);
    let first = row_of(&mut tree, &[child]);
    let second = row_of(&mut tree, &[]);
    tree.append_child(second, child).unwrap();

    assert_eq!(tree.node(first).unwrap().children().count(), 0);
    assert_eq!(tree.node(child).unwrap().parent(), Some(second));
}

#[test]
fn removing_a_child_disposes_its_subtree() {
    let mut tree = LayoutTree::new();
    let grandchild = leaf(&mut tree, 1, 1);
    let child = row_of(&mut tree, &[grandchild]);
    let root = row_of(&mut tree, &[child]);
    tree.set_root(root).unwrap();
    tree.remove_child(root, child).unwrap();

    assert!(!tree.contains(child));
    assert!(!tree.contains(grandchild));
    assert_eq!(tree.len(), 1);
}

#[test]
fn removing_a_non_child_is_an_error() {
    let mut tree = LayoutTree::new();
    let stranger = leaf(&mut tree, 1, 1);
    let root = row_of(&mut tree, &[]);

    assert_eq!(
        tree.remove_child(root, stranger),
        Err(LayoutError::NotAChild {
            parent: root,
            child: stranger
        })
    );
}

#[test]
fn unknown_nodes_are_reported() {
    let mut tree = LayoutTree::new();
    assert_eq!(tree.set_root(42), Err(LayoutError::MissingNode { node: 42 }));
    assert!(tree.node(7).is_err());
}

#[test]
fn pass_without_root_does_nothing() {
    let mut tree = LayoutTree::new();
    assert_eq!(tree.measure_and_layout(loose(10, 10)), Ok(()));
    assert_eq!(tree.pass(), 0);
}

#[test]
fn every_node_is_measured_and_laid_out_once() {
    let mut tree = LayoutTree::new();
    let a = leaf(&mut tree, 10, 10);
    let b = leaf(&mut tree, 20, 10);
    let row = row_of(&mut tree, &[a, b]);
    tree.set_root(row).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    for node in [row, a, b] {
        assert_eq!(counts(&tree, node), (1, 1));
    }
    assert_eq!(tree.size_of(row), Some(Size::px(30, 10)));
    assert!(!tree.needs_pass());
}

#[test]
fn clean_pass_with_same_constraints_is_free() {
    let mut tree = LayoutTree::new();
    let a = leaf(&mut tree, 10, 10);
    let row = row_of(&mut tree, &[a]);
    tree.set_root(row).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(counts(&tree, row), (1, 1));
    assert_eq!(counts(&tree, a), (1, 1));
    assert_eq!(tree.pass(), 2);
}

#[test]
fn marking_layout_only_reruns_placement() {
    let mut tree = LayoutTree::new();
    let a = leaf(&mut tree, 10, 10);
    let row = row_of(&mut tree, &[a]);
    tree.set_root(row).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    tree.mark_needs_layout(row);
    assert!(tree.needs_pass());
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(counts(&tree, row), (1, 2));
    assert_eq!(counts(&tree, a), (1, 1));
}

#[test]
fn measuring_a_child_twice_fails() {
    let mut tree = LayoutTree::new();
    let child = leaf(&mut tree, 10, 10);
    let root = tree.create_node(DoubleMeasure);
    tree.append_child(root, child).unwrap();
    tree.set_root(root).unwrap();

    assert_eq!(
        tree.measure_and_layout(loose(100, 100)),
        Err(LayoutError::MeasuredTwice { node: child })
    );
}

#[test]
fn measuring_a_foreign_node_fails() {
    let mut tree = LayoutTree::new();
    let stranger = leaf(&mut tree, 10, 10);
    let root = tree.create_node(MeasureStranger(stranger));
    tree.set_root(root).unwrap();

    assert_eq!(
        tree.measure_and_layout(loose(100, 100)),
        Err(LayoutError::NotAChild {
            parent: root,
            child: stranger
        })
    );
}

#[test]
fn state_change_remeasures_the_reader_and_its_parent() {
    let mut tree = LayoutTree::new();
    let side = tree.state_runtime().mutable_state_of(10);
    let sized = tree.create_node(StateSized { side: side.clone() });
    let other = leaf(&mut tree, 5, 5);
    let row = row_of(&mut tree, &[sized, other]);
    tree.set_root(row).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();
    assert_eq!(tree.size_of(row), Some(Size::px(15, 10)));

    side.set(30);
    assert!(tree.needs_pass());
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(tree.size_of(row), Some(Size::px(35, 30)));
    assert_eq!(tree.position_of(other), Some(Position::px(30, 0)));
    assert_eq!(counts(&tree, sized), (2, 2));
    assert_eq!(counts(&tree, row), (2, 2));
    assert_eq!(counts(&tree, other), (1, 1));
}

#[test]
fn writing_an_equal_value_schedules_nothing() {
    let mut tree = LayoutTree::new();
    let side = tree.state_runtime().mutable_state_of(10);
    let sized = tree.create_node(StateSized { side: side.clone() });
    tree.set_root(sized).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    side.set(10);
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(counts(&tree, sized), (1, 1));
}

#[test]
fn several_writes_before_a_pass_coalesce() {
    let mut tree = LayoutTree::new();
    let side = tree.state_runtime().mutable_state_of(10);
    let sized = tree.create_node(StateSized { side: side.clone() });
    tree.set_root(sized).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    side.set(20);
    side.set(40);
    side.update(|side| *side += 2);
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(counts(&tree, sized), (2, 2));
    assert_eq!(tree.size_of(sized), Some(Size::px(42, 42)));
}

#[test]
fn state_read_in_placement_only_relays_out() {
    let mut tree = LayoutTree::new();
    let offset = tree.state_runtime().mutable_state_of(0);
    let child = leaf(&mut tree, 10, 10);
    let root = tree.create_node(StateOffset {
        offset: offset.clone(),
    });
    tree.append_child(root, child).unwrap();
    tree.set_root(root).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    offset.set(7);
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(counts(&tree, root), (1, 2));
    assert_eq!(counts(&tree, child), (1, 1));
    assert_eq!(tree.position_of(child), Some(Position::px(7, 0)));
}

#[test]
fn new_root_constraints_remeasure_the_root() {
    let mut tree = LayoutTree::new();
    let child = leaf(&mut tree, 10, 10);
    let root = tree.create_node(PaddingMeasurePolicy::new(EdgeInsets::uniform(5)));
    tree.append_child(root, child).unwrap();
    tree.set_root(root).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();
    tree.measure_and_layout(Constraints::tight(IntPx(50), IntPx(50))).unwrap();

    assert_eq!(tree.size_of(root), Some(Size::px(50, 50)));
    assert_eq!(counts(&tree, root).0, 2);
}

#[test]
fn position_in_root_adds_modifier_offsets() {
    let mut tree = LayoutTree::new();
    let inner = leaf(&mut tree, 10, 10);
    let middle = tree.create_node(PaddingMeasurePolicy::new(EdgeInsets::uniform(5)));
    tree.append_child(middle, inner).unwrap();
    tree.set_modifier(middle, Modifier::empty().padding_all(3))
        .unwrap();
    let root = tree.create_node(PaddingMeasurePolicy::new(EdgeInsets::uniform(10)));
    tree.append_child(root, middle).unwrap();
    tree.set_root(root).unwrap();
    tree.measure_and_layout(loose(200, 200)).unwrap();

    assert_eq!(tree.size_of(middle), Some(Size::px(26, 26)));
    assert_eq!(tree.size_of(root), Some(Size::px(46, 46)));
    assert_eq!(tree.position_in_root(root), Some(Position::ZERO));
    assert_eq!(tree.position_in_root(middle), Some(Position::px(10, 10)));
    assert_eq!(tree.position_in_root(inner), Some(Position::px(18, 18)));
}

#[test]
fn placed_nodes_lists_parents_first() {
    let mut tree = LayoutTree::new();
    let a = leaf(&mut tree, 10, 10);
    let b = leaf(&mut tree, 20, 20);
    let row = row_of(&mut tree, &[a, b]);
    tree.set_root(row).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    let placed = tree.placed_nodes();
    assert_eq!(
        placed,
        vec![
            PlacedNode {
                node: row,
                size: Size::px(30, 20),
                position: Position::ZERO,
            },
            PlacedNode {
                node: a,
                size: Size::px(10, 10),
                position: Position::ZERO,
            },
            PlacedNode {
                node: b,
                size: Size::px(20, 20),
                position: Position::px(10, 0),
            },
        ]
    );
}

#[test]
fn removed_children_leave_the_output() {
    let mut tree = LayoutTree::new();
    let a = leaf(&mut tree, 10, 10);
    let b = leaf(&mut tree, 20, 20);
    let row = row_of(&mut tree, &[a, b]);
    tree.set_root(row).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    tree.remove_child(row, a).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    let nodes: Vec<_> = tree.placed_nodes().iter().map(|p| p.node).collect();
    assert_eq!(nodes, vec![row, b]);
    assert_eq!(tree.position_of(b), Some(Position::ZERO));
    assert_eq!(tree.size_of(row), Some(Size::px(20, 20)));
}

#[test]
fn unplaced_child_is_not_in_the_placed_tree() {
    let mut tree = LayoutTree::new();
    let child = leaf(&mut tree, 10, 10);
    let root = tree.create_node(LeafMeasurePolicy::px(50, 50));
    tree.append_child(root, child).unwrap();
    tree.set_root(root).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert!(tree.is_placed(root));
    assert!(!tree.is_placed(child));
    assert_eq!(tree.placed_nodes().len(), 1);
}

#[test]
fn line_read_while_placing_only_relays_out_the_parent() {
    let line = AlignmentLine::horizontal("offset", merge_max);
    let mut tree = LayoutTree::new();
    let value = tree.state_runtime().mutable_state_of(4);
    let child = tree.create_node(StateLine {
        line,
        value: value.clone(),
    });
    let root = tree.create_node(PlaceAtLine { line });
    tree.append_child(root, child).unwrap();
    tree.set_root(root).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();
    assert_eq!(tree.position_of(child), Some(Position::px(0, 4)));

    value.set(9);
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(tree.position_of(child), Some(Position::px(0, 9)));
    assert_eq!(counts(&tree, root), (1, 2));
    assert_eq!(counts(&tree, child), (2, 2));
}

#[test]
fn line_read_while_measuring_remeasures_the_parent() {
    let line = AlignmentLine::horizontal("offset", merge_max);
    let mut tree = LayoutTree::new();
    let value = tree.state_runtime().mutable_state_of(4);
    let child = tree.create_node(StateLine {
        line,
        value: value.clone(),
    });
    let root = tree.create_node(MeasureAtLine { line });
    tree.append_child(root, child).unwrap();
    tree.set_root(root).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();
    assert_eq!(tree.size_of(root), Some(Size::px(10, 14)));

    value.set(9);
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(tree.size_of(root), Some(Size::px(10, 19)));
    assert_eq!(tree.position_of(child), Some(Position::px(0, 9)));
    assert_eq!(counts(&tree, root).0, 2);
    assert_eq!(counts(&tree, child).0, 2);
}

#[test]
fn parent_lines_merge_placed_children_at_their_positions() {
    let line = AlignmentLine::horizontal("offset", merge_max);
    let mut tree = LayoutTree::new();
    let value = tree.state_runtime().mutable_state_of(3);
    let child = tree.create_node(StateLine { line, value });
    let middle = tree.create_node(PaddingMeasurePolicy::new(EdgeInsets::uniform(5)));
    tree.append_child(middle, child).unwrap();
    let root = tree.create_node(MeasureAtLine { line });
    tree.append_child(root, middle).unwrap();
    tree.set_root(root).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    let lines = tree.node(middle).unwrap().alignment_lines().cloned();
    assert_eq!(lines.and_then(|lines| lines.get(&line)), Some(IntPx(8)));
    assert_eq!(tree.position_of(middle), Some(Position::px(0, 8)));
}
