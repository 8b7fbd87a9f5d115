use super::*;
use crate::layout::policies::{FlexMeasurePolicy, LeafMeasurePolicy, StackMeasurePolicy};
use crate::layout::LayoutTree;
use trellis_core::NodeId;
use trellis_ui_layout::{
    Constraints, IntPx, IntrinsicKind, IntrinsicScope, Measurable, Position, Size,
};

fn loose(width: i32, height: i32) -> Constraints {
    Constraints::loose(IntPx(width), IntPx(height))
}

fn measure_single(
    modifier: Modifier,
    leaf: Size,
    constraints: Constraints,
) -> (LayoutTree, NodeId) {
    let mut tree = LayoutTree::new();
    let node = tree.create_node(LeafMeasurePolicy::new(leaf));
    tree.set_modifier(node, modifier).unwrap();
    tree.set_root(node).unwrap();
    tree.measure_and_layout(constraints).unwrap();
    (tree, node)
}

#[test]
fn empty_chain_has_no_layers() {
    let modifier = Modifier::empty();
    assert!(modifier.is_empty());
    assert_eq!(format!("{modifier:?}"), "[]");
}

#[test]
fn chain_lists_layers_outermost_first() {
    let modifier = Modifier::empty()
        .padding_all(4)
        .fill_max_width()
        .weight(1.0);
    assert_eq!(format!("{modifier:?}"), r#"["padding", "fill", "flex"]"#);
}

#[test]
fn then_concatenates_chains() {
    let outer = Modifier::empty().padding_all(1);
    let inner = Modifier::empty().aspect_ratio(2.0);
    let joined = outer.then(inner);
    assert_eq!(joined.layers().len(), 2);
    assert_eq!(joined.layers()[1].debug_name(), "aspect_ratio");
    assert_eq!(outer.then(Modifier::empty()).layers().len(), 1);
    assert_eq!(outer.layers().len(), 1);
}

#[test]
fn padding_grows_the_node_and_offsets_the_content() {
    let (tree, node) = measure_single(
        Modifier::empty().padding(EdgeInsets::from_components(1, 2, 3, 4)),
        Size::px(10, 10),
        loose(100, 100),
    );

    let target = tree.node(node).unwrap();
    assert_eq!(target.size(), Size::px(14, 16));
    assert_eq!(target.content_offset(), Position::px(1, 2));
}

#[test]
fn padding_shrinks_the_content_constraints() {
    let (tree, node) = measure_single(
        Modifier::empty().padding_all(10),
        Size::px(500, 500),
        loose(100, 100),
    );

    assert_eq!(tree.size_of(node), Some(Size::px(100, 100)));
}

#[test]
fn stacked_paddings_add_up() {
    let (tree, node) = measure_single(
        Modifier::empty().padding_all(2).padding_symmetric(3, 0),
        Size::px(10, 10),
        loose(100, 100),
    );

    let target = tree.node(node).unwrap();
    assert_eq!(target.size(), Size::px(20, 14));
    assert_eq!(target.content_offset(), Position::px(5, 2));
}

#[test]
fn fill_max_width_takes_the_bounded_width() {
    let (tree, node) = measure_single(
        Modifier::empty().fill_max_width(),
        Size::px(10, 10),
        loose(80, 60),
    );

    assert_eq!(tree.size_of(node), Some(Size::px(80, 10)));
}

#[test]
fn fill_ignores_unbounded_axes() {
    let (tree, node) = measure_single(
        Modifier::empty().fill_max_size(),
        Size::px(10, 10),
        Constraints::new(IntPx::ZERO, IntPx(80), IntPx::ZERO, IntPx::INFINITY),
    );

    assert_eq!(tree.size_of(node), Some(Size::px(80, 10)));
}

#[test]
fn aspect_ratio_prefers_the_max_width() {
    let modifier = AspectRatioModifier::new(2.0);
    assert_eq!(modifier.find_size(loose(100, 100)), Some(Size::px(100, 50)));
    assert_eq!(modifier.find_size(loose(100, 30)), Some(Size::px(60, 30)));
    assert_eq!(modifier.find_size(Constraints::unbounded()), None);
}

#[test]
fn aspect_ratio_sizes_the_node() {
    let (tree, node) = measure_single(
        Modifier::empty().aspect_ratio(0.5),
        Size::px(1, 1),
        loose(40, 200),
    );

    assert_eq!(tree.size_of(node), Some(Size::px(40, 80)));
}

#[test]
fn aspect_ratio_intrinsics_follow_the_cross_size() {
    let mut tree = LayoutTree::new();
    let node = tree.create_node(LeafMeasurePolicy::px(7, 9));
    tree.set_modifier(node, Modifier::empty().aspect_ratio(2.0))
        .unwrap();

    assert_eq!(tree.intrinsic_size(node, IntrinsicKind::MinWidth(IntPx(10))), IntPx(20));
    assert_eq!(tree.intrinsic_size(node, IntrinsicKind::MaxHeight(IntPx(10))), IntPx(5));
    assert_eq!(
        tree.intrinsic_size(node, IntrinsicKind::MinWidth(IntPx::INFINITY)),
        IntPx(7)
    );
}

#[test]
fn padding_intrinsics_add_the_insets() {
    let mut tree = LayoutTree::new();
    let node = tree.create_node(LeafMeasurePolicy::px(7, 9));
    tree.set_modifier(node, Modifier::empty().padding_symmetric(4, 1))
        .unwrap();

    assert_eq!(tree.intrinsic_size(node, IntrinsicKind::MaxWidth(IntPx(50))), IntPx(15));
    assert_eq!(tree.intrinsic_size(node, IntrinsicKind::MinHeight(IntPx(50))), IntPx(11));
}

#[test]
fn outermost_parent_data_wins() {
    let mut tree = LayoutTree::new();
    let node = tree.create_node(LeafMeasurePolicy::px(1, 1));
    tree.set_modifier(node, Modifier::empty().weight(3.0).weight_with_fill(1.0, false))
        .unwrap();

    let scope: &dyn IntrinsicScope = &tree;
    let data = scope.flex_parent_data(Measurable::new(node));
    assert_eq!(data, FlexParentData::new(3.0, true));
}

#[test]
fn modifier_parent_data_overrides_attached_data() {
    let mut tree = LayoutTree::new();
    let node = tree.create_node(LeafMeasurePolicy::px(1, 1));
    tree.set_parent_data(node, FlexParentData::new(5.0, false))
        .unwrap();
    let scope: &dyn IntrinsicScope = &tree;
    assert_eq!(
        scope.flex_parent_data(Measurable::new(node)),
        FlexParentData::new(5.0, false)
    );

    tree.set_modifier(node, Modifier::empty().inflexible()).unwrap();
    let scope: &dyn IntrinsicScope = &tree;
    assert_eq!(
        scope.flex_parent_data(Measurable::new(node)),
        FlexParentData::default()
    );
}

#[test]
fn changing_a_childs_weight_remeasures_the_row() {
    let mut tree = LayoutTree::new();
    let a = tree.create_node(LeafMeasurePolicy::px(10, 10));
    let b = tree.create_node(LeafMeasurePolicy::px(10, 10));
    let row = tree.create_node(FlexMeasurePolicy::flex(trellis_ui_layout::Axis::Horizontal));
    tree.append_child(row, a).unwrap();
    tree.append_child(row, b).unwrap();
    tree.set_root(row).unwrap();
    let constraints = Constraints::tight(IntPx(100), IntPx(10));
    tree.measure_and_layout(constraints).unwrap();
    assert_eq!(tree.position_of(b), Some(Position::px(10, 0)));

    tree.set_modifier(a, Modifier::empty().weight(1.0)).unwrap();
    tree.measure_and_layout(constraints).unwrap();

    assert_eq!(tree.size_of(a), Some(Size::px(90, 10)));
    assert_eq!(tree.position_of(b), Some(Position::px(90, 0)));
}

#[test]
fn stack_modifier_aligns_inside_a_stack() {
    let mut tree = LayoutTree::new();
    let big = tree.create_node(LeafMeasurePolicy::px(40, 40));
    let small = tree.create_node(LeafMeasurePolicy::px(10, 10));
    tree.set_modifier(small, Modifier::empty().align_in_stack(Alignment::CENTER))
        .unwrap();
    let stack = tree.create_node(StackMeasurePolicy::default());
    tree.append_child(stack, big).unwrap();
    tree.append_child(stack, small).unwrap();
    tree.set_root(stack).unwrap();
    tree.measure_and_layout(loose(100, 100)).unwrap();

    assert_eq!(tree.position_of(small), Some(Position::px(15, 15)));
}
