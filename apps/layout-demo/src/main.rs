use trellis_core::MutableState;
use trellis_ui::prelude::*;
use trellis_ui::{Axis, CrossAxisAlignment, LayoutSize, NodeId, TableColumnWidth};

/// Pill whose width grows with the unread count it displays.
struct Badge {
    unread: MutableState<u32>,
}

impl MeasurePolicy for Badge {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        _measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let digits = self.unread.get(scope).to_string().len() as i32;
        Ok(MeasureResult::leaf(
            constraints.constrain(Size::px(16 + digits * 8, 20)),
        ))
    }

    fn debug_name(&self) -> &str {
        "Badge"
    }
}

fn parent(
    tree: &mut LayoutTree,
    policy: impl MeasurePolicy + 'static,
    children: &[NodeId],
) -> Result<NodeId, LayoutError> {
    let node = tree.create_node(policy);
    for child in children {
        tree.append_child(node, *child)?;
    }
    Ok(node)
}

fn build(tree: &mut LayoutTree, unread: &MutableState<u32>) -> Result<NodeId, LayoutError> {
    let title = tree.create_node(LeafMeasurePolicy::px(120, 28).with_line(FIRST_BASELINE, 22));
    let subtitle = tree.create_node(LeafMeasurePolicy::px(80, 16).with_line(FIRST_BASELINE, 12));
    let badge = tree.create_node(Badge {
        unread: unread.clone(),
    });
    let toolbar = parent(
        tree,
        FlexMeasurePolicy::row(
            LinearArrangement::SpaceBetween,
            CrossAxisAlignment::AlignmentLine(FIRST_BASELINE),
        )
        .with_main_axis_size(LayoutSize::Expand),
        &[title, subtitle, badge],
    )?;

    let chips: Vec<NodeId> = (0..9)
        .map(|index| tree.create_node(LeafMeasurePolicy::px(48 + index % 3 * 16, 24)))
        .collect();
    let flow = parent(
        tree,
        FlowMeasurePolicy {
            main_axis_spacing: IntPx(8),
            cross_axis_spacing: IntPx(8),
            ..FlowMeasurePolicy::row()
        },
        &chips,
    )?;
    let body = parent(
        tree,
        ContainerMeasurePolicy::expanded()
            .with_padding(EdgeInsets::uniform(12))
            .with_alignment(Alignment::TOP_START),
        &[flow],
    )?;
    tree.set_modifier(body, Modifier::empty().weight(1.0))?;

    let cells: Vec<NodeId> = [(40, 16), (120, 16), (24, 16), (40, 16), (96, 16), (32, 16)]
        .into_iter()
        .map(|(width, height)| tree.create_node(LeafMeasurePolicy::px(width, height)))
        .collect();
    let footer = parent(
        tree,
        TableMeasurePolicy::new(3).with_column_widths([
            TableColumnWidth::wrap(),
            TableColumnWidth::flex(1.0),
            TableColumnWidth::fixed(48),
        ]),
        &cells,
    )?;

    parent(
        tree,
        FlexMeasurePolicy::flex(Axis::Vertical).with_cross_axis_size(LayoutSize::Expand),
        &[toolbar, body, footer],
    )
}

fn dump(tree: &LayoutTree) -> Result<(), LayoutError> {
    for placed in tree.placed_nodes() {
        let node = tree.node(placed.node)?;
        let mut depth = 0;
        let mut parent = node.parent();
        while let Some(id) = parent {
            depth += 1;
            parent = tree.node(id)?.parent();
        }
        println!(
            "{:indent$}{} #{} at ({}, {}) size {}x{}",
            "",
            node.debug_name(),
            placed.node,
            placed.position.x.value(),
            placed.position.y.value(),
            placed.size.width.value(),
            placed.size.height.value(),
            indent = depth * 2
        );
    }
    Ok(())
}

fn main() -> Result<(), LayoutError> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Trellis Layout Demo ===");
    println!("Set RUST_LOG=trellis_ui=trace to follow every measure and layout.");
    println!();

    let mut tree = LayoutTree::new();
    let unread = tree.state_runtime().mutable_state_of(3u32);
    let root = build(&mut tree, &unread)?;
    tree.set_root(root)?;

    let constraints = Constraints::tight(IntPx(480), IntPx(320));
    tree.measure_and_layout(constraints)?;
    println!("-- first pass");
    dump(&tree)?;

    unread.set(128);
    log::info!("unread count changed, pending pass: {}", tree.needs_pass());
    tree.measure_and_layout(constraints)?;
    println!();
    println!("-- after the badge grew");
    dump(&tree)?;

    tree.measure_and_layout(Constraints::tight(IntPx(240), IntPx(320)))?;
    println!();
    println!("-- narrow window");
    dump(&tree)?;
    Ok(())
}
