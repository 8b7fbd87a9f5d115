use smallvec::SmallVec;
use std::any::Any;
use std::rc::Rc;
use trellis_core::collections::OrderedSet;
use trellis_core::NodeId;
use trellis_ui_layout::{
    AlignmentLineMap, Constraints, LayoutModifier, MeasurePolicy, MeasureResult, Position, Size,
};

/// Token identifying one run of a measure block or placement block.
///
/// A child may be measured once per run, and a placement block may not measure a
/// child that the measure block producing its result already measured.
pub(crate) type MeasureToken = u64;

/// Alignment-line bookkeeping for one node.
#[derive(Default)]
pub(crate) struct LineState {
    pub(crate) values: AlignmentLineMap,
    /// Whether `values` reflects the latest layout.
    pub(crate) calculated: bool,
    /// Compute lines on the next layout regardless of history.
    pub(crate) forced: bool,
    /// Pass in which the lines were last queried after this node was laid out.
    pub(crate) queried_after_layout: Option<u64>,
    /// The parent read these lines from its measure block.
    pub(crate) read_in_parent_measure: bool,
    /// The parent read these lines from its placement block.
    pub(crate) read_in_parent_layout: bool,
    /// The node is inside a layout that computes lines.
    pub(crate) computing: bool,
}

/// A node in the [`LayoutTree`](super::LayoutTree) arena.
pub struct LayoutNode {
    pub(crate) policy: Rc<dyn MeasurePolicy>,
    pub(crate) modifiers: SmallVec<[Rc<dyn LayoutModifier>; 2]>,
    pub(crate) parent_data: Option<Rc<dyn Any>>,
    /// `parent_data` folded through the modifier chain.
    pub(crate) resolved_parent_data: Option<Rc<dyn Any>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: OrderedSet<NodeId>,
    pub(crate) depth: usize,

    pub(crate) constraints: Option<Constraints>,
    pub(crate) result: Option<MeasureResult>,
    /// Token of the measure block run that produced `result`.
    pub(crate) result_token: MeasureToken,
    pub(crate) size: Size,
    /// Offset of the policy's content box inside the node, summed over modifiers.
    pub(crate) content_offset: Position,
    /// Per-modifier offset of the wrapped content, outermost first.
    pub(crate) layer_offsets: SmallVec<[Position; 2]>,

    pub(crate) position: Position,
    pub(crate) placed: bool,

    pub(crate) needs_measure: bool,
    pub(crate) needs_layout: bool,
    pub(crate) measured_by: Option<MeasureToken>,
    /// Token of the parent measure block run that last measured this node.
    pub(crate) measured_in_parent_measure: Option<MeasureToken>,
    /// The latest measurement came from the parent's measure block.
    pub(crate) affects_parent_size: bool,
    pub(crate) laid_out_pass: u64,

    pub(crate) lines: LineState,

    pub(crate) measure_count: usize,
    pub(crate) layout_count: usize,
}

impl LayoutNode {
    pub(crate) fn new(policy: Rc<dyn MeasurePolicy>) -> Self {
        Self {
            policy,
            modifiers: SmallVec::new(),
            parent_data: None,
            resolved_parent_data: None,
            parent: None,
            children: OrderedSet::default(),
            depth: 0,
            constraints: None,
            result: None,
            result_token: 0,
            size: Size::ZERO,
            content_offset: Position::ZERO,
            layer_offsets: SmallVec::new(),
            position: Position::ZERO,
            placed: false,
            needs_measure: true, // New nodes need initial measure
            needs_layout: true,  // New nodes need initial layout
            measured_by: None,
            measured_in_parent_measure: None,
            affects_parent_size: true,
            laid_out_pass: 0,
            lines: LineState::default(),
            measure_count: 0,
            layout_count: 0,
        }
    }

    pub(crate) fn resolve_parent_data(&mut self) {
        let mut data = self.parent_data.clone();
        for modifier in self.modifiers.iter().rev() {
            data = modifier.modify_parent_data(data);
        }
        self.resolved_parent_data = data;
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().copied()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Position relative to the parent's content box.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn content_offset(&self) -> Position {
        self.content_offset
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn needs_measure(&self) -> bool {
        self.needs_measure
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Constraints of the latest measurement.
    pub fn constraints(&self) -> Option<Constraints> {
        self.constraints
    }

    /// Alignment lines computed by the latest layout that required them.
    pub fn alignment_lines(&self) -> Option<&AlignmentLineMap> {
        self.lines.calculated.then_some(&self.lines.values)
    }

    pub fn debug_name(&self) -> &str {
        self.policy.debug_name()
    }

    /// Times the measure block ran.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn measure_count(&self) -> usize {
        self.measure_count
    }

    /// Times the placement block ran.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn layout_count(&self) -> usize {
        self.layout_count
    }
}
