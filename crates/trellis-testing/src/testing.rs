use trellis_core::{MutableState, NodeId, StateRuntime};
use trellis_ui::layout::policies::LeafMeasurePolicy;
use trellis_ui::{LayoutError, LayoutTree, MeasurePolicy, Modifier};
use trellis_ui_layout::{Constraints, IntPx, Position, Size};

/// Headless harness for driving a layout tree in tests.
///
/// `LayoutTestRule` owns a [`LayoutTree`] and remembers the constraints of the
/// latest pass so a test can write state, re-run and assert without repeating
/// the root constraints. Every pass is synchronous; there is nothing to wait
/// for.
pub struct LayoutTestRule {
    tree: LayoutTree,
    constraints: Constraints,
}

impl LayoutTestRule {
    /// Create a new rule with an empty tree and `constraints` as the root
    /// constraints for [`run`](Self::run).
    pub fn new(constraints: Constraints) -> Self {
        Self {
            tree: LayoutTree::new(),
            constraints,
        }
    }

    /// Rule whose root is offered `width` x `height` at most.
    pub fn loose(width: i32, height: i32) -> Self {
        Self::new(Constraints::loose(IntPx(width), IntPx(height)))
    }

    /// Rule whose root must be exactly `width` x `height`.
    pub fn tight(width: i32, height: i32) -> Self {
        Self::new(Constraints::tight(IntPx(width), IntPx(height)))
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut LayoutTree {
        &mut self.tree
    }

    pub fn runtime(&self) -> &StateRuntime {
        self.tree.state_runtime()
    }

    /// Allocates observable state on the tree's runtime.
    pub fn state<T: Clone + 'static>(&self, value: T) -> MutableState<T> {
        self.tree.state_runtime().mutable_state_of(value)
    }

    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// Replaces the root constraints used by subsequent passes.
    pub fn set_constraints(&mut self, constraints: Constraints) {
        self.constraints = constraints;
    }

    /// Creates a detached node.
    pub fn node(&mut self, policy: impl MeasurePolicy + 'static) -> NodeId {
        self.tree.create_node(policy)
    }

    /// Creates a fixed-size leaf.
    pub fn leaf(&mut self, width: i32, height: i32) -> NodeId {
        self.tree.create_node(LeafMeasurePolicy::px(width, height))
    }

    /// Creates a node with `children` appended in order.
    pub fn parent(&mut self, policy: impl MeasurePolicy + 'static, children: &[NodeId]) -> NodeId {
        let node = self.tree.create_node(policy);
        for child in children {
            if let Err(err) = self.tree.append_child(node, *child) {
                panic!("cannot append #{child} to #{node}: {err}");
            }
        }
        node
    }

    /// Replaces the modifier chain of `node`.
    pub fn modify(&mut self, node: NodeId, modifier: Modifier) {
        if let Err(err) = self.tree.set_modifier(node, modifier) {
            panic!("cannot modify #{node}: {err}");
        }
    }

    /// Makes `node` the root of the tree.
    pub fn set_content(&mut self, node: NodeId) {
        if let Err(err) = self.tree.set_root(node) {
            panic!("cannot set #{node} as root: {err}");
        }
    }

    /// Runs one pass with the current root constraints.
    pub fn run(&mut self) -> Result<(), LayoutError> {
        self.tree.measure_and_layout(self.constraints)
    }

    /// Runs one pass with new root constraints and keeps them for later passes.
    pub fn run_with(&mut self, constraints: Constraints) -> Result<(), LayoutError> {
        self.constraints = constraints;
        self.run()
    }

    /// Runs passes until the tree reports no pending work.
    pub fn pump_until_idle(&mut self) -> Result<(), LayoutError> {
        let mut passes = 0;
        loop {
            self.run()?;
            passes += 1;
            if !self.tree.needs_pass() {
                log::debug!("tree idle after {} pass(es)", passes);
                return Ok(());
            }
            if passes > 100 {
                panic!("pump_until_idle looped too many times!");
            }
        }
    }

    /// Size of `node` after the latest pass.
    pub fn size(&self, node: NodeId) -> Size {
        self.tree
            .size_of(node)
            .unwrap_or_else(|| panic!("node #{node} does not exist"))
    }

    /// Position of `node` inside its parent's content box.
    pub fn position(&self, node: NodeId) -> Position {
        self.tree
            .position_of(node)
            .unwrap_or_else(|| panic!("node #{node} does not exist"))
    }

    /// Position of `node` relative to the root.
    pub fn position_in_root(&self, node: NodeId) -> Position {
        self.tree
            .position_in_root(node)
            .unwrap_or_else(|| panic!("node #{node} is not attached to the root"))
    }

    pub fn measure_count(&self, node: NodeId) -> usize {
        self.layout_node(node).measure_count()
    }

    pub fn layout_count(&self, node: NodeId) -> usize {
        self.layout_node(node).layout_count()
    }

    /// Asserts the number of times `node` was measured and laid out so far.
    #[track_caller]
    pub fn assert_counts(&self, node: NodeId, measures: usize, layouts: usize) {
        assert_eq!(
            (self.measure_count(node), self.layout_count(node)),
            (measures, layouts),
            "(measure, layout) counts of #{node} ({})",
            self.layout_node(node).debug_name()
        );
    }

    fn layout_node(&self, node: NodeId) -> &trellis_ui::LayoutNode {
        match self.tree.node(node) {
            Ok(target) => target,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Runs `build` against a fresh rule, sets the node it returns as the root and
/// performs the first pass.
pub fn run_test_layout(
    constraints: Constraints,
    build: impl FnOnce(&mut LayoutTestRule) -> NodeId,
) -> (LayoutTestRule, NodeId) {
    let mut rule = LayoutTestRule::new(constraints);
    let root = build(&mut rule);
    rule.set_content(root);
    if let Err(err) = rule.run() {
        panic!("first layout pass failed: {err}");
    }
    (rule, root)
}
