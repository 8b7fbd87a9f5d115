use super::node::MeasureToken;
use super::LayoutTree;
use trellis_core::{NodeId, Phase, ReadObserver, StateId};
use trellis_ui_layout::{
    AlignmentLine, Constraints, IntPx, IntrinsicScope, LayoutError, MeasureScope, Measurable,
    Placeable, PlacementScope, Position,
};

/// Scope handed to a node's measure block or placement block.
///
/// It borrows the whole tree mutably for the duration of the block; children are
/// measured, laid out and placed through it.
pub(crate) struct NodeScope<'a> {
    tree: &'a mut LayoutTree,
    node: NodeId,
    token: MeasureToken,
    /// Token of the measure run whose result this scope belongs to.
    measure_token: MeasureToken,
    phase: Phase,
}

impl<'a> NodeScope<'a> {
    pub(crate) fn new(
        tree: &'a mut LayoutTree,
        node: NodeId,
        token: MeasureToken,
        measure_token: MeasureToken,
        phase: Phase,
    ) -> Self {
        Self {
            tree,
            node,
            token,
            measure_token,
            phase,
        }
    }

    fn child_of(&self, node: Option<NodeId>) -> Result<Option<NodeId>, LayoutError> {
        let Some(child) = node else {
            return Ok(None);
        };
        let parent = self.tree.node(self.node)?;
        if !parent.children.contains(&child) {
            return Err(LayoutError::NotAChild {
                parent: self.node,
                child,
            });
        }
        Ok(Some(child))
    }

    fn measure_child(
        &mut self,
        measurable: Measurable,
        constraints: Constraints,
    ) -> Result<Placeable, LayoutError> {
        let child = measurable.node_id();
        self.child_of(Some(child))?;
        self.tree.measure_by_parent(
            child,
            constraints,
            self.token,
            self.measure_token,
            self.phase,
        )
    }

    fn query_line(
        &mut self,
        placeable: &Placeable,
        line: &AlignmentLine,
    ) -> Result<Option<IntPx>, LayoutError> {
        match self.child_of(placeable.node_id())? {
            Some(child) => self.tree.query_alignment_line(child, line, self.phase),
            None => Ok(None),
        }
    }
}

impl ReadObserver for NodeScope<'_> {
    fn record_read(&mut self, state: StateId) {
        self.tree.observer.record((self.node, self.phase), state);
    }
}

impl MeasureScope for NodeScope<'_> {
    fn measure(
        &mut self,
        measurable: Measurable,
        constraints: Constraints,
    ) -> Result<Placeable, LayoutError> {
        self.measure_child(measurable, constraints)
    }

    fn alignment_line(
        &mut self,
        placeable: &Placeable,
        line: &AlignmentLine,
    ) -> Result<Option<IntPx>, LayoutError> {
        self.query_line(placeable, line)
    }

    fn intrinsics(&self) -> &dyn IntrinsicScope {
        &*self.tree
    }
}

impl PlacementScope for NodeScope<'_> {
    fn place(&mut self, placeable: &Placeable, position: Position) -> Result<(), LayoutError> {
        match self.child_of(placeable.node_id())? {
            Some(child) => self.tree.place_child(child, position),
            None => Ok(()),
        }
    }

    fn measure(
        &mut self,
        measurable: Measurable,
        constraints: Constraints,
    ) -> Result<Placeable, LayoutError> {
        self.measure_child(measurable, constraints)
    }

    fn alignment_line(
        &mut self,
        placeable: &Placeable,
        line: &AlignmentLine,
    ) -> Result<Option<IntPx>, LayoutError> {
        self.query_line(placeable, line)
    }

    fn intrinsics(&self) -> &dyn IntrinsicScope {
        &*self.tree
    }
}
