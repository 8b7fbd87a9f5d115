//! The layout tree: node arena, pass orchestration and dirty propagation.

mod alignment_lines;
mod intrinsics;
mod node;
pub mod policies;
mod positioned;
mod scope;

pub use node::LayoutNode;

use crate::modifier::Modifier;
use node::MeasureToken;
use positioned::PositionedHook;
use scope::NodeScope;
use smallvec::SmallVec;
use std::any::Any;
use std::rc::Rc;
use trellis_core::collections::map::HashMap;
use trellis_core::collections::OrderedSet;
use trellis_core::{NodeId, Phase, StateObserver, StateRuntime};
use trellis_ui_layout::{
    Constraints, LayoutError, Measurable, MeasurePolicy, Placeable, Position, Size,
};

/// A node that ended up placed in the latest pass, in root coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedNode {
    pub node: NodeId,
    pub size: Size,
    pub position: Position,
}

/// Arena of layout nodes plus the machinery that measures and places them.
///
/// All mutation of measured and placed state happens inside
/// [`measure_and_layout`](Self::measure_and_layout). Tree edits and dirty marks
/// only record what the next pass has to do.
pub struct LayoutTree {
    nodes: HashMap<NodeId, LayoutNode>,
    next_id: NodeId,
    root: Option<NodeId>,
    pass: u64,
    next_token: MeasureToken,
    measure_queue: OrderedSet<NodeId>,
    layout_queue: OrderedSet<NodeId>,
    runtime: StateRuntime,
    observer: StateObserver<(NodeId, Phase)>,
    positioned: HashMap<NodeId, PositionedHook>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::with_runtime(StateRuntime::new())
    }

    /// Creates a tree whose nodes are invalidated by writes to `runtime`'s states.
    pub fn with_runtime(runtime: StateRuntime) -> Self {
        Self {
            nodes: HashMap::default(),
            next_id: 0,
            root: None,
            pass: 0,
            next_token: 0,
            measure_queue: OrderedSet::default(),
            layout_queue: OrderedSet::default(),
            runtime,
            observer: StateObserver::new(),
            positioned: HashMap::default(),
        }
    }

    pub fn state_runtime(&self) -> &StateRuntime {
        &self.runtime
    }

    /// Number of the latest pass. Zero before the first pass.
    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node(&self, node: NodeId) -> Result<&LayoutNode, LayoutError> {
        self.nodes
            .get(&node)
            .ok_or(LayoutError::MissingNode { node })
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> Result<&mut LayoutNode, LayoutError> {
        self.nodes
            .get_mut(&node)
            .ok_or(LayoutError::MissingNode { node })
    }

    // ------------------------------------------------------------------
    // Tree editing
    // ------------------------------------------------------------------

    /// Creates a detached node driven by `policy`.
    pub fn create_node(&mut self, policy: impl MeasurePolicy + 'static) -> NodeId {
        self.create_shared_node(Rc::new(policy))
    }

    /// Creates a detached node driven by a policy shared with other nodes.
    pub fn create_shared_node(&mut self, policy: Rc<dyn MeasurePolicy>) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, LayoutNode::new(policy));
        id
    }

    /// Makes `node` the root. The previous root, if any, is left detached.
    pub fn set_root(&mut self, node: NodeId) -> Result<(), LayoutError> {
        if self.node(node)?.parent.is_some() {
            self.detach(node)?;
        }
        self.root = Some(node);
        self.set_depth(node, 0);
        self.request_measure(node);
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let index = self.node(parent)?.children.len();
        self.insert_child(parent, index, child)
    }

    /// Inserts `child` at `index` among `parent`'s children, moving it from its
    /// previous parent if it had one.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), LayoutError> {
        self.node(child)?;
        let depth = self.node(parent)?.depth + 1;
        if self.node(child)?.parent.is_some() {
            self.detach(child)?;
        }
        if self.root == Some(child) {
            self.root = None;
        }
        let parent_node = self.node_mut(parent)?;
        let len = parent_node.children.len();
        parent_node.children.shift_insert(index.min(len), child);
        self.node_mut(child)?.parent = Some(parent);
        self.set_depth(child, depth);
        self.request_measure(child);
        self.request_measure(parent);
        Ok(())
    }

    /// Removes `child` from `parent` and disposes its whole subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        if !self.node(parent)?.children.contains(&child) {
            return Err(LayoutError::NotAChild { parent, child });
        }
        self.detach(child)?;
        self.dispose(child);
        Ok(())
    }

    /// Replaces the policy of `node`.
    pub fn set_policy(
        &mut self,
        node: NodeId,
        policy: impl MeasurePolicy + 'static,
    ) -> Result<(), LayoutError> {
        self.node_mut(node)?.policy = Rc::new(policy);
        self.request_measure(node);
        Ok(())
    }

    pub fn set_modifier(&mut self, node: NodeId, modifier: Modifier) -> Result<(), LayoutError> {
        let target = self.node_mut(node)?;
        target.modifiers = modifier.layers().iter().cloned().collect();
        target.resolve_parent_data();
        let parent = target.parent;
        self.request_measure(node);
        if let Some(parent) = parent {
            self.request_measure(parent);
        }
        Ok(())
    }

    /// Attaches data for the parent's policy, e.g.
    /// [`FlexParentData`](trellis_ui_layout::FlexParentData).
    pub fn set_parent_data(
        &mut self,
        node: NodeId,
        data: impl Any,
    ) -> Result<(), LayoutError> {
        let data: Rc<dyn Any> = Rc::new(data);
        let target = self.node_mut(node)?;
        target.parent_data = Some(data);
        target.resolve_parent_data();
        if let Some(parent) = target.parent {
            self.request_measure(parent);
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) -> Result<(), LayoutError> {
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(());
        };
        if let Ok(parent_node) = self.node_mut(parent) {
            parent_node.children.shift_remove(&child);
        }
        let node = self.node_mut(child)?;
        node.placed = false;
        node.constraints = None;
        self.request_measure(parent);
        Ok(())
    }

    fn dispose(&mut self, node: NodeId) {
        let mut doomed = vec![node];
        let mut index = 0;
        while index < doomed.len() {
            if let Some(current) = self.nodes.get(&doomed[index]) {
                doomed.extend(current.children.iter().copied());
            }
            index += 1;
        }
        for id in &doomed {
            self.nodes.remove(id);
            self.measure_queue.shift_remove(id);
            self.layout_queue.shift_remove(id);
            self.positioned.remove(id);
        }
        if self.root.is_some_and(|root| doomed.contains(&root)) {
            self.root = None;
        }
        self.observer.clear_if(|(id, _)| doomed.contains(id));
        log::trace!("disposed {} node(s) under #{}", doomed.len(), node);
    }

    fn set_depth(&mut self, node: NodeId, depth: usize) {
        let mut stack = vec![(node, depth)];
        while let Some((id, depth)) = stack.pop() {
            if let Some(current) = self.nodes.get_mut(&id) {
                current.depth = depth;
                stack.extend(current.children.iter().map(|child| (*child, depth + 1)));
            }
        }
    }

    // ------------------------------------------------------------------
    // Dirty marking
    // ------------------------------------------------------------------

    /// Schedules `node` to be measured again in the next pass.
    pub fn mark_needs_measure(&mut self, node: NodeId) {
        if self.nodes.contains_key(&node) {
            self.request_measure(node);
        } else {
            log::warn!("mark_needs_measure on unknown node #{}", node);
        }
    }

    /// Schedules `node`'s placement block to run again in the next pass.
    pub fn mark_needs_layout(&mut self, node: NodeId) {
        if self.nodes.contains_key(&node) {
            self.request_layout(node);
        } else {
            log::warn!("mark_needs_layout on unknown node #{}", node);
        }
    }

    /// Whether a pass would do any work.
    pub fn needs_pass(&self) -> bool {
        self.runtime.has_pending_changes()
            || self.has_fresh_positioned()
            || self.measure_queue.iter().any(|id| self.is_dirty(*id, true))
            || self.layout_queue.iter().any(|id| self.is_dirty(*id, false))
    }

    fn is_dirty(&self, node: NodeId, measure: bool) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|n| if measure { n.needs_measure } else { n.needs_layout })
    }

    pub(crate) fn request_measure(&mut self, node: NodeId) {
        if let Some(target) = self.nodes.get_mut(&node) {
            target.needs_measure = true;
            target.needs_layout = true;
            self.measure_queue.insert(node);
            self.layout_queue.insert(node);
        }
    }

    pub(crate) fn request_layout(&mut self, node: NodeId) {
        if let Some(target) = self.nodes.get_mut(&node) {
            target.needs_layout = true;
            self.layout_queue.insert(node);
        }
    }

    fn apply_state_changes(&mut self) {
        let changes = self.runtime.take_changes();
        if changes.is_empty() {
            return;
        }
        let scopes = self.observer.invalidated_by(&changes);
        log::trace!(
            "{} state change(s) invalidated {} scope(s)",
            changes.len(),
            scopes.len()
        );
        for (node, phase) in scopes {
            match phase {
                Phase::Measure => self.request_measure(node),
                Phase::Layout => self.request_layout(node),
            }
        }
    }

    fn next_token(&mut self) -> MeasureToken {
        self.next_token += 1;
        self.next_token
    }

    // ------------------------------------------------------------------
    // Pass
    // ------------------------------------------------------------------

    /// Runs one measure and layout pass over the tree with the given root
    /// constraints.
    ///
    /// Dirty nodes are re-measured shallowest first with the constraints their
    /// parent last gave them; a resulting size change dirties the parent's measure
    /// when the parent measured the node in its measure block and only the parent's
    /// layout otherwise. Placed nodes that need layout are then laid out, again
    /// shallowest first.
    pub fn measure_and_layout(&mut self, constraints: Constraints) -> Result<(), LayoutError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        self.pass += 1;
        log::debug!("layout pass {} with {:?}", self.pass, constraints);
        self.apply_state_changes();

        let root_node = self.node(root)?;
        if root_node.needs_measure || root_node.constraints != Some(constraints) {
            let token = self.next_token();
            self.node_mut(root)?.measured_by = Some(token);
            self.measure_node(root, constraints)?;
        }

        let mut remeasured = 0usize;
        let mut laid_out = 0usize;
        loop {
            if let Some(node) = self.pop_pending_measure() {
                self.remeasure(node)?;
                remeasured += 1;
                continue;
            }
            if let Some(node) = self.pop_pending_layout() {
                self.layout_node(node, true)?;
                laid_out += 1;
                continue;
            }
            break;
        }
        log::debug!(
            "layout pass {} done: {} re-measured, {} relaid out",
            self.pass,
            remeasured,
            laid_out
        );
        self.dispatch_positioned();
        Ok(())
    }

    fn pop_pending_measure(&mut self) -> Option<NodeId> {
        let nodes = &self.nodes;
        let root = self.root;
        self.measure_queue.retain(|id| {
            nodes
                .get(id)
                .is_some_and(|node| node.needs_measure && node.constraints.is_some())
                && is_attached(nodes, root, *id)
        });
        let next = shallowest(nodes, &self.measure_queue)?;
        self.measure_queue.shift_remove(&next);
        Some(next)
    }

    fn pop_pending_layout(&mut self) -> Option<NodeId> {
        let nodes = &self.nodes;
        let root = self.root;
        self.layout_queue.retain(|id| {
            nodes
                .get(id)
                .is_some_and(|node| node.needs_layout && node.result.is_some())
                && is_in_placed_tree(nodes, root, *id)
        });
        let next = shallowest(nodes, &self.layout_queue)?;
        self.layout_queue.shift_remove(&next);
        Some(next)
    }

    /// Re-measures a dirty node with its previous constraints and tells the parent
    /// what changed.
    fn remeasure(&mut self, node: NodeId) -> Result<(), LayoutError> {
        let current = self.node(node)?;
        let Some(constraints) = current.constraints else {
            return Ok(());
        };
        let old_size = current.size;
        let token = self.next_token();
        self.node_mut(node)?.measured_by = Some(token);
        let size = self.measure_node(node, constraints)?;

        let current = self.node(node)?;
        let Some(parent) = current.parent else {
            return Ok(());
        };
        let size_changed = size != old_size;
        if current.lines.read_in_parent_measure || (size_changed && current.affects_parent_size) {
            log::trace!("#{} re-measured, parent #{} needs measure", node, parent);
            self.request_measure(parent);
        } else if size_changed || current.lines.read_in_parent_layout {
            log::trace!("#{} re-measured, parent #{} needs layout", node, parent);
            self.request_layout(parent);
        }
        Ok(())
    }

    /// Runs the modifier chain and the policy's measure block for `node`.
    pub(crate) fn measure_node(
        &mut self,
        node: NodeId,
        constraints: Constraints,
    ) -> Result<Size, LayoutError> {
        let target = self.node_mut(node)?;
        target.constraints = Some(constraints);
        let policy = Rc::clone(&target.policy);
        let modifiers = target.modifiers.clone();
        let measurables: SmallVec<[Measurable; 8]> =
            target.children.iter().copied().map(Measurable::new).collect();

        let mut incoming: SmallVec<[Constraints; 2]> = SmallVec::with_capacity(modifiers.len());
        let mut content_constraints = constraints;
        for modifier in &modifiers {
            incoming.push(content_constraints);
            content_constraints = modifier.modify_constraints(content_constraints);
        }

        for child in &measurables {
            if let Some(child) = self.nodes.get_mut(&child.node_id()) {
                child.lines.read_in_parent_measure = false;
            }
        }
        self.observer.begin((node, Phase::Measure));
        let token = self.next_token();
        let result = {
            let mut scope = NodeScope::new(self, node, token, token, Phase::Measure);
            policy.measure(&mut scope, &measurables, content_constraints)?
        };

        let mut size = content_constraints.constrain(result.size);
        let mut layer_offsets: SmallVec<[Position; 2]> = SmallVec::with_capacity(modifiers.len());
        for (modifier, incoming) in modifiers.iter().zip(incoming.iter()).rev() {
            let outer = incoming.constrain(modifier.modify_size(*incoming, size));
            layer_offsets.push(modifier.modify_position(size, outer));
            size = outer;
        }
        layer_offsets.reverse();
        let content_offset = layer_offsets
            .iter()
            .fold(Position::ZERO, |sum, offset| sum + *offset);

        let target = self.node_mut(node)?;
        target.result = Some(result);
        target.result_token = token;
        target.size = size;
        target.content_offset = content_offset;
        target.layer_offsets = layer_offsets;
        target.needs_measure = false;
        target.measure_count += 1;
        log::trace!(
            "measured #{} ({}) at {:?} -> {:?}, {} time(s)",
            node,
            target.policy.debug_name(),
            constraints,
            size,
            target.measure_count
        );
        self.request_layout(node);
        Ok(size)
    }

    /// Measures `child` on behalf of its parent's measure or placement block.
    ///
    /// `token` identifies the running block and `measure_token` the parent
    /// measurement it belongs to, so a child measured by the measure block cannot
    /// be measured again by the placement block of the same result.
    pub(crate) fn measure_by_parent(
        &mut self,
        child: NodeId,
        constraints: Constraints,
        token: MeasureToken,
        measure_token: MeasureToken,
        phase: Phase,
    ) -> Result<Placeable, LayoutError> {
        let target = self.node_mut(child)?;
        let again_in_block = target.measured_by == Some(token);
        let again_after_measure =
            phase == Phase::Layout && target.measured_in_parent_measure == Some(measure_token);
        if again_in_block || again_after_measure {
            return Err(LayoutError::MeasuredTwice { node: child });
        }
        target.measured_by = Some(token);
        target.measured_in_parent_measure = (phase == Phase::Measure).then_some(measure_token);
        target.affects_parent_size = phase == Phase::Measure;
        if !target.needs_measure && target.constraints == Some(constraints) {
            return Ok(Placeable::new(child, target.size));
        }
        let size = self.measure_node(child, constraints)?;
        Ok(Placeable::new(child, size))
    }

    /// Records the position of `child` and lays it out if its placement is stale.
    pub(crate) fn place_child(
        &mut self,
        child: NodeId,
        position: Position,
    ) -> Result<(), LayoutError> {
        let parent_computing = self
            .node(child)?
            .parent
            .and_then(|parent| self.nodes.get(&parent))
            .is_some_and(|parent| parent.lines.computing);
        let target = self.node_mut(child)?;
        target.position = position;
        target.placed = true;
        if target.needs_layout || (parent_computing && !target.lines.calculated) {
            self.layout_node(child, false)?;
        }
        Ok(())
    }

    /// Runs `node`'s placement block and, when required, recomputes its
    /// alignment lines.
    pub(crate) fn layout_node(
        &mut self,
        node: NodeId,
        notify_parent: bool,
    ) -> Result<(), LayoutError> {
        let pass = self.pass;
        let target = self.node(node)?;
        let Some(result) = target.result.clone() else {
            return Ok(());
        };
        let measure_token = target.result_token;
        let children: SmallVec<[NodeId; 8]> = target.children.iter().copied().collect();
        let parent_depends = target
            .parent
            .and_then(|parent| self.nodes.get(&parent))
            .is_some_and(|parent| parent.lines.computing || parent.lines.calculated);
        let required = target.lines.forced
            || target.lines.read_in_parent_measure
            || target
                .lines
                .queried_after_layout
                .is_some_and(|queried| queried + 1 >= pass)
            || parent_depends;

        let target = self.node_mut(node)?;
        let old_lines = std::mem::take(&mut target.lines.values);
        let old_calculated = target.lines.calculated;
        target.lines.calculated = false;
        target.lines.computing = required;
        for child in &children {
            if let Some(child) = self.nodes.get_mut(child) {
                child.placed = false;
                child.lines.read_in_parent_layout = false;
            }
        }

        self.observer.begin((node, Phase::Layout));
        let token = self.next_token();
        let placed = {
            let mut scope = NodeScope::new(self, node, token, measure_token, Phase::Layout);
            result.place_children(&mut scope)
        };
        if let Err(err) = placed {
            self.node_mut(node)?.lines.computing = false;
            return Err(err);
        }

        let target = self.node_mut(node)?;
        target.needs_layout = false;
        target.layout_count += 1;
        target.laid_out_pass = pass;
        target.lines.forced = false;
        log::trace!(
            "laid out #{} ({}), lines {}, {} time(s)",
            node,
            target.policy.debug_name(),
            if required { "required" } else { "skipped" },
            target.layout_count
        );

        let lines = if required {
            Some(self.compute_lines(node, &children, &result))
        } else {
            None
        };
        let target = self.node_mut(node)?;
        target.lines.computing = false;
        if let Some(lines) = lines {
            target.lines.values = lines?;
            target.lines.calculated = true;
        }
        let changed =
            old_calculated && (!target.lines.calculated || target.lines.values != old_lines);
        if changed && notify_parent {
            self.notify_lines_changed(node)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Whether `node` is reachable from the root through placed links.
    pub fn is_placed(&self, node: NodeId) -> bool {
        is_in_placed_tree(&self.nodes, self.root, node)
    }

    pub fn size_of(&self, node: NodeId) -> Option<Size> {
        self.nodes.get(&node).map(|node| node.size)
    }

    /// Position relative to the parent's content box.
    pub fn position_of(&self, node: NodeId) -> Option<Position> {
        self.nodes.get(&node).map(|node| node.position)
    }

    /// Position relative to the root's top-left corner.
    pub fn position_in_root(&self, node: NodeId) -> Option<Position> {
        let mut current = self.nodes.get(&node)?;
        if Some(node) == self.root {
            return Some(Position::ZERO);
        }
        let mut position = current.position;
        while let Some(parent) = current.parent {
            current = self.nodes.get(&parent)?;
            position += current.content_offset;
            if Some(parent) == self.root {
                return Some(position);
            }
            position += current.position;
        }
        None
    }

    /// Every placed node, parents before children, with root-relative positions.
    pub fn placed_nodes(&self) -> Vec<PlacedNode> {
        let mut placed = Vec::new();
        let Some(root) = self.root else {
            return placed;
        };
        let Some(root_node) = self.nodes.get(&root) else {
            return placed;
        };
        if root_node.result.is_none() {
            return placed;
        }
        let mut stack = vec![(root, Position::ZERO)];
        while let Some((id, position)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            placed.push(PlacedNode {
                node: id,
                size: node.size,
                position,
            });
            let origin = position + node.content_offset;
            for child in node.children.iter().rev() {
                if let Some(child_node) = self.nodes.get(child) {
                    if child_node.placed {
                        stack.push((*child, origin + child_node.position));
                    }
                }
            }
        }
        placed
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

fn shallowest(nodes: &HashMap<NodeId, LayoutNode>, queue: &OrderedSet<NodeId>) -> Option<NodeId> {
    queue
        .iter()
        .copied()
        .min_by_key(|id| nodes.get(id).map_or(usize::MAX, |node| node.depth))
}

fn is_attached(nodes: &HashMap<NodeId, LayoutNode>, root: Option<NodeId>, node: NodeId) -> bool {
    let mut current = node;
    loop {
        if Some(current) == root {
            return true;
        }
        match nodes.get(&current).and_then(|node| node.parent) {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}

fn is_in_placed_tree(
    nodes: &HashMap<NodeId, LayoutNode>,
    root: Option<NodeId>,
    node: NodeId,
) -> bool {
    let mut current = node;
    loop {
        if Some(current) == root {
            return true;
        }
        let Some(target) = nodes.get(&current) else {
            return false;
        };
        match target.parent {
            Some(parent) if target.placed => current = parent,
            _ => return false,
        }
    }
}

#[cfg(test)]
#[path = "tests/layout_tree_tests.rs"]
mod tests;
