//! Positioned callbacks: after each pass, nodes with a callback whose root-relative
//! bounds changed, or that were just placed, are reported.

use super::{LayoutTree, PlacedNode};
use smallvec::SmallVec;
use trellis_core::NodeId;
use trellis_ui_layout::LayoutError;

pub(crate) struct PositionedHook {
    callback: Box<dyn FnMut(PlacedNode)>,
    /// Bounds delivered by the latest report; `None` until the node is placed.
    reported: Option<PlacedNode>,
    /// Installed since the latest pass.
    fresh: bool,
}

impl LayoutTree {
    /// Calls `callback` at the end of every pass in which `node` was newly placed
    /// or its size or root-relative position changed, including moves inherited
    /// from ancestors. A newly installed callback fires on the next pass even when
    /// nothing was relaid out. Replaces any previous callback of `node`.
    pub fn set_on_positioned(
        &mut self,
        node: NodeId,
        callback: impl FnMut(PlacedNode) + 'static,
    ) -> Result<(), LayoutError> {
        self.node(node)?;
        self.positioned.insert(
            node,
            PositionedHook {
                callback: Box::new(callback),
                reported: None,
                fresh: true,
            },
        );
        Ok(())
    }

    pub fn clear_on_positioned(&mut self, node: NodeId) {
        self.positioned.remove(&node);
    }

    pub(crate) fn has_fresh_positioned(&self) -> bool {
        self.positioned.values().any(|hook| hook.fresh)
    }

    /// Fires callbacks for nodes whose placed bounds differ from their latest
    /// report, shallowest first.
    pub(crate) fn dispatch_positioned(&mut self) {
        if self.positioned.is_empty() {
            return;
        }
        let mut due: SmallVec<[(usize, NodeId, Option<PlacedNode>); 8]> = SmallVec::new();
        for (id, hook) in &self.positioned {
            let current = self.placed_bounds(*id);
            if hook.fresh || current != hook.reported {
                let depth = self.nodes.get(id).map_or(usize::MAX, |node| node.depth);
                due.push((depth, *id, current));
            }
        }
        due.sort_unstable_by_key(|(depth, id, _)| (*depth, *id));

        for (_, id, current) in due {
            let Some(hook) = self.positioned.get_mut(&id) else {
                continue;
            };
            hook.fresh = false;
            hook.reported = current;
            if let Some(placed) = current {
                log::trace!("#{} positioned at {:?} size {:?}", id, placed.position, placed.size);
                (hook.callback)(placed);
            }
        }
    }

    fn placed_bounds(&self, node: NodeId) -> Option<PlacedNode> {
        if !self.is_placed(node) {
            return None;
        }
        let target = self.nodes.get(&node)?;
        target.result.as_ref()?;
        Some(PlacedNode {
            node,
            size: target.size,
            position: self.position_in_root(node)?,
        })
    }
}
