use super::node::LayoutNode;
use super::LayoutTree;
use smallvec::SmallVec;
use std::any::Any;
use trellis_core::NodeId;
use trellis_ui_layout::{policy_intrinsic, IntPx, IntrinsicKind, IntrinsicScope, Measurable};

impl LayoutTree {
    /// Intrinsic size of `node` through its modifier chain and policy.
    ///
    /// Read-only: nothing measured or placed is touched.
    pub fn intrinsic_size(&self, node: NodeId, kind: IntrinsicKind) -> IntPx {
        match self.nodes.get(&node) {
            Some(target) => self.layer_intrinsic(target, 0, kind),
            None => {
                log::warn!("intrinsic {:?} of unknown node #{}", kind, node);
                IntPx::ZERO
            }
        }
    }

    fn layer_intrinsic(&self, node: &LayoutNode, layer: usize, kind: IntrinsicKind) -> IntPx {
        match node.modifiers.get(layer) {
            Some(modifier) => {
                modifier.intrinsic(kind, &|kind| self.layer_intrinsic(node, layer + 1, kind))
            }
            None => {
                let measurables: SmallVec<[Measurable; 8]> =
                    node.children.iter().copied().map(Measurable::new).collect();
                policy_intrinsic(&*node.policy, self, &measurables, kind)
            }
        }
    }
}

impl IntrinsicScope for LayoutTree {
    fn min_intrinsic_width(&self, measurable: Measurable, height: IntPx) -> IntPx {
        self.intrinsic_size(measurable.node_id(), IntrinsicKind::MinWidth(height))
    }

    fn max_intrinsic_width(&self, measurable: Measurable, height: IntPx) -> IntPx {
        self.intrinsic_size(measurable.node_id(), IntrinsicKind::MaxWidth(height))
    }

    fn min_intrinsic_height(&self, measurable: Measurable, width: IntPx) -> IntPx {
        self.intrinsic_size(measurable.node_id(), IntrinsicKind::MinHeight(width))
    }

    fn max_intrinsic_height(&self, measurable: Measurable, width: IntPx) -> IntPx {
        self.intrinsic_size(measurable.node_id(), IntrinsicKind::MaxHeight(width))
    }

    fn parent_data(&self, measurable: Measurable) -> Option<&dyn Any> {
        self.nodes
            .get(&measurable.node_id())?
            .resolved_parent_data
            .as_deref()
    }
}
