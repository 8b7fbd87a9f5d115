use thiserror::Error;
use trellis_core::NodeId;

/// Errors raised while measuring or placing a layout tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("node #{node} was measured more than once by the same measure or layout block")]
    MeasuredTwice { node: NodeId },
    #[error("node #{child} is not a child of node #{parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("node #{node} does not exist in the layout tree")]
    MissingNode { node: NodeId },
}
