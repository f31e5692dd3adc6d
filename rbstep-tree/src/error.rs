//! Errors surfaced to callers of the tree engine.

use crate::node::{NodeId, Side};

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur when operating on a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node lacks the child a rotation in this direction needs.
    #[error("cannot rotate node {node} {side}: it has no {} child", .side.opposite())]
    InvalidRotation { node: NodeId, side: Side },

    #[error("node {0} is not in this tree")]
    UnknownNode(NodeId),
}
