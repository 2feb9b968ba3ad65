//! Error type shared by graph construction, configuration and I/O.

use crate::graph::NodeId;
use thiserror::Error;

/// Errors raised before a run starts, or by reporters while it runs.
///
/// The swap engine itself never fails: a node without an acceptable
/// partner simply skips its swap for the round.
#[derive(Debug, Error)]
pub enum JabejaError {
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("node {node} lists unknown neighbor {neighbor}")]
    UnknownNeighbor { node: NodeId, neighbor: NodeId },

    #[error("node {0} lists itself as a neighbor")]
    SelfLoop(NodeId),

    #[error("asymmetric adjacency: {from} -> {to} has no reverse edge")]
    AsymmetricEdge { from: NodeId, to: NodeId },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("graph parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JabejaError>;
