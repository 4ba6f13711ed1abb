//! Error types for the core library.

use crate::node::NodeId;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// None of these are fatal: the ring keeps its invariants after every failed
/// operation and the caller decides what to do next.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lookup was attempted on a ring with no nodes.
    #[error("ring has no nodes")]
    EmptyRing,

    /// The key resolved to a node that holds no entry for it.
    #[error("key {key:?} not found at node {node}")]
    KeyNotFound {
        /// The key that was looked up.
        key: String,
        /// The node that currently owns the key's coordinate.
        node: NodeId,
    },

    /// Two node IDs hash to the same coordinate. The later add is rejected.
    #[error("node {id} collides with node {existing} at position {position}")]
    DuplicateNodePosition {
        /// The node that was being added.
        id: NodeId,
        /// The node already occupying the coordinate.
        existing: NodeId,
        /// The contested coordinate.
        position: u64,
    },

    /// Removal was requested for a node that is not on the ring.
    #[error("node {0} is not on the ring")]
    UnknownNode(NodeId),

    /// Invalid node configuration
    #[error("invalid node: {0}")]
    InvalidNode(String),
}
