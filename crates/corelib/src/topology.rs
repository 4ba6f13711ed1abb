//! Ring topology snapshots.
//!
//! A [`Topology`] is a point-in-time, lock-free copy of the ring's
//! membership: node IDs in position order with their key counts and share of
//! the hash space. Reporting code works from it without holding ring locks.

use serde::Serialize;

use crate::node::NodeId;

/// One node's entry in a [`Topology`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub id: NodeId,
    /// Position on the ring, widened to `u64`.
    pub position: u64,
    /// Entries currently held by the node.
    pub key_count: usize,
    /// Fraction of the hash space the node owns.
    pub ownership: f64,
}

/// Snapshot of the ring returned by `HashRing::list_nodes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topology {
    /// Name of the partitioner that placed the nodes.
    pub partitioner: &'static str,
    /// Nodes in ascending position order.
    pub nodes: Vec<NodeSummary>,
}

impl Topology {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total entries across all nodes.
    pub fn total_keys(&self) -> usize {
        self.nodes.iter().map(|n| n.key_count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeSummary> {
        self.nodes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&NodeSummary> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
