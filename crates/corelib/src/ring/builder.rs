//! Builder for configuring and populating a ring.

use crate::error::Result;
use crate::partitioner::{Partitioner, Xxh32Partitioner};
use crate::ring::ring::HashRing;

/// Builds a [`HashRing`] with a chosen partitioner, migration policy and
/// initial membership.
///
/// ```rust
/// use corelib::ring::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .add_node("cache-1")
///     .add_node("cache-2")
///     .build()
///     .unwrap();
/// assert_eq!(ring.node_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<P: Partitioner = Xxh32Partitioner> {
    partitioner: P,
    migrate_on_add: bool,
    nodes: Vec<String>,
}

impl RingBuilder<Xxh32Partitioner> {
    pub fn new() -> Self {
        Self {
            partitioner: Xxh32Partitioner::new(),
            migrate_on_add: false,
            nodes: Vec::new(),
        }
    }
}

impl Default for RingBuilder<Xxh32Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    /// Swaps the partitioner, keeping the other settings.
    pub fn with_partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            partitioner,
            migrate_on_add: self.migrate_on_add,
            nodes: self.nodes,
        }
    }

    /// Move entries of the newly owned arc into each node as it is added.
    ///
    /// Off by default: a new node then starts empty and keys stored earlier
    /// for its arc report `KeyNotFound` until rewritten.
    pub fn migrate_on_add(mut self, enabled: bool) -> Self {
        self.migrate_on_add = enabled;
        self
    }

    pub fn add_node(mut self, id: impl Into<String>) -> Self {
        self.nodes.push(id.into());
        self
    }

    pub fn add_nodes<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Creates the ring and adds the configured nodes in order.
    ///
    /// Fails on the first node that cannot be added (empty id or position
    /// collision).
    pub fn build(self) -> Result<HashRing<P>> {
        let mut ring = HashRing::with_partitioner(self.partitioner);
        ring.set_migrate_on_add(self.migrate_on_add);
        for id in self.nodes {
            ring.add_node(id)?;
        }
        Ok(ring)
    }
}
