//! Hash ring data structure.
//!
//! Nodes are kept in a vector sorted by position, so the coordinate list and
//! the position-to-node mapping are one structure and can never disagree.
//! Lookups binary-search that vector under a shared lock; membership changes
//! take the lock exclusively.

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::node::{Node, NodeId};
use crate::partitioner::{Partitioner, Xxh32Partitioner};
use crate::ring::range::TokenRange;
use crate::token::Token;
use crate::topology::{NodeSummary, Topology};

/// Scoped access to the node owning a key.
///
/// Holds the ring's shared lock: the node cannot be removed, and its entries
/// cannot be migrated, until the guard is dropped. Calling a mutating ring
/// method on the same thread while holding a guard deadlocks.
pub type NodeGuard<'a, T> = MappedRwLockReadGuard<'a, Node<T>>;

/// Report of a successful [`HashRing::remove_node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<T: Token> {
    /// The node that left the ring.
    pub id: NodeId,
    /// Its former position.
    pub position: T,
    /// The node that inherited its arc and entries, `None` if the ring is
    /// now empty.
    pub successor: Option<NodeId>,
    /// Entries copied into the successor.
    pub migrated: usize,
    /// Successor entries replaced by an incoming entry with the same key.
    pub overwritten: usize,
    /// Entries discarded because no node was left to take them.
    pub dropped: usize,
}

#[derive(Debug)]
struct RingState<T: Token> {
    /// Sorted ascending by position, no two nodes share a position.
    nodes: Vec<Node<T>>,
}

impl<T: Token> RingState<T> {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Index of the node owning `token`: the first position `>= token`,
    /// wrapping to the smallest.
    fn successor_index(&self, token: T) -> Option<usize> {
        if self.nodes.is_empty() {
            return None;
        }
        let idx = self.nodes.partition_point(|n| n.position() < token);
        Some(if idx == self.nodes.len() { 0 } else { idx })
    }

    fn index_of(&self, position: T) -> std::result::Result<usize, usize> {
        self.nodes.binary_search_by_key(&position, |n| n.position())
    }

    fn predecessor_index(&self, idx: usize) -> usize {
        (idx + self.nodes.len() - 1) % self.nodes.len()
    }

    fn arc_at(&self, idx: usize) -> TokenRange<T> {
        let pred = self.predecessor_index(idx);
        TokenRange::new(self.nodes[pred].position(), self.nodes[idx].position())
    }
}

/// Consistent hash ring with one position per node.
///
/// Generic over the [`Partitioner`] that places nodes and keys; defaults to
/// 32-bit xxHash. The ring is `Send + Sync` and meant to be shared (by
/// reference or `Arc`) between threads.
#[derive(Debug)]
pub struct HashRing<P: Partitioner = Xxh32Partitioner> {
    partitioner: P,
    migrate_on_add: bool,
    state: RwLock<RingState<P::TokenType>>,
}

impl HashRing<Xxh32Partitioner> {
    /// Creates an empty ring with the default partitioner.
    pub fn new() -> Self {
        Self::with_partitioner(Xxh32Partitioner::new())
    }
}

impl Default for HashRing<Xxh32Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> HashRing<P> {
    /// Creates an empty ring placing nodes and keys with `partitioner`.
    pub fn with_partitioner(partitioner: P) -> Self {
        Self {
            partitioner,
            migrate_on_add: false,
            state: RwLock::new(RingState::new()),
        }
    }

    pub(crate) fn set_migrate_on_add(&mut self, enabled: bool) {
        self.migrate_on_add = enabled;
    }

    /// Whether entries are moved to a newly added node.
    pub fn migrates_on_add(&self) -> bool {
        self.migrate_on_add
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    /// Hash-space coordinate of `key` (or of a node ID).
    pub fn token_for(&self, key: &str) -> P::TokenType {
        self.partitioner.partition(key.as_bytes())
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Places a node at `hash(id)` and returns that position.
    ///
    /// The new node takes over the arc between its predecessor and itself.
    /// Entries already stored for that arc stay where they are unless the
    /// ring was built with migration on add.
    pub fn add_node(&self, id: impl Into<String>) -> Result<P::TokenType> {
        let id: String = id.into();
        if id.is_empty() {
            return Err(Error::InvalidNode("node id must not be empty".into()));
        }
        let position = self.token_for(&id);

        let mut state = self.state.write();
        let idx = match state.index_of(position) {
            Ok(existing) => {
                let existing = state.nodes[existing].id().clone();
                warn!(node = %id, %existing, %position, "rejected add: position taken");
                return Err(Error::DuplicateNodePosition {
                    id: NodeId::from(id),
                    existing,
                    position: position.as_u64(),
                });
            }
            Err(idx) => idx,
        };
        state.nodes.insert(idx, Node::new(NodeId::from(id), position));
        debug!(
            node = %state.nodes[idx].id(),
            %position,
            nodes = state.nodes.len(),
            "added node to ring"
        );

        if self.migrate_on_add && state.nodes.len() > 1 {
            let succ = (idx + 1) % state.nodes.len();
            let arc = state.arc_at(idx);
            let partitioner = &self.partitioner;
            let taken = state.nodes[succ]
                .take_where(|key| arc.contains(partitioner.partition(key.as_bytes())));
            if !taken.is_empty() {
                let stats = state.nodes[idx].absorb(taken);
                debug!(
                    from = %state.nodes[succ].id(),
                    to = %state.nodes[idx].id(),
                    moved = stats.moved,
                    "migrated entries to new node"
                );
            }
        }

        Ok(position)
    }

    /// Removes the node with `id`, merging its entries into its successor.
    ///
    /// On key collision the removed node's value replaces the successor's,
    /// so every entry reachable before the removal stays reachable with the
    /// same value. Removing the last node discards its entries.
    pub fn remove_node(&self, id: &str) -> Result<Removal<P::TokenType>> {
        let position = self.token_for(id);

        let mut state = self.state.write();
        let idx = match state.index_of(position) {
            Ok(idx) if state.nodes[idx].id() == id => idx,
            _ => {
                debug!(node = id, "remove requested for unknown node");
                return Err(Error::UnknownNode(NodeId::from(id)));
            }
        };

        let mut removed = state.nodes.remove(idx);
        let entries = removed.drain();

        let Some(succ) = state.successor_index(position) else {
            if !entries.is_empty() {
                warn!(node = id, dropped = entries.len(), "removed last node, entries dropped");
            }
            return Ok(Removal {
                id: removed.id().clone(),
                position,
                successor: None,
                migrated: 0,
                overwritten: 0,
                dropped: entries.len(),
            });
        };

        let stats = state.nodes[succ].absorb(entries);
        let successor = state.nodes[succ].id().clone();
        debug!(
            node = id,
            %successor,
            migrated = stats.moved,
            overwritten = stats.overwritten,
            "removed node from ring"
        );

        Ok(Removal {
            id: removed.id().clone(),
            position,
            successor: Some(successor),
            migrated: stats.moved,
            overwritten: stats.overwritten,
            dropped: 0,
        })
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Position of the node owning `token`.
    pub fn resolve(&self, token: P::TokenType) -> Result<P::TokenType> {
        let state = self.state.read();
        state
            .successor_index(token)
            .map(|idx| state.nodes[idx].position())
            .ok_or(Error::EmptyRing)
    }

    /// Guarded access to the node owning `key`.
    pub fn get_node(&self, key: &str) -> Result<NodeGuard<'_, P::TokenType>> {
        let token = self.token_for(key);
        RwLockReadGuard::try_map(self.state.read(), |state| {
            state.successor_index(token).map(|idx| &state.nodes[idx])
        })
        .map_err(|_| Error::EmptyRing)
    }

    /// Arc of hash space currently owned by node `id`.
    pub fn arc_of(&self, id: &str) -> Result<TokenRange<P::TokenType>> {
        let position = self.token_for(id);
        let state = self.state.read();
        match state.index_of(position) {
            Ok(idx) if state.nodes[idx].id() == id => Ok(state.arc_at(idx)),
            _ => Err(Error::UnknownNode(NodeId::from(id))),
        }
    }

    // ------------------------------------------------------------------
    // Client operations
    // ------------------------------------------------------------------

    /// Writes `value` under `key` on the owning node, returning the value it
    /// replaced there.
    pub fn store_key(&self, key: &str, value: impl Into<String>) -> Result<Option<String>> {
        let node = self.get_node(key)?;
        Ok(node.insert(key.to_owned(), value.into()))
    }

    /// Reads `key` from the owning node.
    pub fn retrieve_key(&self, key: &str) -> Result<String> {
        let node = self.get_node(key)?;
        node.get(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_owned(),
            node: node.id().clone(),
        })
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Snapshot of every node in position order with its key count.
    pub fn list_nodes(&self) -> Topology {
        let state = self.state.read();
        let nodes = (0..state.nodes.len())
            .map(|idx| {
                let node = &state.nodes[idx];
                NodeSummary {
                    id: node.id().clone(),
                    position: node.position().as_u64(),
                    key_count: node.len(),
                    ownership: state.arc_at(idx).fraction(),
                }
            })
            .collect();
        Topology {
            partitioner: self.partitioner.name(),
            nodes,
        }
    }

    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().nodes.is_empty()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        let position = self.token_for(id);
        let state = self.state.read();
        matches!(state.index_of(position), Ok(idx) if state.nodes[idx].id() == id)
    }
}
