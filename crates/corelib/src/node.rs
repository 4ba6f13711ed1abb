//! Node abstractions for the consistent hash ring.
//!
//! A node is a named participant placed at one coordinate, holding the
//! entries whose keys fall into its arc. Nodes are created and destroyed by
//! the ring and are only ever reached through a ring guard.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use serde::Serialize;

use crate::token::Token;

/// Identifier of a node on the ring.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Outcome of merging one store into another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MergeStats {
    pub moved: usize,
    pub overwritten: usize,
}

/// Logical node participating in the ring.
///
/// The store has its own lock so concurrent writers to the same node are
/// serialized, while the ring's shared lock (held by every guard that can
/// reach a node) keeps membership changes out.
///
/// A handle from [`HashRing::get_node`](crate::HashRing::get_node) is
/// read-only. Entries are written through
/// [`HashRing::store_key`](crate::HashRing::store_key), which always picks
/// the owner of the key:
///
/// ```compile_fail
/// use corelib::HashRing;
///
/// let ring = HashRing::new();
/// ring.add_node("a").unwrap();
/// ring.get_node("k1").unwrap().insert("k2".into(), "v".into());
/// ```
#[derive(Debug)]
pub struct Node<T: Token> {
    id: NodeId,
    position: T,
    store: RwLock<HashMap<String, String>>,
}

impl<T: Token> Node<T> {
    pub(crate) fn new(id: NodeId, position: T) -> Self {
        Self {
            id,
            position,
            store: RwLock::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Coordinate of this node, `hash(id)`.
    pub fn position(&self) -> T {
        self.position
    }

    /// Returns a copy of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.store.read().contains_key(key)
    }

    /// Number of entries held locally.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Writes `value` under `key`, returning the value it replaced.
    pub(crate) fn insert(&self, key: String, value: String) -> Option<String> {
        self.store.write().insert(key, value)
    }

    /// Removes and returns every entry.
    pub(crate) fn drain(&mut self) -> HashMap<String, String> {
        std::mem::take(self.store.get_mut())
    }

    /// Removes and returns the entries whose key satisfies `pred`.
    pub(crate) fn take_where<F>(&mut self, mut pred: F) -> HashMap<String, String>
    where
        F: FnMut(&str) -> bool,
    {
        let store = self.store.get_mut();
        let keys: Vec<String> = store.keys().filter(|k| pred(k.as_str())).cloned().collect();
        keys.into_iter()
            .filter_map(|k| store.remove_entry(&k))
            .collect()
    }

    /// Bulk-copies `entries` into this node. Incoming values win on collision.
    pub(crate) fn absorb(&mut self, entries: HashMap<String, String>) -> MergeStats {
        let store = self.store.get_mut();
        let mut stats = MergeStats::default();
        for (key, value) in entries {
            if store.insert(key, value).is_some() {
                stats.overwritten += 1;
            }
            stats.moved += 1;
        }
        stats
    }
}
