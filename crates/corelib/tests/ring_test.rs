//! Tests for the hash ring implementation.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup, remove
//! 2. **Placement**: Successor rule, wraparound, hand-laid scenarios
//! 3. **Migration**: Removal merges, optional migration on add
//! 4. **Edge cases**: Single node, last node, duplicates, unknown nodes
//! 5. **Reporting**: Topology snapshots

mod common;

use common::{labelled_ring, server_ring, Labelled};
use corelib::token::Token32;
use corelib::{Error, HashRing, NodeId, RingBuilder};

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring_lookup() {
    let ring = HashRing::new();
    assert!(ring.is_empty());
    assert_eq!(ring.node_count(), 0);
    assert!(matches!(ring.get_node("key1"), Err(Error::EmptyRing)));
    assert_eq!(ring.resolve(Token32(1)), Err(Error::EmptyRing));
    assert_eq!(ring.retrieve_key("x"), Err(Error::EmptyRing));
}

#[test]
fn test_store_on_empty_ring_fails() {
    let ring = HashRing::new();
    assert_eq!(ring.store_key("k", "v"), Err(Error::EmptyRing));
}

#[test]
fn test_add_node_and_lookup() {
    let ring = HashRing::new();
    let position = ring.add_node("node1").unwrap();

    assert_eq!(ring.node_count(), 1);
    assert!(ring.contains_node("node1"));
    assert_eq!(position, ring.token_for("node1"));

    let node = ring.get_node("test-key").unwrap();
    assert_eq!(node.id(), "node1");
    assert_eq!(node.position(), position);
}

#[test]
fn test_store_then_retrieve() {
    let ring = server_ring(5);
    assert_eq!(ring.store_key("alpha", "1").unwrap(), None);
    assert_eq!(ring.store_key("beta", "2").unwrap(), None);
    assert_eq!(ring.retrieve_key("alpha").unwrap(), "1");
    assert_eq!(ring.retrieve_key("beta").unwrap(), "2");

    // Overwrite returns the old value.
    assert_eq!(ring.store_key("alpha", "3").unwrap(), Some("1".to_string()));
    assert_eq!(ring.retrieve_key("alpha").unwrap(), "3");
}

#[test]
fn test_missing_key_names_owner() {
    let ring = server_ring(3);
    let owner = ring.get_node("never-stored").unwrap().id().clone();
    assert_eq!(
        ring.retrieve_key("never-stored"),
        Err(Error::KeyNotFound {
            key: "never-stored".into(),
            node: owner,
        })
    );
}

#[test]
fn test_remove_node() {
    let ring = HashRing::new();
    ring.add_node("node1").unwrap();
    ring.add_node("node2").unwrap();

    let removal = ring.remove_node("node1").unwrap();
    assert_eq!(removal.id, NodeId::from("node1"));
    assert_eq!(removal.successor, Some(NodeId::from("node2")));
    assert_eq!(ring.node_count(), 1);

    assert_eq!(ring.get_node("some-key").unwrap().id(), "node2");
    assert!(!ring.contains_node("node1"));
    assert!(ring.contains_node("node2"));

    // Removing a node that is not there is reported.
    assert_eq!(
        ring.remove_node("node999"),
        Err(Error::UnknownNode(NodeId::from("node999")))
    );
    assert_eq!(ring.node_count(), 1);
}

#[test]
fn test_consistent_lookup() {
    let ring = server_ring(10);
    let first = ring.get_node("consistent-key").unwrap().id().clone();
    for _ in 0..5 {
        assert_eq!(ring.get_node("consistent-key").unwrap().id(), &first);
    }
}

// ============================================================================
// Placement Tests
// ============================================================================

#[test]
fn test_node_resolves_its_own_position() {
    let ring = server_ring(20);
    for i in 1..=20 {
        let id = format!("Server{i}");
        let position = ring.token_for(&id);
        assert_eq!(ring.resolve(position).unwrap(), position);
        assert_eq!(ring.get_node(&id).unwrap().id(), id.as_str());
    }
}

#[test]
fn test_scenario_ten_fifty_ninety() {
    let ring = labelled_ring(&["n10", "n50", "n90"]);
    ring.store_key("k45", "value").unwrap();
    assert_eq!(ring.get_node("k45").unwrap().id(), "n50");

    let removal = ring.remove_node("n50").unwrap();
    assert_eq!(removal.successor, Some(NodeId::from("n90")));
    assert_eq!(removal.migrated, 1);

    assert_eq!(ring.get_node("k45").unwrap().id(), "n90");
    assert_eq!(ring.retrieve_key("k45").unwrap(), "value");
}

#[test]
fn test_wraparound() {
    let ring = labelled_ring(&["n10", "n50", "n90"]);
    assert_eq!(ring.get_node("k91").unwrap().id(), "n10");
    assert_eq!(ring.get_node("k4000000000").unwrap().id(), "n10");
    assert_eq!(ring.get_node("k0").unwrap().id(), "n10");
}

#[test]
fn test_store_lands_on_owner() {
    let ring = labelled_ring(&["n10", "n50", "n90"]);
    ring.store_key("k95", "v").unwrap();

    let owner = ring.get_node("k95").unwrap();
    assert_eq!(owner.id(), "n10");
    assert!(owner.contains_key("k95"));
    drop(owner);

    let topology = ring.list_nodes();
    assert_eq!(topology.get("n10").map(|n| n.key_count), Some(1));
    assert_eq!(topology.get("n50").map(|n| n.key_count), Some(0));
    assert_eq!(topology.get("n90").map(|n| n.key_count), Some(0));
    assert_eq!(ring.retrieve_key("k95").unwrap(), "v");
}

#[test]
fn test_add_takes_over_only_its_arc() {
    let ring = labelled_ring(&["n10", "n90"]);
    ring.add_node("n50").unwrap();

    assert_eq!(ring.get_node("k30").unwrap().id(), "n50");
    assert_eq!(ring.get_node("k50").unwrap().id(), "n50");
    assert_eq!(ring.get_node("k51").unwrap().id(), "n90");
    assert_eq!(ring.get_node("k5").unwrap().id(), "n10");
}

// ============================================================================
// Migration Tests
// ============================================================================

#[test]
fn test_removal_moves_every_entry() {
    let ring = labelled_ring(&["n10", "n50", "n90"]);
    for key in ["k11", "k20", "k49", "k50"] {
        ring.store_key(key, format!("v-{key}")).unwrap();
    }
    ring.store_key("k70", "stays").unwrap();

    let removal = ring.remove_node("n50").unwrap();
    assert_eq!(removal.migrated, 4);
    assert_eq!(removal.overwritten, 0);
    assert_eq!(removal.dropped, 0);

    let n90 = ring.get_node("k70").unwrap();
    assert_eq!(n90.len(), 5);
    drop(n90);

    for key in ["k11", "k20", "k49", "k50"] {
        assert_eq!(ring.retrieve_key(key).unwrap(), format!("v-{key}"));
    }
}

#[test]
fn test_add_without_migration_hides_old_entries() {
    let ring = labelled_ring(&["n10", "n90"]);
    ring.store_key("k45", "v").unwrap();

    ring.add_node("n50").unwrap();
    assert_eq!(
        ring.retrieve_key("k45"),
        Err(Error::KeyNotFound {
            key: "k45".into(),
            node: NodeId::from("n50"),
        })
    );

    // The entry is still physically on n90 and comes back once n50 leaves.
    ring.remove_node("n50").unwrap();
    assert_eq!(ring.retrieve_key("k45").unwrap(), "v");
}

#[test]
fn test_add_with_migration_keeps_entries_reachable() {
    let ring = RingBuilder::new()
        .with_partitioner(Labelled)
        .migrate_on_add(true)
        .add_nodes(["n10", "n90"])
        .build()
        .unwrap();
    for key in ["k5", "k45", "k89", "k95"] {
        ring.store_key(key, key).unwrap();
    }

    ring.add_node("n50").unwrap();
    for key in ["k5", "k45", "k89", "k95"] {
        assert_eq!(ring.retrieve_key(key).unwrap(), key);
    }
    assert_eq!(ring.list_nodes().get("n50").map(|n| n.key_count), Some(1));
}

#[test]
fn test_removed_value_wins_on_collision() {
    let ring = labelled_ring(&["n10", "n50", "n90"]);
    ring.store_key("k45", "from-n50").unwrap();

    // Plant a stale copy of the same key on n90 by routing around n50.
    ring.remove_node("n50").unwrap();
    ring.store_key("k45", "stale").unwrap();
    ring.add_node("n50").unwrap();
    ring.store_key("k45", "fresh").unwrap();

    let removal = ring.remove_node("n50").unwrap();
    assert_eq!(removal.overwritten, 1);
    assert_eq!(ring.retrieve_key("k45").unwrap(), "fresh");
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_single_node() {
    let ring = HashRing::new();
    ring.add_node("node1").unwrap();
    for key in ["key1", "key2", "key3", "very-long-key-name"] {
        assert_eq!(ring.get_node(key).unwrap().id(), "node1");
    }
    assert!(ring.arc_of("node1").unwrap().is_full());
}

#[test]
fn test_remove_down_to_empty() {
    let ring = server_ring(4);
    for i in 0..100 {
        ring.store_key(&format!("key-{i}"), "v").unwrap();
    }
    for i in 1..=3 {
        ring.remove_node(&format!("Server{i}")).unwrap();
    }
    assert_eq!(ring.list_nodes().total_keys(), 100);

    let last = ring.remove_node("Server4").unwrap();
    assert_eq!(last.successor, None);
    assert_eq!(last.dropped, 100);

    assert!(ring.is_empty());
    assert_eq!(ring.retrieve_key("key-1"), Err(Error::EmptyRing));
    assert!(matches!(ring.get_node("key-1"), Err(Error::EmptyRing)));
}

#[test]
fn test_add_remove_add() {
    let ring = HashRing::new();
    ring.add_node("node1").unwrap();
    ring.remove_node("node1").unwrap();
    assert_eq!(ring.node_count(), 0);

    ring.add_node("node1").unwrap();
    assert_eq!(ring.node_count(), 1);
    assert!(ring.get_node("key").is_ok());
}

#[test]
fn test_duplicate_add_is_rejected() {
    let ring = HashRing::new();
    let position = ring.add_node("node1").unwrap();
    ring.store_key("k", "v").unwrap();

    assert_eq!(
        ring.add_node("node1"),
        Err(Error::DuplicateNodePosition {
            id: NodeId::from("node1"),
            existing: NodeId::from("node1"),
            position: u64::from(position.0),
        })
    );
    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.retrieve_key("k").unwrap(), "v");
}

#[test]
fn test_empty_id_is_rejected() {
    let ring = HashRing::new();
    assert!(matches!(ring.add_node(""), Err(Error::InvalidNode(_))));
    assert!(ring.is_empty());
}

// ============================================================================
// Reporting Tests
// ============================================================================

#[test]
fn test_list_nodes_in_position_order() {
    let ring = labelled_ring(&["n90", "n10", "n50"]);
    ring.store_key("k45", "a").unwrap();
    ring.store_key("k46", "b").unwrap();
    ring.store_key("k95", "c").unwrap();

    let topology = ring.list_nodes();
    assert_eq!(topology.partitioner, "Labelled");
    let rows: Vec<(&str, u64, usize)> = topology
        .iter()
        .map(|n| (n.id.as_str(), n.position, n.key_count))
        .collect();
    assert_eq!(rows, vec![("n10", 10, 1), ("n50", 50, 2), ("n90", 90, 0)]);
}

#[test]
fn test_ownership_sums_to_one() {
    let ring = server_ring(50);
    let total: f64 = ring.list_nodes().iter().map(|n| n.ownership).sum();
    assert!((total - 1.0).abs() < 1e-9, "ownership sums to {total}");
}

#[test]
fn test_topology_serializes() {
    let ring = labelled_ring(&["n10"]);
    let json = serde_json::to_value(ring.list_nodes()).unwrap();
    assert_eq!(json["partitioner"], "Labelled");
    assert_eq!(json["nodes"][0]["id"], "n10");
    assert_eq!(json["nodes"][0]["position"], 10);
    assert_eq!(json["nodes"][0]["ownership"], 1.0);
}

#[test]
fn test_partitioner_name() {
    let ring = HashRing::new();
    assert_eq!(ring.partitioner_name(), "Xxh32Partitioner");
}
