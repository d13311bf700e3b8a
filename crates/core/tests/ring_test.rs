//! Tests for ring and finger-table construction.
//!
//! # Test Strategy
//!
//! 1. **Configuration errors**: empty ring, bad bit lengths, collisions
//! 2. **Ring shape**: ordering, successor links, wrap-around
//! 3. **Finger tables**: entry count, starts, owners
//! 4. **Determinism**: rebuilding yields the same ring

mod common;

use chord_core::{
    Error, FingerAlgorithm, Identifier, IdentifierSpace, NodeIndex, Peer, Ring, RingBuilder,
    Topology, Xxh3Hasher,
};
use common::FixedHasher;
use std::sync::Arc;

fn xxh3_ring(bits: u32, nodes: usize) -> Ring {
    let space = IdentifierSpace::new(bits).unwrap();
    RingBuilder::new(Xxh3Hasher::new(space))
        .numbered(nodes)
        .build()
        .unwrap()
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_zero_bits_is_a_configuration_error() {
    let err = IdentifierSpace::new(0).unwrap_err();
    assert_eq!(err, Error::InvalidBitLength(0));
    assert!(err.is_configuration());
}

#[test]
fn test_empty_topology_is_rejected() {
    let space = IdentifierSpace::new(8).unwrap();
    let result = Ring::from_topology(Topology::new(), Arc::new(Xxh3Hasher::new(space)));
    assert_eq!(result.unwrap_err(), Error::EmptyRing);
}

#[test]
fn test_identifier_collision_names_both_nodes() {
    let hasher = FixedHasher::new(4, &[("a", 7), ("b", 7), ("c", 2)]);
    let result = RingBuilder::new(hasher).add_nodes(["a", "b", "c"]).build();
    match result {
        Err(Error::IdentifierCollision { first, second, id }) => {
            let mut names = vec![first, second];
            names.sort();
            assert_eq!(names, vec!["a", "b"]);
            assert_eq!(id, Identifier(7));
        }
        other => panic!("expected a collision, got {:?}", other),
    }
}

// ============================================================================
// Ring Shape
// ============================================================================

#[test]
fn test_scenario_ring_successors() {
    let hasher = FixedHasher::new(3, &[("n0", 0), ("n3", 3), ("n5", 5)]);
    let ring = RingBuilder::new(hasher)
        .add_nodes(["n5", "n0", "n3"])
        .build()
        .unwrap();

    let successor_id = |name: &str| {
        let index = ring.index_of(name).unwrap();
        ring.node(ring.successor(index)).id()
    };
    assert_eq!(successor_id("n0"), Identifier(3));
    assert_eq!(successor_id("n3"), Identifier(5));
    assert_eq!(successor_id("n5"), Identifier(0));
    assert_eq!(ring.to_string(), "n0 --- n3 --- n5 --- n0");
}

#[test]
fn test_ownership_with_wrap_around() {
    let hasher = FixedHasher::new(3, &[("n0", 0), ("n3", 3), ("n5", 5)]);
    let ring = RingBuilder::new(hasher)
        .add_nodes(["n0", "n3", "n5"])
        .build()
        .unwrap();

    let owner = |id: u64| ring.node(ring.owner_of(Identifier(id))).name().to_string();
    assert_eq!(owner(4), "n5");
    assert_eq!(owner(6), "n0");
    assert_eq!(owner(7), "n0");
    assert_eq!(owner(0), "n0");
    assert_eq!(owner(3), "n3");

    for index in ring.indices() {
        for id in 0..8 {
            let id = Identifier(id);
            assert_eq!(ring.owned_range(index).contains(id), ring.owner_of(id) == index);
        }
    }
}

#[test]
fn test_successor_walk_returns_home() {
    let ring = xxh3_ring(32, 30);
    for start in ring.indices() {
        let mut current = start;
        for _ in 0..ring.len() {
            current = ring.successor(current);
        }
        assert_eq!(current, start);
    }
}

#[test]
fn test_identifiers_distinct_and_in_range() {
    let ring = xxh3_ring(20, 50);
    let space = ring.space();
    let mut ids: Vec<Identifier> = ring.nodes().iter().map(|n| n.id()).collect();
    assert!(ids.iter().all(|id| space.contains(*id)));
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

// ============================================================================
// Finger Tables
// ============================================================================

#[test]
fn test_scenario_finger_tables() {
    let hasher = FixedHasher::new(3, &[("n0", 0), ("n3", 3), ("n5", 5)]);
    let mut ring = RingBuilder::new(hasher)
        .add_nodes(["n0", "n3", "n5"])
        .build()
        .unwrap();
    ring.build_finger_tables(FingerAlgorithm::SuccessorWalk).unwrap();

    let table = |name: &str| -> Vec<(u64, String)> {
        let node = ring.node(ring.index_of(name).unwrap());
        node.routing_table()
            .iter()
            .map(|e| (e.start().value(), ring.node(e.node()).name().to_string()))
            .collect()
    };
    assert_eq!(
        table("n0"),
        vec![(1, "n3".into()), (2, "n3".into()), (4, "n5".into())]
    );
    assert_eq!(
        table("n3"),
        vec![(4, "n5".into()), (5, "n5".into()), (7, "n0".into())]
    );
    assert_eq!(
        table("n5"),
        vec![(6, "n0".into()), (7, "n0".into()), (1, "n3".into())]
    );
}

#[test]
fn test_single_node_fingers_point_home() {
    let mut ring = xxh3_ring(8, 1);
    ring.build_finger_tables(FingerAlgorithm::SuccessorWalk).unwrap();
    let node = ring.node(NodeIndex(0));
    assert_eq!(node.routing_table().len(), 8);
    assert!(node.routing_table().iter().all(|e| e.node() == NodeIndex(0)));
}

#[test]
fn test_network_dump_lists_every_node() {
    let mut ring = xxh3_ring(16, 4);
    ring.build_finger_tables(FingerAlgorithm::Search).unwrap();
    let dump = ring.network().to_string();
    for node in ring.nodes() {
        assert!(dump.contains(&format!("{} (id {})", node.name(), node.id())));
    }
    assert_eq!(dump.matches("fingers:").count(), 4);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_rebuild_is_idempotent() {
    let build = || {
        let mut ring = xxh3_ring(24, 12);
        ring.build_finger_tables(FingerAlgorithm::Search).unwrap();
        ring
    };
    let first = build();
    let second = build();

    for (a, b) in first.nodes().iter().zip(second.nodes()) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.id(), b.id());
        assert_eq!(a.successor(), b.successor());
        assert_eq!(a.routing_table(), b.routing_table());
    }
}
