//! Property-based tests for ring construction and routing.

mod common;

use chord_core::{
    FingerAlgorithm, FingerTableBuilder, Identifier, IdentifierSpace, Key, KeyAssignment, Peer,
    RingBuilder, Router, SipIdentifierHasher,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Distinct node names of the form `peer-<n>`.
fn node_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(0u32..10_000, 1..=max)
        .prop_map(|set| set.into_iter().map(|n| format!("peer-{}", n)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the ring is a single cycle over distinct identifiers.
    #[test]
    fn prop_ring_is_one_cycle(names in node_names(40), bits in 20u32..40) {
        let space = IdentifierSpace::new(bits).unwrap();
        let ring = RingBuilder::new(SipIdentifierHasher::new(space)).add_nodes(names.clone()).build();
        // A collision is a configuration error, not a property failure.
        prop_assume!(ring.is_ok());
        let ring = ring.unwrap();

        prop_assert_eq!(ring.len(), names.len());
        let ids: BTreeSet<Identifier> = ring.nodes().iter().map(|n| n.id()).collect();
        prop_assert_eq!(ids.len(), names.len());
        prop_assert!(ids.iter().all(|id| space.contains(*id)));

        let visited: BTreeSet<_> = ring.walk(ring.max_node()).collect();
        prop_assert_eq!(visited.len(), ring.len());
    }

    /// Property: both finger algorithms produce the same m-entry tables.
    #[test]
    fn prop_finger_algorithms_agree(names in node_names(12), bits in 10u32..24) {
        let space = IdentifierSpace::new(bits).unwrap();
        let ring = RingBuilder::new(SipIdentifierHasher::new(space)).add_nodes(names).build();
        prop_assume!(ring.is_ok());
        let ring = ring.unwrap();

        let search = FingerTableBuilder::new(FingerAlgorithm::Search);
        let walk = FingerTableBuilder::new(FingerAlgorithm::SuccessorWalk);
        for index in ring.indices() {
            let table = search.table_for(&ring, index);
            prop_assert_eq!(table.len(), bits as usize);
            for entry in table.iter() {
                let start = space.finger_start(ring.node(index).id(), entry.index());
                prop_assert_eq!(entry.start(), start);
            }
            prop_assert_eq!(table, walk.table_for(&ring, index));
        }
    }

    /// Property: every lookup reaches the true owner within m hops.
    #[test]
    fn prop_lookup_finds_owner(
        names in node_names(12),
        key_count in 1usize..40,
        bits in 10u32..20,
        start_pick in any::<prop::sample::Index>(),
    ) {
        let space = IdentifierSpace::new(bits).unwrap();
        let ring = RingBuilder::new(SipIdentifierHasher::new(space)).add_nodes(names).build();
        prop_assume!(ring.is_ok());
        let mut ring = ring.unwrap();
        ring.build_finger_tables(FingerAlgorithm::Search).unwrap();
        let keys = Key::numbered(key_count, ring.hasher());
        let assignment = KeyAssignment::assign(&mut ring, keys);

        let router = Router::new(&ring).unwrap();
        let start = ring.indices().nth(start_pick.index(ring.len())).unwrap();
        for (key, owner) in assignment.iter() {
            let result = router.lookup(start, key.id).unwrap();
            prop_assert_eq!(&result.owner, ring.node(owner).name());
            prop_assert!(result.hops() <= bits as usize);
        }
    }
}
