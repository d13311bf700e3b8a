//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use chord_core::{
    FingerAlgorithm, IdentifierHasher, IdentifierSpace, Key, KeyAssignment, Ring, RingBuilder,
    Xxh3Hasher,
};
use std::collections::HashMap;

/// Places listed names at fixed identifiers; other names go through xxh3.
pub struct FixedHasher {
    space: IdentifierSpace,
    table: HashMap<String, u64>,
}

impl FixedHasher {
    pub fn new(bits: u32, table: &[(&str, u64)]) -> Self {
        Self {
            space: IdentifierSpace::new(bits).unwrap(),
            table: table.iter().map(|(name, id)| (name.to_string(), *id)).collect(),
        }
    }
}

impl IdentifierHasher for FixedHasher {
    fn digest(&self, bytes: &[u8]) -> u64 {
        let name = String::from_utf8_lossy(bytes);
        match self.table.get(name.as_ref()) {
            Some(id) => *id,
            None => Xxh3Hasher::new(self.space).digest(bytes),
        }
    }

    fn space(&self) -> IdentifierSpace {
        self.space
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Ring of `"Node 1".."Node n"` with finger tables and `"key 1".."key k"`
/// assigned.
pub fn simulated_ring(bits: u32, nodes: usize, keys: usize) -> (Ring, KeyAssignment) {
    let space = IdentifierSpace::new(bits).unwrap();
    let mut ring = RingBuilder::new(Xxh3Hasher::new(space))
        .numbered(nodes)
        .build()
        .unwrap();
    ring.build_finger_tables(FingerAlgorithm::Search).unwrap();
    let keys = Key::numbered(keys, ring.hasher());
    let assignment = KeyAssignment::assign(&mut ring, keys);
    (ring, assignment)
}
