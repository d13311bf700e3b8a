//! Test helpers.

use crate::hasher::{IdentifierHasher, Xxh3Hasher};
use crate::id::IdentifierSpace;
use crate::ring::{Ring, RingBuilder};
use std::collections::HashMap;

/// Places listed names at fixed identifiers; anything else falls back to
/// xxh3.
pub(crate) struct FixedHasher {
    space: IdentifierSpace,
    table: HashMap<String, u64>,
}

impl FixedHasher {
    pub(crate) fn new(bits: u32, table: &[(&str, u64)]) -> Self {
        Self {
            space: IdentifierSpace::new(bits).unwrap(),
            table: table.iter().map(|(name, id)| (name.to_string(), *id)).collect(),
        }
    }

    /// A ring whose nodes sit exactly at the listed identifiers.
    pub(crate) fn ring(bits: u32, nodes: &[(&str, u64)]) -> Ring {
        RingBuilder::new(Self::new(bits, nodes))
            .add_nodes(nodes.iter().map(|(name, _)| *name))
            .build()
            .unwrap()
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
