//! Keys and their placement on the ring.

use crate::hasher::IdentifierHasher;
use crate::id::Identifier;
use crate::node::{NodeIndex, Peer};
use crate::ring::Ring;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named key and its identifier.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Key {
    pub name: String,
    pub id: Identifier,
}

impl Key {
    /// Hashes `name` with the same hasher the nodes were placed with.
    pub fn new<H: IdentifierHasher + ?Sized>(name: impl Into<String>, hasher: &H) -> Self {
        let name = name.into();
        let id = hasher.hash(&name);
        Self { name, id }
    }

    /// `"key 1"` to `"key count"`.
    pub fn numbered<H: IdentifierHasher + ?Sized>(count: usize, hasher: &H) -> Vec<Key> {
        (1..=count).map(|i| Key::new(format!("key {}", i), hasher)).collect()
    }
}

/// Ground truth of where every key was stored.
#[derive(Clone, Debug, Default)]
pub struct KeyAssignment {
    placements: Vec<(Key, NodeIndex)>,
}

impl KeyAssignment {
    /// Stores every key on the node that owns its identifier.
    ///
    /// Each key lands on exactly one node. Keys whose identifiers coincide
    /// share an owner and occupy one slot of its data set.
    pub fn assign(ring: &mut Ring, keys: impl IntoIterator<Item = Key>) -> Self {
        let mut placements = Vec::new();
        for key in keys {
            let owner = ring.owner_of(key.id);
            ring.node_mut(owner).add_data(key.id);
            placements.push((key, owner));
        }
        debug!(keys = placements.len(), nodes = ring.len(), "Assigned keys");
        Self { placements }
    }

    /// Keys with their owners, in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, NodeIndex)> + '_ {
        self.placements.iter().map(|(key, owner)| (key, *owner))
    }

    pub fn owner(&self, key_name: &str) -> Option<NodeIndex> {
        self.placements
            .iter()
            .find(|(key, _)| key.name == key_name)
            .map(|(_, owner)| *owner)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
