//! Node abstractions for the Chord ring.
//!
//! Nodes live in one arena owned by the [`Ring`](crate::ring::Ring); a
//! node refers to its successor and to the owners in its finger table by
//! [`NodeIndex`] instead of by pointer, which keeps the cyclic successor
//! graph free of ownership cycles.

use crate::id::Identifier;
use crate::ring::finger::FingerTable;
use std::collections::BTreeSet;
use std::fmt;

/// Position of a node in the ring arena.
///
/// Arena order is ring order, so index `0` is always the node with the
/// smallest identifier.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the protocol needs from a ring participant.
///
/// The ring builders and the key assignment are written against this
/// contract; [`Node`] is the only implementation.
pub trait Peer {
    fn name(&self) -> &str;

    fn id(&self) -> Identifier;
    fn set_id(&mut self, id: Identifier);

    /// Ring neighbour, `None` until the ring is wired.
    fn successor(&self) -> Option<NodeIndex>;
    fn set_successor(&mut self, successor: NodeIndex);

    /// Registers a key identifier. Returns false if it was already stored.
    fn add_data(&mut self, key: Identifier) -> bool;
    fn has_data(&self, key: Identifier) -> bool;

    fn routing_table(&self) -> &FingerTable;
    fn set_routing_table(&mut self, table: FingerTable);
}

/// A participant of the ring.
#[derive(Clone, Debug)]
pub struct Node {
    name: String,
    id: Identifier,
    successor: Option<NodeIndex>,
    data: BTreeSet<Identifier>,
    fingers: FingerTable,
}

impl Node {
    /// A node that has not been placed on a ring yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Identifier(0),
            successor: None,
            data: BTreeSet::new(),
            fingers: FingerTable::default(),
        }
    }

    /// Stored key identifiers in ascending order.
    pub fn data(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.data.iter().copied()
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

impl Peer for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Identifier {
        self.id
    }

    fn set_id(&mut self, id: Identifier) {
        self.id = id;
    }

    fn successor(&self) -> Option<NodeIndex> {
        self.successor
    }

    fn set_successor(&mut self, successor: NodeIndex) {
        self.successor = Some(successor);
    }

    fn add_data(&mut self, key: Identifier) -> bool {
        self.data.insert(key)
    }

    fn has_data(&self, key: Identifier) -> bool {
        self.data.contains(&key)
    }

    fn routing_table(&self) -> &FingerTable {
        &self.fingers
    }

    fn set_routing_table(&mut self, table: FingerTable) {
        self.fingers = table;
    }
}
