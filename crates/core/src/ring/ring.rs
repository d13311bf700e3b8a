//! Ring overlay: nodes ordered by identifier with successor links.

use crate::error::{Error, Result};
use crate::hasher::IdentifierHasher;
use crate::id::{Identifier, IdentifierSpace};
use crate::keys::Key;
use crate::node::{Node, NodeIndex, Peer};
use crate::ring::finger::{FingerAlgorithm, FingerTableBuilder};
use crate::ring::interval::Interval;
use crate::topology::Topology;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The Chord ring.
///
/// Owns every node in one arena sorted by ascending identifier. Successor
/// links and finger-table owners are arena indices, so index `i`'s
/// successor is `i + 1` and the last node wraps to index `0`.
///
/// A ring is built once by [`RingBuilder`] and is never mutated
/// incrementally; a changed node set means building a new ring.
#[derive(Clone)]
pub struct Ring {
    space: IdentifierSpace,
    hasher: Arc<dyn IdentifierHasher>,
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeIndex>,
}

impl Ring {
    /// Places every node of `topology` on the ring.
    ///
    /// Hashes each name, sorts by identifier and wires each node's successor
    /// to its clockwise neighbour. Fails with [`Error::EmptyRing`] for an
    /// empty topology and with [`Error::IdentifierCollision`] when two names
    /// hash to the same identifier.
    pub fn from_topology(topology: Topology, hasher: Arc<dyn IdentifierHasher>) -> Result<Self> {
        if topology.is_empty() {
            return Err(Error::EmptyRing);
        }
        let space = hasher.space();

        let mut nodes = topology.into_nodes();
        for node in nodes.iter_mut() {
            let id = hasher.hash(node.name());
            node.set_id(id);
        }
        nodes.sort_by_key(|node| node.id());

        if let Some(pair) = nodes.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            return Err(Error::IdentifierCollision {
                first: pair[0].name().to_string(),
                second: pair[1].name().to_string(),
                id: pair[0].id(),
            });
        }

        let count = nodes.len();
        for (i, node) in nodes.iter_mut().enumerate() {
            node.set_successor(NodeIndex((i + 1) % count));
        }

        let by_name = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name().to_string(), NodeIndex(i)))
            .collect();

        debug!(
            nodes = count,
            bits = space.bits(),
            hasher = hasher.name(),
            "Built ring overlay"
        );
        for node in &nodes {
            trace!(name = node.name(), id = %node.id(), "Placed node");
        }

        Ok(Self {
            space,
            hasher,
            nodes,
            by_name,
        })
    }

    pub fn space(&self) -> IdentifierSpace {
        self.space
    }

    /// The hasher every node and key on this ring is placed with.
    pub fn hasher(&self) -> &dyn IdentifierHasher {
        self.hasher.as_ref()
    }

    /// Hashes a key name with the ring's hasher.
    pub fn key(&self, name: impl Into<String>) -> Key {
        Key::new(name, self.hasher())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: construction rejects empty rings.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `index` does not belong to this ring.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index.0]
    }

    /// Nodes in ring order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node indices in ring order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    /// Like [`Ring::find`] but reports a missing name as [`Error::UnknownNode`].
    pub fn index_of(&self, name: &str) -> Result<NodeIndex> {
        self.find(name)
            .ok_or_else(|| Error::UnknownNode(name.to_string()))
    }

    /// The node with the smallest identifier.
    pub fn min_node(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// The node with the largest identifier.
    pub fn max_node(&self) -> NodeIndex {
        NodeIndex(self.nodes.len() - 1)
    }

    pub fn successor(&self, index: NodeIndex) -> NodeIndex {
        self.node(index)
            .successor()
            .unwrap_or(NodeIndex((index.0 + 1) % self.nodes.len()))
    }

    pub fn predecessor(&self, index: NodeIndex) -> NodeIndex {
        NodeIndex((index.0 + self.nodes.len() - 1) % self.nodes.len())
    }

    /// The node that owns `id`: the first node whose identifier is `>= id`,
    /// or the smallest node when `id` is past every node.
    pub fn owner_of(&self, id: Identifier) -> NodeIndex {
        let at = self.nodes.partition_point(|node| node.id() < id);
        if at == self.nodes.len() {
            self.min_node()
        } else {
            NodeIndex(at)
        }
    }

    /// Identifiers owned by the node: `(predecessor, node]`.
    pub fn owned_range(&self, index: NodeIndex) -> Interval {
        let pred = self.node(self.predecessor(index)).id();
        Interval::open_closed(&self.space, pred, self.node(index).id())
    }

    /// Follows successor links from `from`, yielding every node once.
    pub fn walk(&self, from: NodeIndex) -> Walk<'_> {
        Walk {
            ring: self,
            next: from,
            remaining: self.nodes.len(),
        }
    }

    /// True once every node carries a full routing table.
    pub fn has_finger_tables(&self) -> bool {
        let bits = self.space.bits() as usize;
        self.nodes.iter().all(|node| node.routing_table().len() == bits)
    }

    /// Builds every node's finger table with `algorithm`.
    pub fn build_finger_tables(&mut self, algorithm: FingerAlgorithm) -> Result<()> {
        FingerTableBuilder::new(algorithm).build(self)
    }

    /// Per-node dump: identifier, successor, stored keys and fingers.
    pub fn network(&self) -> NetworkView<'_> {
        NetworkView { ring: self }
    }
}

impl fmt::Debug for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("space", &self.space)
            .field("hasher", &self.hasher.name())
            .field("nodes", &self.nodes)
            .finish()
    }
}

/// Renders the ring walk, `a --- b --- c --- a`, starting from the smallest
/// node.
impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self.min_node();
        for (i, index) in self.walk(head).enumerate() {
            if i > 0 {
                write!(f, " --- ")?;
            }
            write!(f, "{}", self.node(index).name())?;
        }
        write!(f, " --- {}", self.node(head).name())
    }
}

/// Iterator over successor links. See [`Ring::walk`].
pub struct Walk<'a> {
    ring: &'a Ring,
    next: NodeIndex,
    remaining: usize,
}

impl Iterator for Walk<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next;
        self.next = self.ring.successor(current);
        Some(current)
    }
}

/// Display adapter returned by [`Ring::network`].
pub struct NetworkView<'a> {
    ring: &'a Ring,
}

impl fmt::Display for NetworkView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring;
        for index in ring.indices() {
            let node = ring.node(index);
            let successor = ring.node(ring.successor(index));
            writeln!(f, "{} (id {})", node.name(), node.id())?;
            writeln!(f, "  successor: {} (id {})", successor.name(), successor.id())?;
            let data: Vec<String> = node.data().map(|id| id.to_string()).collect();
            writeln!(f, "  data: [{}]", data.join(", "))?;
            writeln!(f, "  fingers:")?;
            for entry in node.routing_table().iter() {
                let owner = ring.node(entry.node());
                writeln!(
                    f,
                    "    {:>2}  start {:<6} interval {:<16} node {} (id {})",
                    entry.index(),
                    entry.start().to_string(),
                    entry.interval().to_string(),
                    owner.name(),
                    owner.id()
                )?;
            }
        }
        Ok(())
    }
}

/// Builds a [`Ring`] from node names.
///
/// ```
/// use chord_core::{IdentifierSpace, RingBuilder, Xxh3Hasher};
///
/// let space = IdentifierSpace::new(16).unwrap();
/// let ring = RingBuilder::new(Xxh3Hasher::new(space))
///     .add_node("Node 1")
///     .add_node("Node 2")
///     .build()
///     .unwrap();
/// assert_eq!(ring.len(), 2);
/// ```
pub struct RingBuilder {
    hasher: Arc<dyn IdentifierHasher>,
    names: Vec<String>,
}

impl RingBuilder {
    pub fn new<H: IdentifierHasher>(hasher: H) -> Self {
        Self::with_shared_hasher(Arc::new(hasher))
    }

    pub fn with_shared_hasher(hasher: Arc<dyn IdentifierHasher>) -> Self {
        Self {
            hasher,
            names: Vec::new(),
        }
    }

    pub fn add_node(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn add_nodes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds `"Node 1"` to `"Node count"`.
    pub fn numbered(self, count: usize) -> Self {
        self.add_nodes((1..=count).map(|i| format!("Node {}", i)))
    }

    /// Validates the names and builds the ring overlay (no finger tables).
    pub fn build(self) -> Result<Ring> {
        let topology = Topology::from_names(self.names)?;
        Ring::from_topology(topology, self.hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Xxh3Hasher;

    fn space(bits: u32) -> IdentifierSpace {
        IdentifierSpace::new(bits).unwrap()
    }

    #[test]
    fn test_empty_ring_is_rejected() {
        let result = RingBuilder::new(Xxh3Hasher::new(space(8))).build();
        assert_eq!(result.unwrap_err(), Error::EmptyRing);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = RingBuilder::new(Xxh3Hasher::new(space(8)))
            .add_node("a")
            .add_node("a")
            .build();
        assert_eq!(result.unwrap_err(), Error::DuplicateName("a".into()));
    }

    #[test]
    fn test_single_node_is_its_own_successor() {
        let ring = RingBuilder::new(Xxh3Hasher::new(space(8)))
            .add_node("solo")
            .build()
            .unwrap();
        assert_eq!(ring.successor(NodeIndex(0)), NodeIndex(0));
        assert_eq!(ring.owner_of(Identifier(0)), NodeIndex(0));
        assert_eq!(ring.to_string(), "solo --- solo");
    }

    #[test]
    fn test_nodes_sorted_and_wired() {
        let ring = RingBuilder::new(Xxh3Hasher::new(space(32)))
            .numbered(20)
            .build()
            .unwrap();
        assert_eq!(ring.len(), 20);
        for pair in ring.nodes().windows(2) {
            assert!(pair[0].id() < pair[1].id());
        }
        assert_eq!(ring.successor(ring.max_node()), ring.min_node());
        assert_eq!(ring.walk(NodeIndex(7)).count(), 20);
    }
}
