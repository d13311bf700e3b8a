//! Named node container.
//!
//! A [`Topology`] is the input to ring construction: an insertion-ordered
//! set of uniquely named nodes. It knows nothing about identifiers; the
//! [`RingBuilder`](crate::ring::RingBuilder) places its nodes on the ring.

use crate::error::{Error, Result};
use crate::node::Node;
use std::collections::HashSet;

/// Insertion-ordered collection of uniquely named nodes.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    names: HashSet<String>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a topology from names, failing on the first duplicate.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut topology = Self::new();
        for name in names {
            topology.add_node(name)?;
        }
        Ok(topology)
    }

    /// Adds a node. Fails with [`Error::DuplicateName`] if the name is taken.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !self.names.insert(name.clone()) {
            return Err(Error::DuplicateName(name));
        }
        self.nodes.push(Node::new(name));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Hands the nodes over to ring construction.
    pub(crate) fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
