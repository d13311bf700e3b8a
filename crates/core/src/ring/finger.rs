//! Finger tables: each node's logarithmic routing table.
//!
//! Entry `i` (1-based) of node `n` starts at `(n + 2^(i-1)) mod 2^m`, covers
//! `[start_i, start_{i+1})` (the last entry covers `[start_m, start_1)`, so
//! the m intervals partition the ring) and points at the node owning
//! `start_i`.

use crate::error::{Error, Result};
use crate::id::Identifier;
use crate::node::{NodeIndex, Peer};
use crate::ring::interval::Interval;
use crate::ring::ring::Ring;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One routing entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct FingerEntry {
    index: u32,
    start: Identifier,
    interval: Interval,
    node: NodeIndex,
}

impl FingerEntry {
    /// Routing index, `1..=m`.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn start(&self) -> Identifier {
        self.start
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Owner of `start`.
    pub fn node(&self) -> NodeIndex {
        self.node
    }
}

/// A node's routing table: exactly m entries once built, empty before.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FingerTable {
    entries: Vec<FingerEntry>,
}

impl FingerTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by 1-based routing index.
    pub fn get(&self, index: u32) -> Option<&FingerEntry> {
        let slot = (index as usize).checked_sub(1)?;
        self.entries.get(slot)
    }

    /// Entries from index 1 to m.
    pub fn iter(&self) -> std::slice::Iter<'_, FingerEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[FingerEntry] {
        &self.entries
    }
}

/// How entry owners are located. Both produce identical tables.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FingerAlgorithm {
    /// Binary search of the ordered ring for every start.
    #[default]
    Search,
    /// Walk successor links from the node's successor, advancing while the
    /// candidate sits before the start value.
    SuccessorWalk,
}

impl fmt::Display for FingerAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FingerAlgorithm::Search => f.write_str("search"),
            FingerAlgorithm::SuccessorWalk => f.write_str("successor-walk"),
        }
    }
}

impl FromStr for FingerAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "search" => Ok(FingerAlgorithm::Search),
            "successor-walk" | "walk" => Ok(FingerAlgorithm::SuccessorWalk),
            other => Err(format!("unknown finger algorithm: {}", other)),
        }
    }
}

/// Computes and installs finger tables for every node of a ring.
#[derive(Copy, Clone, Debug, Default)]
pub struct FingerTableBuilder {
    algorithm: FingerAlgorithm,
}

impl FingerTableBuilder {
    pub fn new(algorithm: FingerAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> FingerAlgorithm {
        self.algorithm
    }

    /// Replaces the routing table of every node.
    pub fn build(&self, ring: &mut Ring) -> Result<()> {
        if ring.is_empty() {
            return Err(Error::EmptyRing);
        }
        let tables: Vec<FingerTable> = ring.indices().map(|index| self.table_for(ring, index)).collect();
        for (slot, table) in tables.into_iter().enumerate() {
            ring.node_mut(NodeIndex(slot)).set_routing_table(table);
        }
        debug!(
            nodes = ring.len(),
            entries = ring.space().bits(),
            algorithm = %self.algorithm,
            "Built finger tables"
        );
        Ok(())
    }

    /// Computes the table of one node without installing it.
    pub fn table_for(&self, ring: &Ring, index: NodeIndex) -> FingerTable {
        let space = ring.space();
        let bits = space.bits();
        let node_id = ring.node(index).id();
        let starts: Vec<Identifier> = (1..=bits).map(|i| space.finger_start(node_id, i)).collect();

        let owners = match self.algorithm {
            FingerAlgorithm::Search => starts.iter().map(|start| ring.owner_of(*start)).collect(),
            FingerAlgorithm::SuccessorWalk => walk_owners(ring, index, &starts),
        };

        let entries = starts
            .iter()
            .zip(owners)
            .enumerate()
            .map(|(slot, (start, node))| {
                // The last interval closes back at the first start.
                let end = starts[(slot + 1) % starts.len()];
                FingerEntry {
                    index: slot as u32 + 1,
                    start: *start,
                    interval: Interval::new(*start, end),
                    node,
                }
            })
            .collect();

        FingerTable { entries }
    }
}

/// Owners of ascending `starts` by following successor links.
///
/// Distances are measured clockwise from the node itself; the node is
/// treated as sitting a full turn away, since it owns the identifiers just
/// before it rather than just after.
fn walk_owners(ring: &Ring, index: NodeIndex, starts: &[Identifier]) -> Vec<NodeIndex> {
    let space = ring.space();
    let node_id = ring.node(index).id();
    let adjusted = |candidate: NodeIndex| match space.distance(node_id, ring.node(candidate).id()) {
        0 => space.size(),
        d => d,
    };

    let mut candidate = ring.successor(index);
    let mut owners = Vec::with_capacity(starts.len());
    for start in starts {
        let target = space.distance(node_id, *start);
        let mut steps = 0;
        while adjusted(candidate) < target && steps < ring.len() {
            candidate = ring.successor(candidate);
            steps += 1;
        }
        owners.push(candidate);
    }
    owners
}
