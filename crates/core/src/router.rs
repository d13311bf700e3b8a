//! Greedy finger routing.
//!
//! # Algorithm
//!
//! 1. The route starts at the start node.
//! 2. If the current node stores the key, it is the owner. If its successor
//!    stores the key, the successor is appended and is the owner.
//! 3. Otherwise the finger table is scanned from entry m down to entry 1 for
//!    the first node strictly between the current node and the key (the
//!    closest preceding node).
//! 4. With no such node, or no progress, routing resumes from the smallest
//!    node on the ring.
//! 5. The chosen node is appended and becomes current.
//!
//! On a consistent ring every lookup finishes within m hops. The router
//! still caps the walk: a successful route never takes more than `max_hops`
//! hops, and a lookup that would need another hop past the cap reports
//! [`Error::RoutingFault`].

use crate::error::{Error, Result};
use crate::id::Identifier;
use crate::node::{NodeIndex, Peer};
use crate::ring::{Interval, Ring};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{trace, warn};

/// Outcome of one lookup.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LookupResult {
    /// Queried key identifier.
    pub key: Identifier,
    /// Visited node names, start first, owner last.
    pub route: Vec<String>,
    pub owner: String,
    pub owner_id: Identifier,
}

impl LookupResult {
    /// Node-to-node jumps taken: `route.len() - 1`.
    pub fn hops(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}\thop count: {}\troute: [{}]",
            self.owner,
            self.owner_id,
            self.hops(),
            self.route.join(", ")
        )
    }
}

/// Read-only lookup engine over a ring with finger tables.
#[derive(Clone, Copy, Debug)]
pub struct Router<'a> {
    ring: &'a Ring,
    max_hops: usize,
}

impl<'a> Router<'a> {
    /// Creates a router with a hop cap of `2·m`.
    ///
    /// Fails with [`Error::FingerTablesMissing`] if any node lacks a full
    /// finger table.
    pub fn new(ring: &'a Ring) -> Result<Self> {
        if let Some(node) = ring
            .nodes()
            .iter()
            .find(|node| node.routing_table().len() != ring.space().bits() as usize)
        {
            return Err(Error::FingerTablesMissing(node.name().to_string()));
        }
        Ok(Self {
            ring,
            max_hops: 2 * ring.space().bits() as usize,
        })
    }

    /// Overrides the hop cap.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    pub fn ring(&self) -> &'a Ring {
        self.ring
    }

    /// Looks up `key` starting from the node named `start`.
    pub fn lookup_from(&self, start: &str, key: Identifier) -> Result<LookupResult> {
        let start = self.ring.index_of(start)?;
        self.lookup(start, key)
    }

    /// Looks up `key` starting from `start`.
    pub fn lookup(&self, start: NodeIndex, key: Identifier) -> Result<LookupResult> {
        let ring = self.ring;
        let mut route = vec![start];
        let mut current = start;

        trace!(key = %key, start = ring.node(start).name(), "Starting lookup");

        loop {
            let node = ring.node(current);
            if node.has_data(key) {
                return Ok(self.finish(key, route, current));
            }
            // Every step below takes one more hop.
            let hops = route.len() - 1;
            if hops >= self.max_hops {
                warn!(key = %key, hops, "Lookup reached hop cap");
                return Err(Error::RoutingFault {
                    key,
                    hops,
                    route: self.names(&route),
                });
            }

            let successor = ring.successor(current);
            if ring.node(successor).has_data(key) {
                if successor != current {
                    route.push(successor);
                }
                return Ok(self.finish(key, route, successor));
            }

            let next = match self.closest_preceding(current, key) {
                Some(next) if next != current => next,
                _ => {
                    trace!(key = %key, at = node.name(), "No preceding finger, wrapping to ring start");
                    ring.min_node()
                }
            };
            trace!(key = %key, from = node.name(), to = ring.node(next).name(), "Hop");
            route.push(next);
            current = next;
        }
    }

    /// The finger of `current` closest to, but strictly before, `key`.
    pub fn closest_preceding(&self, current: NodeIndex, key: Identifier) -> Option<NodeIndex> {
        let ring = self.ring;
        let node = ring.node(current);
        let between = Interval::open(&ring.space(), node.id(), key);
        node.routing_table()
            .iter()
            .rev()
            .map(|entry| entry.node())
            .find(|candidate| between.contains(ring.node(*candidate).id()))
    }

    fn finish(&self, key: Identifier, route: Vec<NodeIndex>, owner: NodeIndex) -> LookupResult {
        let owner = self.ring.node(owner);
        LookupResult {
            key,
            route: self.names(&route),
            owner: owner.name().to_string(),
            owner_id: owner.id(),
        }
    }

    fn names(&self, route: &[NodeIndex]) -> Vec<String> {
        route
            .iter()
            .map(|index| self.ring.node(*index).name().to_string())
            .collect()
    }
}
