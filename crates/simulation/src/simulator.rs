//! End-to-end simulation driver.
//!
//! # Pipeline
//!
//! 1. Name `N` nodes and hash them onto the ring
//! 2. Build every finger table
//! 3. Name `K` keys, hash them and store each on its owner
//! 4. Look up every key and evaluate the route

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::report::Report;
use chord_core::{
    IdentifierHasher, Key, KeyAssignment, LookupResult, NodeIndex, Peer, Ring, RingBuilder, Router,
};
use std::sync::Arc;
use tracing::{debug, info};

/// A fully built ring with its keys assigned.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    ring: Ring,
    assignment: KeyAssignment,
}

impl Simulation {
    /// Builds the ring, its finger tables and the key placement.
    pub fn build(config: SimulationConfig) -> Result<Self> {
        let space = config.validate()?;
        let hasher: Arc<dyn IdentifierHasher> = Arc::from(config.hasher.build(space));

        let mut ring = RingBuilder::with_shared_hasher(hasher)
            .numbered(config.node_count)
            .build()?;
        ring.build_finger_tables(config.finger_algorithm)?;

        let keys = Key::numbered(config.key_count, ring.hasher());
        let assignment = KeyAssignment::assign(&mut ring, keys);

        info!(
            nodes = ring.len(),
            keys = assignment.len(),
            bits = space.bits(),
            hasher = %config.hasher,
            "Simulation ready"
        );
        Ok(Self {
            config,
            ring,
            assignment,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn assignment(&self) -> &KeyAssignment {
        &self.assignment
    }

    pub fn router(&self) -> Result<Router<'_>> {
        let router = Router::new(&self.ring)?;
        Ok(match self.config.max_hops {
            Some(max_hops) => router.with_max_hops(max_hops),
            None => router,
        })
    }

    /// Looks up every key from the configured start node.
    pub fn run(&self) -> Result<Report> {
        let start = self.ring.index_of(self.config.start_node())?;
        self.run_from(start)
    }

    /// Looks up every key from `start`.
    pub fn run_from(&self, start: NodeIndex) -> Result<Report> {
        let router = self.router()?;
        let mut evaluator = Evaluator::new(self.ring.len());
        self.evaluate_from(&router, start, &mut evaluator);
        Ok(self.finish(evaluator))
    }

    /// Looks up every key from every node.
    pub fn run_from_every_node(&self) -> Result<Report> {
        let router = self.router()?;
        let mut evaluator = Evaluator::new(self.ring.len());
        for start in self.ring.indices() {
            self.evaluate_from(&router, start, &mut evaluator);
        }
        Ok(self.finish(evaluator))
    }

    /// Looks up one key by name. A key that was never assigned ends in a
    /// routing fault.
    pub fn lookup_key(&self, key_name: &str, start: Option<&str>) -> Result<LookupResult> {
        let start = self.ring.index_of(start.unwrap_or(self.config.start_node()))?;
        let key = self.ring.key(key_name);
        Ok(self.router()?.lookup(start, key.id)?)
    }

    fn evaluate_from(&self, router: &Router<'_>, start: NodeIndex, evaluator: &mut Evaluator) {
        debug!(start = self.ring.node(start).name(), keys = self.assignment.len(), "Evaluating lookups");
        for (key, owner) in self.assignment.iter() {
            let expected = self.ring.node(owner).name();
            evaluator.record(key, expected, router.lookup(start, key.id));
        }
    }

    fn finish(&self, evaluator: Evaluator) -> Report {
        let report = evaluator.finish();
        info!(
            lookups = report.evaluations.len(),
            successes = report.successes,
            average_hops = report.average_hops,
            estimated_hops = report.estimated_hops,
            "Lookups evaluated"
        );
        report
    }
}
