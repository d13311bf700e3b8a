//! Simulation parameters.

use crate::error::{Result, SimulationError};
use chord_core::{FingerAlgorithm, HasherKind, IdentifierSpace};
use serde::{Deserialize, Serialize};

/// Name of the node lookups start from unless configured otherwise.
pub const DEFAULT_START_NODE: &str = "Node 1";

/// Parameters of one simulation run.
///
/// Nodes are named `"Node 1"` to `"Node N"` and keys `"key 1"` to
/// `"key K"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ring bit length `m`.
    pub bits: u32,
    pub node_count: usize,
    pub key_count: usize,
    pub hasher: HasherKind,
    pub finger_algorithm: FingerAlgorithm,
    /// Node every lookup starts from.
    pub start_node: Option<String>,
    /// Hop cap per lookup; `2·m` when unset.
    pub max_hops: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bits: 10,
            node_count: 10,
            key_count: 100,
            hasher: HasherKind::default(),
            finger_algorithm: FingerAlgorithm::default(),
            start_node: None,
            max_hops: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(bits: u32, node_count: usize, key_count: usize) -> Self {
        Self {
            bits,
            node_count,
            key_count,
            ..Self::default()
        }
    }

    pub fn with_hasher(mut self, hasher: HasherKind) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_finger_algorithm(mut self, algorithm: FingerAlgorithm) -> Self {
        self.finger_algorithm = algorithm;
        self
    }

    pub fn with_start_node(mut self, name: impl Into<String>) -> Self {
        self.start_node = Some(name.into());
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }

    pub fn start_node(&self) -> &str {
        self.start_node.as_deref().unwrap_or(DEFAULT_START_NODE)
    }

    /// Checks the parameters and returns the identifier space.
    pub fn validate(&self) -> Result<IdentifierSpace> {
        let space = IdentifierSpace::new(self.bits)?;
        if self.node_count == 0 {
            return Err(chord_core::Error::EmptyRing.into());
        }
        if self.node_count as u64 > space.size() {
            return Err(SimulationError::Config(format!(
                "{} nodes do not fit on a ring of {} identifiers",
                self.node_count,
                space.size()
            )));
        }
        Ok(space)
    }
}
