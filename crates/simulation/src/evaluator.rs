//! Lookup evaluation against ground truth.

use crate::report::Report;
use chord_core::{Key, LookupResult};
use metrics::{counter, histogram};
use serde::Serialize;
use tracing::warn;

/// Classification of one lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The route ended at the key's true owner.
    Success,
    /// The route ended somewhere else.
    OwnershipMismatch { expected: String, actual: String },
    /// The router gave up.
    RoutingFault { reason: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::OwnershipMismatch { .. } => "ownership_mismatch",
            Outcome::RoutingFault { .. } => "routing_fault",
        }
    }
}

/// One evaluated lookup.
#[derive(Clone, Debug, Serialize)]
pub struct Evaluation {
    pub key: Key,
    pub expected_owner: String,
    pub outcome: Outcome,
    /// Present unless the lookup faulted.
    pub result: Option<LookupResult>,
}

impl Evaluation {
    pub fn hops(&self) -> Option<usize> {
        self.result.as_ref().map(LookupResult::hops)
    }
}

/// Accumulates lookup outcomes for a report.
///
/// A failed lookup is recorded and the evaluation moves on; nothing here
/// aborts a run.
#[derive(Debug)]
pub struct Evaluator {
    node_count: usize,
    evaluations: Vec<Evaluation>,
}

impl Evaluator {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            evaluations: Vec::new(),
        }
    }

    /// Classifies and records one lookup.
    pub fn record(
        &mut self,
        key: &Key,
        expected_owner: &str,
        result: chord_core::Result<LookupResult>,
    ) -> &Evaluation {
        let (outcome, result) = match result {
            Ok(result) if result.owner == expected_owner => (Outcome::Success, Some(result)),
            Ok(result) => {
                warn!(
                    key = %key.name,
                    expected = expected_owner,
                    actual = %result.owner,
                    "Lookup ended at the wrong node"
                );
                let outcome = Outcome::OwnershipMismatch {
                    expected: expected_owner.to_string(),
                    actual: result.owner.clone(),
                };
                (outcome, Some(result))
            }
            Err(err) => {
                warn!(key = %key.name, error = %err, "Lookup failed");
                let outcome = Outcome::RoutingFault {
                    reason: err.to_string(),
                };
                (outcome, None)
            }
        };

        counter!("chord_lookups_total", "outcome" => outcome.label()).increment(1);
        if let (Outcome::Success, Some(result)) = (&outcome, &result) {
            histogram!("chord_lookup_hops").record(result.hops() as f64);
        }

        self.evaluations.push(Evaluation {
            key: key.clone(),
            expected_owner: expected_owner.to_string(),
            outcome,
            result,
        });
        &self.evaluations[self.evaluations.len() - 1]
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn finish(self) -> Report {
        Report::new(self.node_count, self.evaluations)
    }
}

/// Expected average hop count for `node_count` nodes: `0.5·log2(N)`.
pub fn estimated_hops(node_count: usize) -> f64 {
    if node_count == 0 {
        return 0.0;
    }
    0.5 * (node_count as f64).log2()
}
