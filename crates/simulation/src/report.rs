//! Aggregated lookup report and its renderings.

use crate::error::Result;
use crate::evaluator::{estimated_hops, Evaluation, Outcome};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Summary of a simulation run.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub node_count: usize,
    pub evaluations: Vec<Evaluation>,
    pub successes: usize,
    pub mismatches: usize,
    pub faults: usize,
    /// Hops summed over successful lookups.
    pub total_hops: usize,
    /// Mean hops over successful lookups, `0` when there are none.
    pub average_hops: f64,
    /// `0.5·log2(N)`.
    pub estimated_hops: f64,
}

impl Report {
    pub fn new(node_count: usize, evaluations: Vec<Evaluation>) -> Self {
        let mut successes = 0;
        let mut mismatches = 0;
        let mut faults = 0;
        let mut total_hops = 0;
        for evaluation in &evaluations {
            match evaluation.outcome {
                Outcome::Success => {
                    successes += 1;
                    total_hops += evaluation.hops().unwrap_or(0);
                }
                Outcome::OwnershipMismatch { .. } => mismatches += 1,
                Outcome::RoutingFault { .. } => faults += 1,
            }
        }
        let average_hops = if successes == 0 {
            0.0
        } else {
            total_hops as f64 / successes as f64
        };

        Self {
            node_count,
            evaluations,
            successes,
            mismatches,
            faults,
            total_hops,
            average_hops,
            estimated_hops: estimated_hops(node_count),
        }
    }

    /// True when every lookup reached its owner.
    pub fn all_succeeded(&self) -> bool {
        self.mismatches == 0 && self.faults == 0
    }

    /// Largest hop count among successful lookups.
    pub fn longest_route_hops(&self) -> usize {
        self.evaluations
            .iter()
            .filter(|e| e.outcome.is_success())
            .filter_map(Evaluation::hops)
            .max()
            .unwrap_or(0)
    }

    /// The report as text lines: one per lookup, then the averages.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.evaluations.iter().map(render_line).collect();
        lines.push(String::new());
        lines.push(format!("average hop count: {}", self.average_hops));
        lines.push(format!("estimated average hop count: {}", self.estimated_hops));
        if !self.all_succeeded() {
            lines.push(format!(
                "failed lookups: {} ownership mismatches, {} routing faults",
                self.mismatches, self.faults
            ));
        }
        lines
    }

    /// Writes the report in `format`.
    pub fn write<W: Write>(&self, mut writer: W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => {
                for line in self.lines() {
                    writeln!(writer, "{}", line)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, self)?;
                writeln!(writer)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn render_line(evaluation: &Evaluation) -> String {
    let key = &evaluation.key;
    match (&evaluation.outcome, &evaluation.result) {
        (Outcome::Success, Some(result)) => format!("{}: {}\t{}", key.name, key.id, result),
        (Outcome::OwnershipMismatch { expected, .. }, Some(result)) => {
            format!("{}: {}\t{}\tWRONG OWNER, expected {}", key.name, key.id, result, expected)
        }
        (Outcome::RoutingFault { reason }, _) => {
            format!("{}: {}\tLOOKUP FAILED: {}", key.name, key.id, reason)
        }
        (_, None) => format!("{}: {}\tno result", key.name, key.id),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// File format for [`Report::write`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}
