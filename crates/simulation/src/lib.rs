//! Chord simulation harness.
//!
//! This crate drives the protocol engine end to end:
//! - Generates node and key names and builds the ring
//! - Runs every key lookup from a chosen start node
//! - Evaluates routes against ground truth and summarises hop counts

pub mod config;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod simulator;

pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use evaluator::{Evaluation, Evaluator, Outcome};
pub use report::{OutputFormat, Report};
pub use simulator::Simulation;
