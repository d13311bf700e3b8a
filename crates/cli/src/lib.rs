//! CLI tool for the Chord simulator.
//!
//! Provides commands for:
//! - Running a full simulation and writing the lookup report
//! - Inspecting the ring and its finger tables
//! - Tracing a single lookup

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
