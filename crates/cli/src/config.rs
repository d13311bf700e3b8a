//! Command-line configuration.

use crate::commands::Command;
use clap::Parser;
use std::io;
use tracing::Level;

/// Simulates lookups on a Chord distributed hash table.
#[derive(Parser, Debug)]
#[command(name = "chord", author, version, about, long_about = None)]
pub struct CliConfig {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Initialises logging and runs the selected command.
    pub fn run(self) -> anyhow::Result<()> {
        // Logs go to stderr so reports on stdout stay clean. A subscriber
        // installed earlier (tests, embedding) keeps precedence.
        tracing_subscriber::fmt()
            .with_max_level(self.log_level())
            .with_writer(io::stderr)
            .try_init()
            .ok();

        let stdout = io::stdout();
        let result = self.command.execute(&mut stdout.lock())?;
        result.into_exit()
    }
}
