//! CLI commands.

use anyhow::{bail, Context};
use chord_core::{FingerAlgorithm, HasherKind};
use chord_sim::{OutputFormat, Report, Simulation, SimulationConfig};
use clap::{Args, Subcommand};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Ring shape shared by every command.
#[derive(Args, Debug, Clone)]
pub struct RingArgs {
    /// Number of nodes, named "Node 1" to "Node N".
    #[arg(short, long, default_value_t = 10)]
    pub nodes: usize,

    /// Identifier bit length m; the ring has 2^m positions.
    #[arg(short = 'm', long, default_value_t = 10)]
    pub bits: u32,

    /// Hash function for node and key names (xxh3, sip, blake3).
    #[arg(long, default_value_t = HasherKind::Xxh3)]
    pub hasher: HasherKind,

    /// Finger-table algorithm (search, successor-walk).
    #[arg(long, default_value_t = FingerAlgorithm::Search)]
    pub algorithm: FingerAlgorithm,

    /// Number of keys, named "key 1" to "key K".
    #[arg(short, long, default_value_t = 100)]
    pub keys: usize,
}

impl RingArgs {
    fn config(&self) -> SimulationConfig {
        SimulationConfig::new(self.bits, self.nodes, self.keys)
            .with_hasher(self.hasher)
            .with_finger_algorithm(self.algorithm)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up every key and report hop counts.
    Simulate {
        #[command(flatten)]
        ring: RingArgs,

        /// Node every lookup starts from.
        #[arg(short, long, default_value = "Node 1")]
        start: String,

        /// Look up every key from every node instead.
        #[arg(long, conflicts_with = "start")]
        every_node: bool,

        /// Hop cap per lookup (default 2·m).
        #[arg(long)]
        max_hops: Option<usize>,

        /// Report file; defaults to <output-dir>/output_<nodes>_<bits>.<ext>.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the default report file.
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,

        /// Do not write a report file.
        #[arg(long, conflicts_with = "output")]
        no_output: bool,

        /// Report format (text, json).
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print the ring walk before the report.
        #[arg(long)]
        print_ring: bool,

        /// Print every node's successor, keys and fingers before the report.
        #[arg(long)]
        print_network: bool,
    },

    /// Print the ring and every node's finger table.
    Ring {
        #[command(flatten)]
        ring: RingArgs,
    },

    /// Trace the lookup of one key.
    Lookup {
        /// Key name, e.g. "key 7".
        key: String,

        #[command(flatten)]
        ring: RingArgs,

        /// Node the lookup starts from.
        #[arg(short, long, default_value = "Node 1")]
        start: String,
    },
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// A simulation ran.
    Report {
        lookups: usize,
        failures: usize,
        average_hops: f64,
        written_to: Option<PathBuf>,
    },
    /// Output was printed only.
    Printed,
}

impl CommandResult {
    /// Turns failed lookups into an error exit.
    pub fn into_exit(self) -> anyhow::Result<()> {
        match self {
            CommandResult::Report { failures, lookups, .. } if failures > 0 => {
                bail!("{} of {} lookups failed", failures, lookups)
            }
            _ => Ok(()),
        }
    }
}

impl Command {
    /// Runs the command, printing to `out`.
    pub fn execute<W: Write>(&self, out: &mut W) -> anyhow::Result<CommandResult> {
        match self {
            Command::Simulate {
                ring,
                start,
                every_node,
                max_hops,
                output,
                output_dir,
                no_output,
                format,
                print_ring,
                print_network,
            } => {
                let mut config = ring.config().with_start_node(start.clone());
                config.max_hops = *max_hops;
                let simulation = Simulation::build(config).context("failed to build the ring")?;

                if *print_ring {
                    writeln!(out, "........printing ring..............")?;
                    writeln!(out, "{}", simulation.ring())?;
                    writeln!(out, ".....................................")?;
                }
                if *print_network {
                    write!(out, "{}", simulation.ring().network())?;
                }

                let report = if *every_node {
                    simulation.run_from_every_node()?
                } else {
                    simulation.run()?
                };
                report.write(&mut *out, *format)?;

                let written_to = if *no_output {
                    None
                } else {
                    let path = output.clone().unwrap_or_else(|| {
                        output_dir.join(format!("output_{}_{}.{}", ring.nodes, ring.bits, format.extension()))
                    });
                    save(&report, &path, *format)?;
                    Some(path)
                };

                Ok(CommandResult::Report {
                    lookups: report.evaluations.len(),
                    failures: report.mismatches + report.faults,
                    average_hops: report.average_hops,
                    written_to,
                })
            }
            Command::Ring { ring } => {
                let simulation = Simulation::build(ring.config()).context("failed to build the ring")?;
                writeln!(out, "{}", simulation.ring())?;
                writeln!(out)?;
                write!(out, "{}", simulation.ring().network())?;
                Ok(CommandResult::Printed)
            }
            Command::Lookup { key, ring, start } => {
                let simulation = Simulation::build(ring.config()).context("failed to build the ring")?;
                let result = simulation
                    .lookup_key(key, Some(start))
                    .with_context(|| format!("lookup of {:?} failed", key))?;
                writeln!(out, "{}: {}\t{}", key, result.key, result)?;
                Ok(CommandResult::Printed)
            }
        }
    }
}

fn save(report: &Report, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    report.write(BufWriter::new(file), format)?;
    info!(path = %path.display(), "Wrote report");
    Ok(())
}
