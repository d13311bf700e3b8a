//! Simulation errors.

/// Errors raised while building or reporting a simulation.
///
/// Routing faults of individual lookups are not errors at this level; they
/// are recorded as outcomes by the [`Evaluator`](crate::Evaluator).
#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    /// Invalid ring configuration.
    #[error(transparent)]
    Core(#[from] chord_core::Error),

    /// Bad simulation parameters.
    #[error("invalid simulation config: {0}")]
    Config(String),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the simulation crate.
pub type Result<T> = std::result::Result<T, SimulationError>;
