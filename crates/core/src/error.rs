//! Error types for the core library.

use crate::id::Identifier;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Everything except [`Error::RoutingFault`] is a configuration error and is
/// raised before any lookup runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Ring bit length outside `1..=63`.
    #[error("invalid ring bit length {0}: must be between 1 and {max}", max = crate::id::MAX_BITS)]
    InvalidBitLength(u32),

    /// A ring or topology with no nodes.
    #[error("the ring has no nodes")]
    EmptyRing,

    /// Two nodes were registered under the same name.
    #[error("duplicate node name: {0}")]
    DuplicateName(String),

    /// Two distinct names hashed to the same identifier.
    #[error("identifier collision: {first} and {second} both hash to {id}")]
    IdentifierCollision {
        first: String,
        second: String,
        id: Identifier,
    },

    /// A node name that is not part of the ring.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Routing was attempted before the finger tables were built.
    #[error("finger tables have not been built for node {0}")]
    FingerTablesMissing(String),

    /// A lookup used up its hop budget without reaching the key's owner.
    #[error("routing fault: key {key} not located after {hops} hops (route: {route:?})")]
    RoutingFault {
        key: Identifier,
        hops: usize,
        route: Vec<String>,
    },
}

impl Error {
    /// True for errors that stem from bad input rather than from routing.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::RoutingFault { .. })
    }
}
