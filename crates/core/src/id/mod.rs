//! Identifier abstractions for the Chord ring.
//!
//! Nodes and keys share one identifier space: integers in `[0, 2^m)` where
//! `m` is fixed for the lifetime of a ring.

pub mod identifier;
pub mod space;

pub use identifier::Identifier;
pub use space::{IdentifierSpace, MAX_BITS};
