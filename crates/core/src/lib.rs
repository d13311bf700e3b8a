//! Core library for the Chord distributed hash table.
//!
//! This crate provides the protocol engine:
//! - Identifier space and consistent hashing of names
//! - Ring overlay construction with successor links
//! - Finger-table construction
//! - Key placement and greedy finger routing

pub mod error;
pub mod hasher;
pub mod id;
pub mod keys;
pub mod node;
pub mod ring;
pub mod router;
pub mod shared;
pub mod topology;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};
pub use hasher::{Blake3Hasher, HasherKind, IdentifierHasher, SipIdentifierHasher, Xxh3Hasher};
pub use id::{Identifier, IdentifierSpace};
pub use keys::{Key, KeyAssignment};
pub use node::{Node, NodeIndex, Peer};
pub use ring::{FingerAlgorithm, FingerTable, FingerTableBuilder, Interval, Ring, RingBuilder};
pub use router::{LookupResult, Router};
pub use shared::SharedRing;
pub use topology::Topology;
