//! Chord ring implementation.
//!
//! The ring orders nodes by identifier, links each to its successor and
//! carries the per-node finger tables used for routing.

pub mod finger;
pub mod interval;
pub mod ring;

pub use finger::{FingerAlgorithm, FingerEntry, FingerTable, FingerTableBuilder};
pub use interval::Interval;
pub use ring::{NetworkView, Ring, RingBuilder, Walk};
