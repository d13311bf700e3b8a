//! Ring identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position on the identifier ring.
///
/// Newtype over `u64`; the ring it lives on is described by an
/// [`IdentifierSpace`](super::IdentifierSpace), which bounds the value to
/// `[0, 2^m)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(pub u64);

impl Identifier {
    /// Raw integer value.
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Identifier(value)
    }
}
