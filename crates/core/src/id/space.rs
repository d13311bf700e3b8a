//! Modular arithmetic on the identifier ring.

use crate::error::{Error, Result};
use crate::id::Identifier;
use serde::{Deserialize, Serialize};

/// Largest supported bit length. `2^m` must fit in a `u64`.
pub const MAX_BITS: u32 = 63;

/// The identifier ring `[0, 2^m)`.
///
/// All ring arithmetic goes through this type so that every stage (hashing,
/// finger starts, interval tests) wraps at the same boundary.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct IdentifierSpace {
    bits: u32,
}

impl IdentifierSpace {
    /// Creates the space of `m`-bit identifiers.
    ///
    /// Fails with [`Error::InvalidBitLength`] unless `1 <= m <= 63`.
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > MAX_BITS {
            return Err(Error::InvalidBitLength(bits));
        }
        Ok(Self { bits })
    }

    /// Bit length `m`.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of positions on the ring, `2^m`.
    #[inline]
    pub fn size(&self) -> u64 {
        1u64 << self.bits
    }

    #[inline]
    fn mask(&self) -> u64 {
        self.size() - 1
    }

    /// Reduces an arbitrary 64-bit value onto the ring.
    #[inline]
    pub fn wrap(&self, value: u64) -> Identifier {
        Identifier(value & self.mask())
    }

    /// True if `id` lies on this ring.
    #[inline]
    pub fn contains(&self, id: Identifier) -> bool {
        id.0 <= self.mask()
    }

    /// `(id + offset) mod 2^m`.
    #[inline]
    pub fn add(&self, id: Identifier, offset: u64) -> Identifier {
        self.wrap(id.0.wrapping_add(offset))
    }

    /// Clockwise distance from `from` to `to`, in `[0, 2^m)`.
    #[inline]
    pub fn distance(&self, from: Identifier, to: Identifier) -> u64 {
        to.0.wrapping_sub(from.0) & self.mask()
    }

    /// Start of routing entry `index` (1-based) for the node at `id`:
    /// `(id + 2^(index-1)) mod 2^m`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside `1..=m`.
    #[inline]
    pub fn finger_start(&self, id: Identifier, index: u32) -> Identifier {
        assert!(
            (1..=self.bits).contains(&index),
            "finger index {} out of range 1..={}",
            index,
            self.bits
        );
        self.add(id, 1u64 << (index - 1))
    }
}
