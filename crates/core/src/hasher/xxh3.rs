//! xxh3 hasher, the default.

use crate::hasher::traits::IdentifierHasher;
use crate::id::IdentifierSpace;
use xxhash_rust::xxh3::xxh3_64;

/// Hashes names with 64-bit xxh3.
#[derive(Clone, Copy, Debug)]
pub struct Xxh3Hasher {
    space: IdentifierSpace,
}

impl Xxh3Hasher {
    pub fn new(space: IdentifierSpace) -> Self {
        Self { space }
    }
}

impl IdentifierHasher for Xxh3Hasher {
    fn digest(&self, bytes: &[u8]) -> u64 {
        xxh3_64(bytes)
    }

    fn space(&self) -> IdentifierSpace {
        self.space
    }

    fn name(&self) -> &'static str {
        "xxh3"
    }
}
