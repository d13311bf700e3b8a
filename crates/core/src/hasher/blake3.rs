//! BLAKE3 hasher.

use crate::hasher::traits::IdentifierHasher;
use crate::id::IdentifierSpace;

/// Hashes names with BLAKE3 and keeps the first eight digest bytes
/// (little endian).
#[derive(Clone, Copy, Debug)]
pub struct Blake3Hasher {
    space: IdentifierSpace,
}

impl Blake3Hasher {
    pub fn new(space: IdentifierSpace) -> Self {
        Self { space }
    }
}

impl IdentifierHasher for Blake3Hasher {
    fn digest(&self, bytes: &[u8]) -> u64 {
        let hash = blake3::hash(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    fn space(&self) -> IdentifierSpace {
        self.space
    }

    fn name(&self) -> &'static str {
        "blake3"
    }
}
