//! SipHash-1-3 hasher.

use crate::hasher::traits::IdentifierHasher;
use crate::id::IdentifierSpace;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Hashes names with SipHash-1-3 under fixed zero keys, so identifiers are
/// stable across processes.
#[derive(Clone, Copy, Debug)]
pub struct SipIdentifierHasher {
    space: IdentifierSpace,
}

impl SipIdentifierHasher {
    pub fn new(space: IdentifierSpace) -> Self {
        Self { space }
    }
}

impl IdentifierHasher for SipIdentifierHasher {
    fn digest(&self, bytes: &[u8]) -> u64 {
        let mut hasher = SipHasher13::new();
        hasher.write(bytes);
        hasher.finish()
    }

    fn space(&self) -> IdentifierSpace {
        self.space
    }

    fn name(&self) -> &'static str {
        "sip"
    }
}
