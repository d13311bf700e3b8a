//! Core hasher trait definitions.

use crate::id::{Identifier, IdentifierSpace};

/// Maps names onto the identifier ring (consistent hashing).
///
/// Hashers are stateless apart from the identifier space, so one instance is
/// shared by the node and key stages; that is what puts nodes and keys on
/// the same ring.
pub trait IdentifierHasher: Send + Sync + 'static {
    /// Digests `bytes` into 64 bits. Only the low `m` bits are kept.
    fn digest(&self, bytes: &[u8]) -> u64;

    /// Identifier space this hasher reduces into.
    fn space(&self) -> IdentifierSpace;

    /// Returns the name of this hasher.
    fn name(&self) -> &'static str;

    /// Hashes a name to an identifier in `[0, 2^m)`.
    fn hash(&self, name: &str) -> Identifier {
        self.space().wrap(self.digest(name.as_bytes()))
    }
}

impl<H: IdentifierHasher + ?Sized> IdentifierHasher for Box<H> {
    fn digest(&self, bytes: &[u8]) -> u64 {
        (**self).digest(bytes)
    }

    fn space(&self) -> IdentifierSpace {
        (**self).space()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
