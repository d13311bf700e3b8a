//! Consistent hashing of names onto the identifier ring.
//!
//! Hashers convert node and key names into identifiers. Every hasher
//! reduces a 64-bit digest to the low `m` bits of the ring.

pub mod blake3;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use self::blake3::Blake3Hasher;
pub use self::sip::SipIdentifierHasher;
pub use self::traits::IdentifierHasher;
pub use self::xxh3::Xxh3Hasher;

use crate::id::IdentifierSpace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects one of the built-in hashers.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    #[default]
    Xxh3,
    Sip,
    Blake3,
}

impl HasherKind {
    /// Builds the selected hasher over `space`.
    pub fn build(self, space: IdentifierSpace) -> Box<dyn IdentifierHasher> {
        match self {
            HasherKind::Xxh3 => Box::new(Xxh3Hasher::new(space)),
            HasherKind::Sip => Box::new(SipIdentifierHasher::new(space)),
            HasherKind::Blake3 => Box::new(Blake3Hasher::new(space)),
        }
    }
}

impl fmt::Display for HasherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HasherKind::Xxh3 => "xxh3",
            HasherKind::Sip => "sip",
            HasherKind::Blake3 => "blake3",
        };
        f.write_str(name)
    }
}

impl FromStr for HasherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xxh3" => Ok(HasherKind::Xxh3),
            "sip" => Ok(HasherKind::Sip),
            "blake3" => Ok(HasherKind::Blake3),
            other => Err(format!("unknown hasher: {}", other)),
        }
    }
}
