//! Ranges on the identifier ring.

use crate::id::{Identifier, IdentifierSpace};
use serde::Serialize;
use std::fmt;

/// Half-open range `[start, end)` on the ring.
///
/// `start > end` wraps past zero. `start == end` is the whole ring. Every
/// ownership and routing test in the crate is phrased through this one
/// convention, so the other bracketings are provided as constructors:
///
/// - `(a, b]` is `[a + 1, b + 1)`, see [`Interval::open_closed`]
/// - `(a, b)` is `[a + 1, b)`, see [`Interval::open`]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Interval {
    start: Identifier,
    end: Identifier,
    empty: bool,
}

impl Interval {
    /// `[start, end)`.
    pub fn new(start: Identifier, end: Identifier) -> Self {
        Self {
            start,
            end,
            empty: false,
        }
    }

    /// `(from, to]`: the identifiers owned by `to` when `from` is its
    /// predecessor. When `from == to` this is the whole ring.
    pub fn open_closed(space: &IdentifierSpace, from: Identifier, to: Identifier) -> Self {
        Self::new(space.add(from, 1), space.add(to, 1))
    }

    /// `(from, to)`: identifiers strictly between `from` and `to` going
    /// clockwise. When `from == to` this is every identifier except `from`.
    pub fn open(space: &IdentifierSpace, from: Identifier, to: Identifier) -> Self {
        let start = space.add(from, 1);
        Self {
            start,
            end: to,
            // Adjacent positions, nothing lies strictly between them.
            empty: start == to,
        }
    }

    pub fn start(&self) -> Identifier {
        self.start
    }

    pub fn end(&self) -> Identifier {
        self.end
    }

    /// True if the interval holds no identifier.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Ring membership test. Wrapping and non-wrapping ranges are handled by
    /// the same comparison rules.
    pub fn contains(&self, id: Identifier) -> bool {
        if self.empty {
            return false;
        }
        if self.start < self.end {
            self.start <= id && id < self.end
        } else {
            id >= self.start || id < self.end
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty {
            write!(f, "[]")
        } else {
            write!(f, "[{}, {})", self.start, self.end)
        }
    }
}
