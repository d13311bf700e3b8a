//! Sharing a finished ring with concurrent readers.
//!
//! A [`SharedRing`] holds the current ring as an immutable snapshot. Readers
//! take an `Arc<Ring>` and route without further locking; a rebuild
//! installs a whole new ring in one write.

use crate::error::{Error, Result};
use crate::node::Peer;
use crate::ring::Ring;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Single-writer handle over immutable ring snapshots.
#[derive(Debug)]
pub struct SharedRing {
    current: RwLock<Arc<Ring>>,
}

impl SharedRing {
    /// Wraps a ring whose finger tables have been built.
    pub fn new(ring: Ring) -> Result<Self> {
        Self::check(&ring)?;
        Ok(Self {
            current: RwLock::new(Arc::new(ring)),
        })
    }

    /// The ring as of now. Later replacements do not affect it.
    pub fn snapshot(&self) -> Arc<Ring> {
        Arc::clone(&self.current.read())
    }

    /// Installs a rebuilt ring and returns the previous snapshot.
    pub fn replace(&self, ring: Ring) -> Result<Arc<Ring>> {
        Self::check(&ring)?;
        let next = Arc::new(ring);
        let mut current = self.current.write();
        debug!(nodes = next.len(), "Replacing ring snapshot");
        Ok(std::mem::replace(&mut *current, next))
    }

    fn check(ring: &Ring) -> Result<()> {
        if ring.has_finger_tables() {
            return Ok(());
        }
        let name = ring
            .nodes()
            .first()
            .map(|node| node.name().to_string())
            .unwrap_or_default();
        Err(Error::FingerTablesMissing(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Xxh3Hasher;
    use crate::id::IdentifierSpace;
    use crate::ring::{FingerAlgorithm, RingBuilder};
    use crate::router::Router;
    use std::thread;

    fn built(nodes: usize) -> Ring {
        let space = IdentifierSpace::new(32).unwrap();
        let mut ring = RingBuilder::new(Xxh3Hasher::new(space))
            .numbered(nodes)
            .build()
            .unwrap();
        ring.build_finger_tables(FingerAlgorithm::Search).unwrap();
        ring
    }

    #[test]
    fn test_rejects_ring_without_fingers() {
        let space = IdentifierSpace::new(32).unwrap();
        let ring = RingBuilder::new(Xxh3Hasher::new(space))
            .numbered(3)
            .build()
            .unwrap();
        assert!(matches!(SharedRing::new(ring), Err(Error::FingerTablesMissing(_))));
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let shared = SharedRing::new(built(4)).unwrap();
        let before = shared.snapshot();
        let previous = shared.replace(built(8)).unwrap();
        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.len(), 4);
        assert_eq!(shared.snapshot().len(), 8);
    }

    #[test]
    fn test_concurrent_readers() {
        let shared = Arc::new(SharedRing::new(built(16)).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let ring = shared.snapshot();
                    let router = Router::new(&ring).unwrap();
                    let start = ring.min_node();
                    let id = ring.node(ring.max_node()).id();
                    // Nothing is stored, so the lookup must fault rather than spin.
                    router.lookup(start, id).is_err()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
