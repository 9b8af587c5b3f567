//! The single-slot snapshot holder.

use larder_core::Snapshot;
use std::sync::{Arc, RwLock};

/// Atomically replaceable holder for the current [`Snapshot`].
///
/// The refresher is the only writer; decision calls are the readers. A
/// reader clones the inner `Arc` once per call and performs every lookup
/// against that local reference, so a concurrent publish can never tear a
/// decision across two snapshots. Published snapshots are immutable;
/// `publish` replaces the slot wholesale.
///
/// Starts out holding an empty snapshot: until the first successful refresh
/// every non-empty reference set resolves to a pass answer.
#[derive(Debug)]
pub struct SnapshotHolder {
    inner: RwLock<Arc<Snapshot>>,
}

impl SnapshotHolder {
    /// Create a holder populated with the empty snapshot.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    /// Get the current snapshot.
    ///
    /// The returned `Arc` stays valid across concurrent publishes; callers
    /// keep reading the snapshot they loaded until they drop it.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn current(&self) -> Arc<Snapshot> {
        self.inner
            .read()
            .expect("snapshot holder lock poisoned")
            .clone()
    }

    /// Atomically replace the held snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn publish(&self, snapshot: Snapshot) {
        let mut guard = self.inner.write().expect("snapshot holder lock poisoned");
        *guard = Arc::new(snapshot);
    }
}

impl Default for SnapshotHolder {
    fn default() -> Self {
        Self::new()
    }
}
