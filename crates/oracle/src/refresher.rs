//! The refresher contract and its two variants.

use crate::holder::SnapshotHolder;
use async_trait::async_trait;
use larder_catalog::CatalogSource;
use larder_core::Snapshot;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Consecutive failures tolerated before the snapshot is declared invalid.
/// Validity clears on the fourth failure in a run, not the third.
const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// A unit of scheduled refresh work.
///
/// The lifecycle controller binds the shared [`SnapshotHolder`] once at
/// construction, then invokes `tick` at a fixed cadence. Exactly one tick
/// runs at a time (single-writer). `is_valid` reports whether the held
/// snapshot is currently trustworthy.
#[async_trait]
pub trait Refresher: Send + Sync {
    /// Bind the holder this refresher publishes into.
    fn bind(&self, holder: Arc<SnapshotHolder>);

    /// Run one refresh. Failures are absorbed here; ticks never propagate
    /// errors to the scheduler.
    async fn tick(&self);

    /// Whether the held snapshot is trustworthy: at least one successful
    /// refresh has happened and no run of more than three failures since.
    fn is_valid(&self) -> bool;
}

/// Live refresher: polls a [`CatalogSource`] and publishes its snapshots.
pub struct CatalogRefresher {
    source: Arc<dyn CatalogSource>,
    holder: RwLock<Option<Arc<SnapshotHolder>>>,
    consecutive_failures: AtomicU32,
    valid: AtomicBool,
}

impl CatalogRefresher {
    /// Create a refresher over the given catalog source.
    ///
    /// Initial state: zero failures, invalid - validity is earned by the
    /// first successful refresh.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            holder: RwLock::new(None),
            consecutive_failures: AtomicU32::new(0),
            valid: AtomicBool::new(false),
        }
    }

    fn bound_holder(&self) -> Option<Arc<SnapshotHolder>> {
        self.holder
            .read()
            .expect("refresher holder lock poisoned")
            .clone()
    }
}

#[async_trait]
impl Refresher for CatalogRefresher {
    fn bind(&self, holder: Arc<SnapshotHolder>) {
        *self.holder.write().expect("refresher holder lock poisoned") = Some(holder);
    }

    async fn tick(&self) {
        let Some(holder) = self.bound_holder() else {
            tracing::warn!("Refresh tick before a snapshot holder was bound, skipping");
            return;
        };

        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                tracing::info!(
                    schemas = snapshot.schema_count(),
                    tables = snapshot.len(),
                    "Warehouse snapshot refreshed"
                );
                holder.publish(snapshot);
                self.consecutive_failures.store(0, Ordering::SeqCst);
                self.valid.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                // The previous snapshot stays published; only the failure
                // counter and validity flag change.
                let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::warn!(
                    error = %e,
                    consecutive_failures = failures,
                    "Failed to refresh warehouse snapshot"
                );
                if failures > MAX_CONSECUTIVE_FAILURES {
                    self.valid.store(false, Ordering::SeqCst);
                    tracing::error!(
                        consecutive_failures = failures,
                        "Snapshot marked invalid until a refresh succeeds"
                    );
                }
            }
        }
    }

    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }
}

/// Test-double refresher holding a preloaded snapshot.
///
/// Publishes the snapshot into the bound holder on the first tick, is a
/// no-op afterwards, and always reports valid.
pub struct FixedRefresher {
    snapshot: Mutex<Option<Snapshot>>,
    holder: RwLock<Option<Arc<SnapshotHolder>>>,
}

impl FixedRefresher {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            holder: RwLock::new(None),
        }
    }
}

#[async_trait]
impl Refresher for FixedRefresher {
    fn bind(&self, holder: Arc<SnapshotHolder>) {
        *self.holder.write().expect("refresher holder lock poisoned") = Some(holder);
    }

    async fn tick(&self) {
        let holder = self
            .holder
            .read()
            .expect("refresher holder lock poisoned")
            .clone();
        let Some(holder) = holder else { return };

        let pending = self
            .snapshot
            .lock()
            .expect("fixed refresher lock poisoned")
            .take();
        if let Some(snapshot) = pending {
            holder.publish(snapshot);
        }
    }

    fn is_valid(&self) -> bool {
        true
    }
}
