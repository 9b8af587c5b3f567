//! Common test fixtures and catalog doubles.

use async_trait::async_trait;
use larder_catalog::{CatalogError, CatalogResult, CatalogSource};
use larder_core::Snapshot;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use time::macros::datetime;

/// Epoch millis for 2024-01-01T00:00:00Z.
#[allow(dead_code)]
pub const T0_MILLIS: i64 = 1_704_067_200_000;

/// Epoch millis for 2024-01-02T00:00:00Z.
#[allow(dead_code)]
pub const T1_MILLIS: i64 = 1_704_153_600_000;

/// The reference snapshot from the design scenarios.
#[allow(dead_code)]
pub fn scenario_snapshot() -> Snapshot {
    let mut builder = Snapshot::builder();
    builder.record("PUBLIC", "ORDERS", datetime!(2024-01-01 00:00:00 UTC));
    builder.record("PUBLIC", "USERS", datetime!(2024-01-02 00:00:00 UTC));
    builder.record("ANALYTICS", "ORDERS", datetime!(2023-12-31 23:59:59 UTC));
    builder.build()
}

/// Scripted outcome for one `fetch_snapshot` call.
pub enum Outcome {
    Ok(Snapshot),
    Fail,
}

/// Catalog double that replays a fixed script of outcomes.
///
/// Once the script runs out, further fetches fail.
pub struct ScriptedCatalog {
    script: Mutex<VecDeque<Outcome>>,
}

impl ScriptedCatalog {
    pub fn new(script: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// A catalog that fails every fetch.
    #[allow(dead_code)]
    pub fn always_failing() -> Self {
        Self::new([])
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    async fn fetch_snapshot(&self) -> CatalogResult<Snapshot> {
        let outcome = self.script.lock().unwrap().pop_front();
        match outcome {
            Some(Outcome::Ok(snapshot)) => Ok(snapshot),
            Some(Outcome::Fail) | None => {
                Err(CatalogError::Config("scripted failure".to_string()))
            }
        }
    }
}

/// Catalog double that alternates between two snapshots on every fetch.
#[allow(dead_code)]
pub struct AlternatingCatalog {
    snapshots: [Snapshot; 2],
    fetches: AtomicUsize,
}

#[allow(dead_code)]
impl AlternatingCatalog {
    pub fn new(first: Snapshot, second: Snapshot) -> Self {
        Self {
            snapshots: [first, second],
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for AlternatingCatalog {
    async fn fetch_snapshot(&self) -> CatalogResult<Snapshot> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshots[n % 2].clone())
    }
}
