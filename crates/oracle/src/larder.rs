//! The lifecycle controller and public decision API.

use crate::decision::evaluate;
use crate::holder::SnapshotHolder;
use crate::refresher::{CatalogRefresher, Refresher};
use larder_catalog::CatalogResult;
use larder_core::{
    Freshness, MAX_TTL_SECONDS, QuerySource, RefreshConfig, WarehouseConfig, tables_in_query,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// The staleness oracle.
///
/// Owns the snapshot holder and the background task that refreshes it at a
/// fixed cadence, starting immediately. Decision calls are cheap (one
/// atomic snapshot load, no I/O) and may run from any number of tasks
/// concurrently; the refresher is the only writer.
///
/// Answers are advisory. When the snapshot is empty or a referenced table
/// is unknown the oracle answers [`Freshness::Pass`] rather than guessing,
/// and it keeps serving from the last known snapshot even after refreshes
/// start failing - callers that want to short-circuit in that state consult
/// [`is_valid`](Larder::is_valid).
pub struct Larder {
    holder: Arc<SnapshotHolder>,
    refresher: Arc<dyn Refresher>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Larder {
    /// Build the catalog-backed oracle and start refreshing.
    ///
    /// Must be called within a tokio runtime. No connection is opened here;
    /// the first refresh tick (immediate) performs the first catalog query.
    pub fn connect(refresh: &RefreshConfig, warehouse: &WarehouseConfig) -> CatalogResult<Self> {
        let source = larder_catalog::from_config(warehouse)?;
        let refresher = Arc::new(CatalogRefresher::new(source));
        Ok(Self::with_refresher(refresh, refresher))
    }

    /// Build the oracle around a custom refresher and start refreshing.
    ///
    /// Must be called within a tokio runtime.
    pub fn with_refresher(refresh: &RefreshConfig, refresher: Arc<dyn Refresher>) -> Self {
        let holder = Arc::new(SnapshotHolder::new());
        refresher.bind(holder.clone());
        let task = spawn_refresh_loop(refresher.clone(), refresh.period());
        Self {
            holder,
            refresher,
            task: Mutex::new(Some(task)),
        }
    }

    /// Stop future refresh ticks and abort any in-progress refresh.
    ///
    /// Partial work from an aborted refresh is discarded, never published.
    /// Returns true if cancellation took effect (the task was still
    /// running); false if it had already been cancelled.
    pub fn cancel(&self) -> bool {
        let mut slot = self.task.lock().expect("refresh task lock poisoned");
        match slot.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    /// Whether the current snapshot is trustworthy (forwards to the
    /// refresher's validity flag).
    pub fn is_valid(&self) -> bool {
        self.refresher.is_valid()
    }

    /// Suggested upper bound for external cache TTL policy, in seconds.
    pub fn max_ttl_seconds(&self) -> u64 {
        MAX_TTL_SECONDS
    }

    /// Decide for a single table reference.
    ///
    /// `last_updated_millis` is the cached result's timestamp in
    /// milliseconds since the UNIX epoch, UTC.
    pub fn should_return_cached(&self, table: &str, last_updated_millis: i64) -> Freshness {
        self.should_return_cached_all([table], last_updated_millis)
    }

    /// Decide for a set of table references.
    ///
    /// Infallible: decision-time faults (such as an out-of-range timestamp)
    /// are absorbed into [`Freshness::Pass`]. Exactly one snapshot is
    /// loaded per call; every lookup within the call uses it.
    pub fn should_return_cached_all<I, S>(&self, tables: I, last_updated_millis: i64) -> Freshness
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let Some(cutoff) = cutoff_from_millis(last_updated_millis) else {
            tracing::warn!(
                last_updated_millis,
                "Cached-result timestamp out of range, declining to recommend"
            );
            return Freshness::Pass;
        };
        let snapshot = self.holder.current();
        evaluate(&snapshot, tables, cutoff)
    }

    /// Decide for a query payload, extracting table names from its native
    /// SQL text.
    pub fn should_return_cached_query<Q>(&self, query: &Q, last_updated_millis: i64) -> Freshness
    where
        Q: QuerySource + ?Sized,
    {
        let tables = tables_in_query(query.native_sql_text());
        self.should_return_cached_all(tables, last_updated_millis)
    }
}

impl Drop for Larder {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run the refresher at a fixed period, first tick immediately.
///
/// Skips missed ticks instead of bunching them, so a refresh that overruns
/// the period is followed by one tick, never a burst of concurrent ones.
fn spawn_refresh_loop(refresher: Arc<dyn Refresher>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            refresher.tick().await;
        }
    })
}

fn cutoff_from_millis(millis: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}
