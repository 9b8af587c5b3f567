//! The catalog source seam.

use crate::error::CatalogResult;
use async_trait::async_trait;
use larder_core::Snapshot;

/// Produces one fresh last-mutation snapshot per call.
///
/// Implementations must return a fully self-contained [`Snapshot`]: no
/// driver handles, no partial state. A fetch either yields a complete
/// snapshot or an error - there is no partial publication.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Query the warehouse catalog and build a snapshot of per-table
    /// last-mutation times.
    async fn fetch_snapshot(&self) -> CatalogResult<Snapshot>;
}
