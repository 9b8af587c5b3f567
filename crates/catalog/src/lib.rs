//! Warehouse catalog access for the Larder staleness oracle.
//!
//! This crate produces last-mutation snapshots on demand:
//! - The [`CatalogSource`] seam the refresher polls
//! - A Postgres-wire implementation over the warehouse insert log

pub mod error;
pub mod postgres;
pub mod source;

pub use error::{CatalogError, CatalogResult};
pub use postgres::PostgresCatalog;
pub use source::CatalogSource;

use larder_core::WarehouseConfig;
use std::sync::Arc;

/// Create a catalog source from configuration.
pub fn from_config(config: &WarehouseConfig) -> CatalogResult<Arc<dyn CatalogSource>> {
    let catalog = PostgresCatalog::from_config(config)?;
    Ok(Arc::new(catalog) as Arc<dyn CatalogSource>)
}
