//! Freshness oracle for a query-result cache fronting an analytical warehouse.
//!
//! This crate provides the runtime:
//! - An atomically replaceable snapshot holder shared between the single
//!   refresh writer and any number of concurrent decision readers
//! - The refresher contract with a catalog-backed variant and a preloaded
//!   test double
//! - The tri-valued freshness decision
//! - The [`Larder`] lifecycle controller that owns the background refresh
//!   task and exposes the decision API
//!
//! ```no_run
//! use larder_core::{Freshness, RefreshConfig, SslMode, WarehouseConfig};
//! use larder_oracle::Larder;
//!
//! # async fn example() -> larder_catalog::CatalogResult<()> {
//! let warehouse = WarehouseConfig {
//!     host: "cluster.example.com".into(),
//!     port: 5439,
//!     username: "oracle".into(),
//!     password: "secret".into(),
//!     database: "analytics".into(),
//!     ssl_mode: SslMode::VerifyFull,
//!     connect_timeout_secs: 5,
//!     statement_timeout_secs: 5,
//! };
//! let larder = Larder::connect(&RefreshConfig::every(60), &warehouse)?;
//!
//! match larder.should_return_cached("public.orders", 1_704_067_200_000) {
//!     Freshness::Fresh => { /* serve the cached result */ }
//!     Freshness::Stale => { /* re-run the query */ }
//!     Freshness::Pass => { /* no recommendation; caller decides */ }
//! }
//! # Ok(())
//! # }
//! ```

pub mod decision;
pub mod holder;
pub mod larder;
pub mod refresher;

pub use decision::evaluate;
pub use holder::SnapshotHolder;
pub use larder::Larder;
pub use refresher::{CatalogRefresher, FixedRefresher, Refresher};
