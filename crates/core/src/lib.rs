//! Core domain types and shared logic for the Larder staleness oracle.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Last-mutation snapshots (schema -> table -> instant)
//! - Qualified and unqualified table references
//! - The tri-valued freshness answer
//! - Table-name extraction from native SQL text
//! - Warehouse and refresh configuration

pub mod answer;
pub mod config;
pub mod error;
pub mod query;
pub mod snapshot;
pub mod table_ref;

pub use answer::Freshness;
pub use config::{RefreshConfig, SslMode, WarehouseConfig};
pub use error::{Error, Result};
pub use query::{QuerySource, tables_in_query};
pub use snapshot::{Snapshot, SnapshotBuilder};
pub use table_ref::TableRef;

/// Suggested upper bound for external cache TTL policy, in seconds.
///
/// Advisory only: deployments may use this to cap how long cached results
/// live regardless of what the oracle answers. Nothing in this workspace
/// enforces it.
pub const MAX_TTL_SECONDS: u64 = 7200;
