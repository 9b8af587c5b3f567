//! Catalog source error types.

use thiserror::Error;

/// Catalog fetch errors.
///
/// The refresher treats every variant the same way: the tick counts as one
/// failure and no snapshot is published. The distinction exists for logging.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("malformed last_updated timestamp {value:?}: {source}")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
