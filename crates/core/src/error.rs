//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Core domain result type.
pub type Result<T> = std::result::Result<T, Error>;
