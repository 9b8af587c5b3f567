//! Configuration types shared across crates.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// SSL mode for warehouse connections.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    /// Disable SSL/TLS entirely. For local development only.
    Disable,
    /// Require SSL/TLS but skip certificate verification.
    Require,
    /// Require SSL/TLS and verify the certificate chain.
    VerifyCa,
    /// Require SSL/TLS with full certificate and hostname verification
    /// (default - the oracle talks to a production warehouse).
    #[default]
    VerifyFull,
}

/// Warehouse connection configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Warehouse host (e.g., "cluster.abc123.us-east-1.redshift.amazonaws.com").
    pub host: String,
    /// Warehouse port (default: 5439).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Database username.
    pub username: String,
    /// Database password.
    /// WARNING: Prefer injecting this at runtime over storing it in config files.
    pub password: String,
    /// Database name.
    pub database: String,
    /// SSL mode for connections (default: verify-full).
    #[serde(default)]
    pub ssl_mode: SslMode,
    /// Connection acquisition timeout in seconds (default: 5).
    /// Refresh ticks block on the warehouse for at most this long before
    /// counting as a failure.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Statement timeout in seconds (default: 5). The warehouse cancels
    /// catalog queries that exceed this duration.
    #[serde(default = "default_statement_timeout_secs")]
    pub statement_timeout_secs: u64,
}

impl WarehouseConfig {
    /// Validate that the fields required to open a connection are present.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("warehouse host must not be empty".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(Error::Config(
                "warehouse database must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Connection acquisition timeout as a Duration.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Background refresh configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between snapshot refreshes (default: 60).
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl RefreshConfig {
    /// Refresh interval for a given period in seconds.
    pub fn every(refresh_secs: u64) -> Self {
        Self { refresh_secs }
    }

    /// Refresh period as a Duration.
    ///
    /// Clamped to at least one second: a zero interval would make the
    /// scheduler panic.
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

fn default_port() -> u16 {
    5439
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_statement_timeout_secs() -> u64 {
    5
}

fn default_refresh_secs() -> u64 {
    60
}
