//! Postgres-wire catalog source for Redshift-style warehouses.

use crate::error::{CatalogError, CatalogResult};
use crate::source::CatalogSource;
use async_trait::async_trait;
use larder_core::{Snapshot, SslMode, WarehouseConfig};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{Pool, Postgres, Row};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Last-mutation times per table, derived from the warehouse insert log
/// (max end time per relation) joined with the relation/namespace catalog.
/// `last_updated` is selected as text so the sub-second fraction can be
/// dropped by truncation, matching the snapshot's second precision.
const LAST_UPDATED_QUERY: &str = r#"
    WITH lastupdate AS (
        SELECT tbl, MAX(endtime) AS last_updated
        FROM stl_insert
        GROUP BY tbl
    ),
    table_names AS (
        SELECT relname::char(100) AS table_name, n.nspname AS schema, pg_class.oid
        FROM pg_class
        JOIN pg_catalog.pg_namespace n ON n.oid = pg_class.relnamespace
    )
    SELECT lastupdate.tbl, table_names.schema, table_names.table_name,
           lastupdate.last_updated::text AS last_updated
    FROM lastupdate
    JOIN table_names ON lastupdate.tbl = table_names.oid
"#;

/// Warehouse timestamps after truncation: `YYYY-MM-DD HH:MM:SS`, UTC.
const LAST_UPDATED_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Catalog source backed by a Redshift-compatible Postgres endpoint.
pub struct PostgresCatalog {
    pool: Pool<Postgres>,
}

impl PostgresCatalog {
    /// Build a catalog source from warehouse configuration.
    ///
    /// The pool is lazy: no connection is opened here. Each fetch acquires
    /// a connection (bounded by the configured connect timeout) and releases
    /// it before the snapshot is returned, so failures surface per tick and
    /// published snapshots never hold driver resources.
    pub fn from_config(config: &WarehouseConfig) -> CatalogResult<Self> {
        config
            .validate()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        let ssl_mode = match config.ssl_mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        };

        let opts = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.database)
            .ssl_mode(ssl_mode)
            .options([(
                "statement_timeout",
                format!("{}ms", config.statement_timeout_secs * 1000),
            )]);

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            username = %config.username,
            ssl_mode = ?config.ssl_mode,
            "Configured warehouse catalog source"
        );

        // One connection is enough: the refresher is the only caller and
        // runs one fetch at a time.
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(config.connect_timeout())
            .connect_lazy_with(opts);

        Ok(Self { pool })
    }

    fn parse_last_updated(raw: &str) -> CatalogResult<OffsetDateTime> {
        // Truncate at the first '.' to drop the sub-second fraction.
        let truncated = raw.split('.').next().unwrap_or(raw).trim();
        let parsed = PrimitiveDateTime::parse(truncated, LAST_UPDATED_FORMAT).map_err(|e| {
            CatalogError::MalformedTimestamp {
                value: raw.to_string(),
                source: e,
            }
        })?;
        Ok(parsed.assume_utc())
    }
}

#[async_trait]
impl CatalogSource for PostgresCatalog {
    async fn fetch_snapshot(&self) -> CatalogResult<Snapshot> {
        let rows = sqlx::query(LAST_UPDATED_QUERY).fetch_all(&self.pool).await?;

        let mut builder = Snapshot::builder();
        for row in &rows {
            let schema: String = row.try_get("schema")?;
            let table: String = row.try_get("table_name")?;
            let last_updated: String = row.try_get("last_updated")?;
            // Any malformed row fails the whole fetch; the refresher keeps
            // the previous snapshot rather than publishing a partial one.
            builder.record(&schema, &table, Self::parse_last_updated(&last_updated)?);
        }

        let snapshot = builder.build();
        tracing::debug!(
            schemas = snapshot.schema_count(),
            tables = snapshot.len(),
            "Fetched warehouse snapshot"
        );
        Ok(snapshot)
    }
}
