//! Last-mutation snapshots.
//!
//! A [`Snapshot`] maps `schema -> table -> last-mutation instant` as observed
//! in the warehouse system catalog at one refresh. Snapshots are immutable
//! once built; the refresher replaces the published snapshot wholesale and
//! never mutates one in place.

use std::collections::HashMap;
use time::OffsetDateTime;

/// Normalize a schema or table key: trim surrounding whitespace, upper-case.
fn fold_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Immutable mapping of schema -> table -> last-mutation instant.
///
/// All keys are upper-cased and trimmed; instants carry second precision
/// (sub-second digits dropped). Lookups fold their arguments the same way,
/// so matching is case-insensitive end to end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    schemas: HashMap<String, HashMap<String, OffsetDateTime>>,
}

impl Snapshot {
    /// An empty snapshot: no schemas, no tables.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a snapshot.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Last-mutation instant for an exact `schema.table` pair, if known.
    pub fn get(&self, schema: &str, table: &str) -> Option<OffsetDateTime> {
        self.schemas
            .get(&fold_key(schema))
            .and_then(|tables| tables.get(&fold_key(table)))
            .copied()
    }

    /// All `(schema, instant)` pairs for a table name, across every schema.
    ///
    /// Used for unqualified references, which must be checked against every
    /// schema that contains a table of that name.
    pub fn tables_named<'a>(
        &'a self,
        table: &str,
    ) -> impl Iterator<Item = (&'a str, OffsetDateTime)> + 'a {
        let table = fold_key(table);
        self.schemas.iter().filter_map(move |(schema, tables)| {
            tables
                .get(&table)
                .map(|instant| (schema.as_str(), *instant))
        })
    }

    /// True if the snapshot holds no schemas at all.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Total number of tables across all schemas.
    pub fn len(&self) -> usize {
        self.schemas.values().map(HashMap::len).sum()
    }

    /// Number of schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

/// Builder that normalizes keys and instants while a snapshot is assembled.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    schemas: HashMap<String, HashMap<String, OffsetDateTime>>,
}

impl SnapshotBuilder {
    /// Record one `(schema, table, last-mutation)` row.
    ///
    /// Keys are trimmed and upper-cased; the instant is truncated to whole
    /// seconds. A later record for the same pair wins.
    pub fn record(&mut self, schema: &str, table: &str, last_updated: OffsetDateTime) -> &mut Self {
        // Truncating through the unix timestamp drops any sub-second part
        // and pins the instant to UTC.
        let truncated = OffsetDateTime::from_unix_timestamp(last_updated.unix_timestamp())
            .unwrap_or(last_updated);
        self.schemas
            .entry(fold_key(schema))
            .or_default()
            .insert(fold_key(table), truncated);
        self
    }

    /// Freeze into an immutable [`Snapshot`].
    pub fn build(self) -> Snapshot {
        Snapshot {
            schemas: self.schemas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn keys_are_folded_on_insert_and_lookup() {
        let mut builder = Snapshot::builder();
        builder.record("  public ", "orders", datetime!(2024-01-01 00:00:00 UTC));
        let snapshot = builder.build();

        assert!(snapshot.get("PUBLIC", "ORDERS").is_some());
        assert!(snapshot.get("public", "Orders").is_some());
        assert!(snapshot.get("analytics", "orders").is_none());
    }

    #[test]
    fn instants_are_truncated_to_seconds() {
        let mut builder = Snapshot::builder();
        builder.record("s", "t", datetime!(2024-01-01 00:00:00.987 UTC));
        let snapshot = builder.build();

        assert_eq!(
            snapshot.get("S", "T"),
            Some(datetime!(2024-01-01 00:00:00 UTC))
        );
    }

    #[test]
    fn tables_named_scans_every_schema() {
        let mut builder = Snapshot::builder();
        builder.record("public", "orders", datetime!(2024-01-01 00:00:00 UTC));
        builder.record("analytics", "orders", datetime!(2023-12-31 23:59:59 UTC));
        builder.record("analytics", "users", datetime!(2024-01-02 00:00:00 UTC));
        let snapshot = builder.build();

        let mut schemas: Vec<&str> = snapshot.tables_named("Orders").map(|(s, _)| s).collect();
        schemas.sort_unstable();
        assert_eq!(schemas, vec!["ANALYTICS", "PUBLIC"]);
        assert_eq!(snapshot.tables_named("missing").count(), 0);
    }

    #[test]
    fn empty_snapshot_has_no_tables() {
        let snapshot = Snapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert_eq!(snapshot.schema_count(), 0);
    }

    #[test]
    fn later_record_for_same_pair_wins() {
        let mut builder = Snapshot::builder();
        builder.record("s", "t", datetime!(2024-01-01 00:00:00 UTC));
        builder.record("S", "T", datetime!(2024-02-01 00:00:00 UTC));
        let snapshot = builder.build();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get("s", "t"),
            Some(datetime!(2024-02-01 00:00:00 UTC))
        );
    }
}
