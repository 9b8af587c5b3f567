//! The tri-valued freshness decision.

use larder_core::{Freshness, Snapshot, TableRef};
use time::OffsetDateTime;

/// Decide whether a cached result timestamped at `cutoff` may still be
/// served, given the tables its query reads.
///
/// Resolution per reference:
/// - Qualified `SCHEMA.TABLE`: an unknown schema or table forbids a
///   recommendation (pass); a known table mutated after `cutoff` is stale.
/// - Unqualified `TABLE`: every schema containing a table of that name is
///   checked; a mutation after `cutoff` in any of them is stale. A name
///   found in no schema forbids a recommendation (pass).
///
/// Staleness wins over a pass: an unknown reference only yields a pass
/// after every remaining reference has been scanned without finding a
/// table mutated past `cutoff`. The answer therefore never depends on
/// reference order.
///
/// The comparison is strictly less-than: a table mutated exactly at
/// `cutoff` still counts as fresh. An empty reference set is fresh.
pub fn evaluate<S, I>(snapshot: &Snapshot, tables: I, cutoff: OffsetDateTime) -> Freshness
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    let mut unknown = false;

    for raw in tables {
        match TableRef::parse(raw.as_ref()) {
            TableRef::Qualified { schema, table } => match snapshot.get(&schema, &table) {
                None => unknown = true,
                Some(last_updated) if cutoff < last_updated => return Freshness::Stale,
                Some(_) => {}
            },
            TableRef::Unqualified { table } => {
                let mut found = false;
                for (_, last_updated) in snapshot.tables_named(&table) {
                    found = true;
                    if cutoff < last_updated {
                        return Freshness::Stale;
                    }
                }
                if !found {
                    unknown = true;
                }
            }
        }
    }

    if unknown { Freshness::Pass } else { Freshness::Fresh }
}
