//! Qualified and unqualified table references.

/// A table reference as presented to the oracle.
///
/// Matching is case-insensitive: `parse` upper-cases and trims, so the
/// variants always hold folded names that line up with snapshot keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableRef {
    /// `SCHEMA.TABLE` - looked up exactly.
    Qualified { schema: String, table: String },
    /// Bare `TABLE` - checked against every schema in the snapshot.
    Unqualified { table: String },
}

impl TableRef {
    /// Parse a raw reference.
    ///
    /// The dot is the sole qualifier separator. References with more than
    /// one dot keep only the first two segments (`db.schema.table` is read
    /// as schema `DB`, table `SCHEMA`); anything past the second segment is
    /// discarded. A reference like `A.` yields an empty table name, which
    /// can never match a snapshot key and therefore resolves to a pass.
    pub fn parse(raw: &str) -> Self {
        let folded = raw.trim().to_uppercase();
        match folded.split_once('.') {
            Some((schema, rest)) => {
                let table = rest.split('.').next().unwrap_or_default();
                TableRef::Qualified {
                    schema: schema.to_string(),
                    table: table.to_string(),
                }
            }
            None => TableRef::Unqualified { table: folded },
        }
    }
}
