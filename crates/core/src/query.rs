//! Table-name extraction from native SQL text.
//!
//! The extraction rule is deliberately naive: the token following each
//! occurrence of `from` up to the next whitespace. It may over- or
//! under-match (subqueries, string literals, `delete from` ...), which is
//! safe because unrecognized names resolve to a pass answer rather than a
//! wrong recommendation.

use regex::Regex;
use std::sync::LazyLock;

/// Token immediately following `from`, up to the next whitespace or end of
/// string. Case-insensitive; qualification dots pass through untouched.
static FROM_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)from\s*(?P<table>\S*)(?:\s|$)").expect("from-table pattern must compile")
});

/// Anything that can surface the native SQL text of a query payload.
///
/// The oracle's query overload only needs the raw SQL string; this seam
/// keeps it decoupled from whatever structure the caller wraps queries in.
pub trait QuerySource {
    fn native_sql_text(&self) -> &str;
}

impl QuerySource for str {
    fn native_sql_text(&self) -> &str {
        self
    }
}

impl QuerySource for String {
    fn native_sql_text(&self) -> &str {
        self
    }
}

/// Extract candidate table names from SQL text.
///
/// Tokens are upper-cased and returned in match order, without
/// de-duplication.
pub fn tables_in_query(text: &str) -> Vec<String> {
    FROM_TABLE
        .captures_iter(text)
        .map(|captures| captures["table"].to_uppercase())
        .collect()
}
