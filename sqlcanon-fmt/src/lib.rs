//! # sqlcanon-fmt
//!
//! Renders `sqlcanon-scrub`'s canonical JSON parse tree back into SQL text.
//! This is the mirror image of scrubbing: where scrubbing throws away
//! dialect-specific spelling and grouping in favor of one canonical shape,
//! formatting reconstructs a single, ANSI-flavored spelling of that shape.
//! The two are not expected to round-trip byte-for-byte (the tree has
//! already forgotten, e.g., whether a `JOIN` was spelled `INNER JOIN`), but
//! re-parsing and re-scrubbing formatted output must reproduce the same
//! tree.

mod error;
mod expr;
mod precedence;
mod query;
mod quote;
mod statement;

use std::sync::Arc;

use serde_json::Value;

pub use crate::error::FormatError;

/// Controls how the formatter spells identifiers back out.
#[derive(Clone)]
pub struct FormatOptions {
    /// Use `"double quotes"` for delimited identifiers when set, `` `backticks` ``
    /// otherwise.
    pub ansi_quotes: bool,
    /// Overrides the default "does this identifier need quoting" heuristic.
    /// `None` quotes only what [`quote::default_should_quote`] judges
    /// necessary (non-alphanumeric characters, a leading digit, and so on).
    pub should_quote: Option<Arc<dyn Fn(&str) -> bool + Send + Sync>>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            ansi_quotes: true,
            should_quote: None,
        }
    }
}

impl std::fmt::Debug for FormatOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatOptions")
            .field("ansi_quotes", &self.ansi_quotes)
            .field("should_quote", &self.should_quote.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Renders a canonical JSON parse tree back to SQL text.
///
/// `tree` is the `serde_json::Value` produced by `sqlcanon_scrub::scrub`,
/// either a bare query map or one of the DML/DDL wrapper shapes
/// (`{"insert": {...}}`, `{"create_table": {...}}`, ...).
pub fn format(tree: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    statement::format_stmt(tree, options)
}

#[cfg(test)]
mod tests {
    use sqlcanon_core::{bigquery::BigQueryDialect, common::CommonDialect, Dialect};
    use sqlcanon_parser::Parser;
    use sqlcanon_scrub::ScrubOptions;

    use super::*;

    fn roundtrip(sql: &str) -> String {
        let dialect = CommonDialect::default();
        let stmt = Parser::new_with_sql(&dialect, sql)
            .unwrap()
            .parse_statement()
            .unwrap();
        let tree = sqlcanon_scrub::scrub(&stmt, &ScrubOptions::default());
        format(&tree, &FormatOptions::default()).unwrap()
    }

    fn roundtrip_with<D: Dialect>(dialect: &D, sql: &str) -> String {
        let stmt = Parser::new_with_sql(dialect, sql)
            .unwrap()
            .parse_statement()
            .unwrap();
        let tree = sqlcanon_scrub::scrub(&stmt, &ScrubOptions::default());
        format(&tree, &FormatOptions::default()).unwrap()
    }

    #[test]
    fn formats_simple_select() {
        assert_eq!(roundtrip("SELECT a FROM b"), "SELECT a FROM b");
    }

    #[test]
    fn formats_arithmetic_with_precedence() {
        assert_eq!(
            roundtrip("SELECT a + b * c FROM t"),
            "SELECT a + b * c FROM t"
        );
    }

    #[test]
    fn formats_explicit_grouping_that_changes_precedence() {
        assert_eq!(
            roundtrip("SELECT (a + b) * c FROM t"),
            "SELECT (a + b) * c FROM t"
        );
    }

    #[test]
    fn formats_is_null_and_is_not_null() {
        assert_eq!(
            roundtrip("SELECT x FROM t WHERE x IS NULL"),
            "SELECT x FROM t WHERE x IS NULL"
        );
        assert_eq!(
            roundtrip("SELECT x FROM t WHERE x IS NOT NULL"),
            "SELECT x FROM t WHERE x IS NOT NULL"
        );
    }

    #[test]
    fn formats_exists_subquery_distinct_from_is_not_null() {
        assert_eq!(
            roundtrip("SELECT 1 WHERE EXISTS (SELECT a FROM t)"),
            "SELECT 1 WHERE EXISTS (SELECT a FROM t)"
        );
    }

    #[test]
    fn formats_join_on() {
        assert_eq!(
            roundtrip("SELECT a FROM t1 JOIN t2 ON t1.id = t2.id"),
            "SELECT a FROM t1 JOIN t2 ON t1.id = t2.id"
        );
    }

    #[test]
    fn formats_insert_statement() {
        assert_eq!(
            roundtrip("INSERT INTO t (a, b) VALUES (1, 2)"),
            "INSERT INTO t (a, b) VALUES (1, 2)"
        );
    }

    #[test]
    fn reformatting_is_idempotent_under_rescrub() {
        let dialect = CommonDialect::default();
        let sql = "SELECT a, b FROM t1 JOIN t2 ON t1.id = t2.id WHERE a > 1 ORDER BY a DESC LIMIT 5";
        let stmt = Parser::new_with_sql(&dialect, sql).unwrap().parse_statement().unwrap();
        let tree = sqlcanon_scrub::scrub(&stmt, &ScrubOptions::default());
        let rendered = format(&tree, &FormatOptions::default()).unwrap();

        let reparsed = Parser::new_with_sql(&dialect, &rendered)
            .unwrap()
            .parse_statement()
            .unwrap();
        let retree = sqlcanon_scrub::scrub(&reparsed, &ScrubOptions::default());
        assert_eq!(tree, retree);
    }

    #[test]
    fn formats_bigquery_array_literal() {
        let dialect = BigQueryDialect::default();
        assert_eq!(
            roundtrip_with(&dialect, "SELECT [1, 2, 3] FROM t"),
            "SELECT [1, 2, 3] FROM t"
        );
    }

    #[test]
    fn formats_bigquery_empty_array_literal() {
        let dialect = BigQueryDialect::default();
        assert_eq!(roundtrip_with(&dialect, "SELECT [] FROM t"), "SELECT [] FROM t");
    }
}
