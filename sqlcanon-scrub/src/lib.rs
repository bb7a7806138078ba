//! # sqlcanon-scrub
//!
//! Normalizes the raw, typed AST produced by `sqlcanon-parser` into the
//! canonical JSON parse tree: a `serde_json::Value` whose shape is stable
//! across dialects and independent of the grammar's internal node types.
//!
//! The walk is a single bottom-up pass over [`sqlcanon_ast::Stmt`]. Every
//! operator and function call is routed through the [`CallsMode`] selected
//! by the caller, and every `NULL` site is replaced with the caller's
//! configured sentinel in one final pass over the produced tree.

mod context;
mod expr;
mod literal;
mod options;
mod query;
mod statement;
mod util;

use sqlcanon_ast::Stmt;
use serde_json::Value;

pub use self::options::{CallsMode, ScrubOptions};

/// Scrubs a parsed statement into the canonical JSON tree.
pub fn scrub(stmt: &Stmt, options: &ScrubOptions) -> Value {
    let ctx = context::ScrubContext::new(options.calls);
    let raw = statement::scrub_stmt(stmt, &ctx);
    context::replace_nulls(raw, &options.null)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sqlcanon_core::{bigquery::BigQueryDialect, common::CommonDialect, Dialect};
    use sqlcanon_parser::Parser;

    use super::*;

    fn scrub_sql(sql: &str) -> Value {
        let dialect = CommonDialect::default();
        let stmt = Parser::new_with_sql(&dialect, sql)
            .unwrap()
            .parse_statement()
            .unwrap();
        scrub(&stmt, &ScrubOptions::default())
    }

    fn scrub_sql_with<D: Dialect>(dialect: &D, sql: &str) -> Value {
        let stmt = Parser::new_with_sql(dialect, sql)
            .unwrap()
            .parse_statement()
            .unwrap();
        scrub(&stmt, &ScrubOptions::default())
    }

    #[test]
    fn select_single_column() {
        assert_eq!(
            scrub_sql("SELECT a FROM b"),
            json!({"select": {"value": "a"}, "from": "b"})
        );
    }

    #[test]
    fn select_arithmetic_precedence() {
        assert_eq!(
            scrub_sql("SELECT a + b * c FROM t"),
            json!({"select": {"value": {"add": ["a", {"mul": ["b", "c"]}]}}, "from": "t"})
        );
    }

    #[test]
    fn select_is_null_folds_to_missing() {
        assert_eq!(
            scrub_sql("SELECT x FROM t WHERE x IS NULL"),
            json!({"select": {"value": "x"}, "from": "t", "where": {"missing": "x"}})
        );
    }

    #[test]
    fn select_is_not_null_folds_to_exists() {
        assert_eq!(
            scrub_sql("SELECT x FROM t WHERE x IS NOT NULL"),
            json!({"select": {"value": "x"}, "from": "t", "where": {"exists": "x"}})
        );
    }

    #[test]
    fn adjacent_string_literals_form_a_sequence() {
        assert_eq!(
            scrub_sql("SELECT 'a' 'b' FROM t"),
            json!({"select": {"value": {"literal": ["a", "b"]}}, "from": "t"})
        );
    }

    #[test]
    fn wildcard_projection_is_bare_star() {
        assert_eq!(
            scrub_sql("SELECT * FROM t"),
            json!({"select": "*", "from": "t"})
        );
    }

    #[test]
    fn null_sentinel_is_configurable() {
        let dialect = CommonDialect::default();
        let stmt = Parser::new_with_sql(&dialect, "SELECT NULL FROM t")
            .unwrap()
            .parse_statement()
            .unwrap();
        let options = ScrubOptions {
            null: json!("NULL"),
            ..ScrubOptions::default()
        };
        assert_eq!(
            scrub(&stmt, &options),
            json!({"select": {"value": "NULL"}, "from": "t"})
        );
    }

    #[test]
    fn join_with_on_condition() {
        assert_eq!(
            scrub_sql("SELECT a FROM t1 JOIN t2 ON t1.id = t2.id"),
            json!({
                "select": {"value": "a"},
                "from": ["t1", {"join": "t2", "on": {"eq": ["t1.id", "t2.id"]}}],
            })
        );
    }

    #[test]
    fn in_list_uses_array_operand() {
        assert_eq!(
            scrub_sql("SELECT a FROM t WHERE a IN (1, 2, 3)"),
            json!({
                "select": {"value": "a"},
                "from": "t",
                "where": {"in": ["a", [1, 2, 3]]},
            })
        );
    }

    #[test]
    fn bigquery_array_literal_scrubs_to_create_array_call() {
        let dialect = BigQueryDialect::default();
        assert_eq!(
            scrub_sql_with(&dialect, "SELECT [1, 2, 3] FROM t"),
            json!({
                "select": {"value": {"create_array": [1, 2, 3]}},
                "from": "t",
            })
        );
    }

    #[test]
    fn bigquery_empty_array_literal_scrubs_to_empty_array() {
        let dialect = BigQueryDialect::default();
        assert_eq!(
            scrub_sql_with(&dialect, "SELECT [] FROM t"),
            json!({"select": {"value": {"create_array": []}}, "from": "t"})
        );
    }

    #[test]
    fn bigquery_single_item_array_literal_degenerates_to_scalar() {
        let dialect = BigQueryDialect::default();
        assert_eq!(
            scrub_sql_with(&dialect, "SELECT [1] FROM t"),
            json!({"select": {"value": {"create_array": 1}}, "from": "t"})
        );
    }
}
