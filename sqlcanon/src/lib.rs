//! # sqlcanon
//!
//! Parses SQL source text into a canonical JSON parse tree across several
//! dialects, and renders such a tree back to SQL text. This crate is the
//! public entry point over `sqlcanon-lexer`/`sqlcanon-parser` (tokenizing
//! and grammar), `sqlcanon-scrub` (tree normalization) and `sqlcanon-fmt`
//! (tree-to-text rendering).
//!
//! ```
//! let tree = sqlcanon::parse("SELECT a FROM b", &sqlcanon::ParseOptions::default()).unwrap();
//! assert_eq!(tree, serde_json::json!({"select": {"value": "a"}, "from": "b"}));
//! ```

mod cache;
mod error;
mod options;

use serde_json::Value;
use sqlcanon_core::common::CommonDialect;
#[cfg(feature = "bigquery")]
use sqlcanon_core::bigquery::BigQueryDialect;
#[cfg(feature = "mysql")]
use sqlcanon_core::mysql::MySqlDialect;
#[cfg(feature = "sqlserver")]
use sqlcanon_core::sqlserver::SqlServerDialect;
use sqlcanon_core::Dialect;
use sqlcanon_parser::Parser;
use sqlcanon_scrub::ScrubOptions;
use tracing::debug;

pub use crate::{
    cache::DialectTag,
    error::{ConfigError, Error},
    options::{should_quote, AllColumns, FormatOptions, ParseOptions},
};

/// Parses `sql` under the common (ANSI-ish) dialect into a canonical JSON
/// parse tree.
pub fn parse(sql: &str, options: &ParseOptions) -> Result<Value, Error> {
    parse_with(DialectTag::Common, &CommonDialect::default(), sql, options)
}

/// Parses `sql` under the MySQL dialect (`"x"` is a string literal, `` `x` ``
/// is an identifier).
#[cfg(feature = "mysql")]
pub fn parse_mysql(sql: &str, options: &ParseOptions) -> Result<Value, Error> {
    parse_with(DialectTag::MySql, &MySqlDialect::default(), sql, options)
}

/// Parses `sql` under the SQL Server dialect (`"x"`, `[x]` and `` `x` `` are
/// all identifiers).
#[cfg(feature = "sqlserver")]
pub fn parse_sqlserver(sql: &str, options: &ParseOptions) -> Result<Value, Error> {
    parse_with(DialectTag::SqlServer, &SqlServerDialect::default(), sql, options)
}

/// Parses `sql` under the BigQuery dialect (`"x"` is a string literal, `[x]`
/// is an array literal).
#[cfg(feature = "bigquery")]
pub fn parse_bigquery(sql: &str, options: &ParseOptions) -> Result<Value, Error> {
    parse_with(DialectTag::BigQuery, &BigQueryDialect::default(), sql, options)
}

/// Renders a canonical JSON parse tree back to SQL text.
pub fn format(tree: &Value, options: &FormatOptions) -> Result<String, Error> {
    let _span = tracing::debug_span!("format").entered();
    Ok(sqlcanon_fmt::format(tree, options)?)
}

fn parse_with<D: Dialect>(
    tag: DialectTag,
    dialect: &D,
    sql: &str,
    options: &ParseOptions,
) -> Result<Value, Error> {
    let _span = tracing::debug_span!("parse", dialect = ?tag).entered();
    cache::with_parser(tag, options.all_columns.as_deref(), |_all_columns| {
        // Spec §8's boundary behavior: trailing semicolons and whitespace
        // are stripped before parsing, matching the source's
        // `sql.rstrip().rstrip(";")`.
        let trimmed = sql.trim_end().trim_end_matches(';');
        debug!(chars = trimmed.len(), "parsing");
        let stmt = Parser::new_with_sql(dialect, trimmed)?.parse_statement()?;
        let scrub_options = ScrubOptions {
            null: options.null.clone(),
            calls: options.calls,
        };
        Ok(sqlcanon_scrub::scrub(&stmt, &scrub_options))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_simple_select() {
        let tree = parse("SELECT a FROM b", &ParseOptions::default()).unwrap();
        assert_eq!(tree, json!({"select": {"value": "a"}, "from": "b"}));
    }

    #[test]
    fn parses_arithmetic_precedence() {
        let tree = parse("SELECT a + b * c FROM t", &ParseOptions::default()).unwrap();
        assert_eq!(
            tree,
            json!({"select": {"value": {"add": ["a", {"mul": ["b", "c"]}]}}, "from": "t"})
        );
    }

    #[test]
    fn strips_trailing_semicolon_and_whitespace() {
        let tree = parse("SELECT a FROM b ;  \n", &ParseOptions::default()).unwrap();
        assert_eq!(tree, json!({"select": {"value": "a"}, "from": "b"}));
    }

    #[test]
    fn rejects_invalid_all_columns() {
        let options = ParseOptions {
            all_columns: Some("nope".to_string()),
            ..ParseOptions::default()
        };
        let err = parse("SELECT * FROM b", &options).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidAllColumns(_))));
    }

    #[test]
    fn accepts_all_columns_star() {
        let options = ParseOptions {
            all_columns: Some("*".to_string()),
            ..ParseOptions::default()
        };
        let tree = parse("SELECT * FROM b", &options).unwrap();
        assert_eq!(tree, json!({"select": "*", "from": "b"}));
    }

    #[cfg(feature = "mysql")]
    #[test]
    fn parses_mysql_double_quoted_string_literal() {
        let tree = parse_mysql(r#"SELECT "a" FROM t"#, &ParseOptions::default()).unwrap();
        assert_eq!(tree, json!({"select": {"value": {"literal": "a"}}, "from": "t"}));
    }

    #[cfg(feature = "sqlserver")]
    #[test]
    fn parses_sqlserver_bracketed_identifiers() {
        let tree = parse_sqlserver("SELECT [col one] FROM [dbo].[t]", &ParseOptions::default()).unwrap();
        assert_eq!(tree, json!({"select": {"value": "col one"}, "from": "dbo.t"}));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let err = parse("", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn format_round_trips_parse() {
        let tree = parse("SELECT a FROM t1 JOIN t2 ON t1.id = t2.id", &ParseOptions::default()).unwrap();
        let sql = format(&tree, &FormatOptions::default()).unwrap();
        let retree = parse(&sql, &ParseOptions::default()).unwrap();
        assert_eq!(tree, retree);
    }
}
