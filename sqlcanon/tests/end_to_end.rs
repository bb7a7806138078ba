//! End-to-end scenarios and round-trip/boundary properties, covering every
//! numbered scenario and testable property of the canonical tree contract.

use serde_json::json;
use sqlcanon::{parse, ParseOptions};

#[cfg(feature = "sqlserver")]
use sqlcanon::parse_sqlserver;
#[cfg(feature = "mysql")]
use sqlcanon::parse_mysql;

fn parse_default(sql: &str) -> serde_json::Value {
    parse(sql, &ParseOptions::default()).unwrap()
}

#[test]
fn scenario_1_simple_select() {
    assert_eq!(
        parse_default("SELECT a FROM b"),
        json!({"select": {"value": "a"}, "from": "b"})
    );
}

#[test]
fn scenario_2_arithmetic_precedence() {
    assert_eq!(
        parse_default("SELECT a + b * c FROM t"),
        json!({"select": {"value": {"add": ["a", {"mul": ["b", "c"]}]}}, "from": "t"})
    );
}

#[test]
fn scenario_3_is_null_folds_to_missing() {
    assert_eq!(
        parse_default("SELECT x FROM t WHERE x IS NULL"),
        json!({"select": {"value": "x"}, "from": "t", "where": {"missing": "x"}})
    );
}

#[test]
fn scenario_4_adjacent_string_literals_are_a_sequence() {
    assert_eq!(
        parse_default("SELECT 'a' 'b' FROM t"),
        json!({"select": {"value": {"literal": ["a", "b"]}}, "from": "t"})
    );
}

#[cfg(feature = "mysql")]
#[test]
fn scenario_5_mysql_double_quoted_literal() {
    assert_eq!(
        parse_mysql(r#"SELECT "a" FROM t"#, &ParseOptions::default()).unwrap(),
        json!({"select": {"value": {"literal": "a"}}, "from": "t"})
    );
}

#[cfg(feature = "sqlserver")]
#[test]
fn scenario_6_sqlserver_bracketed_identifiers() {
    assert_eq!(
        parse_sqlserver("SELECT [col one] FROM [dbo].[t]", &ParseOptions::default()).unwrap(),
        json!({"select": {"value": "col one"}, "from": "dbo.t"})
    );
}

#[test]
fn wildcard_projection_is_bare_star_by_default() {
    assert_eq!(parse_default("SELECT * FROM t"), json!({"select": "*", "from": "t"}));
}

#[test]
fn trailing_semicolons_and_whitespace_are_stripped() {
    assert_eq!(parse_default("SELECT a FROM b;  \n\t"), parse_default("SELECT a FROM b"));
}

#[test]
fn empty_input_is_a_parse_error() {
    assert!(parse(" ", &ParseOptions::default()).is_err());
}

#[test]
fn in_list_preserves_source_order() {
    assert_eq!(
        parse_default("SELECT a FROM t WHERE a IN (3, 1, 2)"),
        json!({"select": {"value": "a"}, "from": "t", "where": {"in": ["a", [3, 1, 2]]}})
    );
}

#[test]
fn round_trip_parse_format_parse() {
    let sql = "SELECT a, b FROM t1 JOIN t2 ON t1.id = t2.id WHERE a > 1 AND b < 2 ORDER BY a DESC LIMIT 5";
    let tree = parse_default(sql);
    let rendered = sqlcanon::format(&tree, &sqlcanon::FormatOptions::default()).unwrap();
    let retree = parse_default(&rendered);
    assert_eq!(tree, retree);
}

#[test]
fn format_parse_format_is_idempotent() {
    let sql = "SELECT a FROM t WHERE a BETWEEN 1 AND 10";
    let tree = parse_default(sql);
    let once = sqlcanon::format(&tree, &sqlcanon::FormatOptions::default()).unwrap();
    let reparsed = parse_default(&once);
    let twice = sqlcanon::format(&reparsed, &sqlcanon::FormatOptions::default()).unwrap();
    assert_eq!(once, twice);
}
