use serde_json::{Map, Value};

use crate::{error::FormatError, expr::format_expr, query::format_query_like, quote::quote_ident, FormatOptions};

/// Dispatches a top-level statement map by its wrapper key (`insert`,
/// `update`, ...), mirroring `sqlcanon-scrub::statement`'s wrapping in
/// reverse. A map with none of these keys is rendered as a bare query.
pub(crate) fn format_stmt(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    if let Value::Object(map) = value {
        if map.len() == 1 {
            if let Some(body) = map.get("insert") {
                return format_insert(body, options);
            }
            if let Some(body) = map.get("update") {
                return format_update(body, options);
            }
            if let Some(body) = map.get("delete") {
                return format_delete(body, options);
            }
            if let Some(body) = map.get("create_table") {
                return format_create_table(body, options);
            }
            if let Some(body) = map.get("create_view") {
                return format_create_view(body, options);
            }
            if let Some(body) = map.get("create_index") {
                return format_create_index(body, options);
            }
        }
    }
    format_query_like(value, options)
}

fn ident(name: &str, options: &FormatOptions) -> String {
    quote_ident(name, options.ansi_quotes, &options.should_quote)
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, FormatError> {
    value
        .as_object()
        .ok_or_else(|| FormatError::UnknownNode(format!("{what} is not an object")))
}

fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn format_insert(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = as_object(value, "insert statement")?;
    let table = map
        .get("table")
        .and_then(Value::as_str)
        .ok_or_else(|| FormatError::UnknownNode("insert statement is missing a table".to_string()))?;
    let mut out = format!("INSERT INTO {}", ident(table, options));
    if let Some(columns) = map.get("columns") {
        let columns = as_list(columns)
            .iter()
            .map(|c| {
                c.as_str()
                    .map(|s| ident(s, options))
                    .ok_or_else(|| FormatError::UnknownNode("insert column is not a string".to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        out.push_str(&format!(" ({})", columns.join(", ")));
    }
    if let Some(query) = map.get("query") {
        out.push(' ');
        out.push_str(&format_query_like(query, options)?);
    }
    Ok(out)
}

fn format_update(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = as_object(value, "update statement")?;
    let table = map
        .get("table")
        .and_then(Value::as_str)
        .ok_or_else(|| FormatError::UnknownNode("update statement is missing a table".to_string()))?;
    let set = as_object(
        map.get("set")
            .ok_or_else(|| FormatError::UnknownNode("update statement is missing a set clause".to_string()))?,
        "update set clause",
    )?;
    let mut assignments = Vec::with_capacity(set.len());
    for (column, expr) in set {
        assignments.push(format!("{} = {}", ident(column, options), format_expr(expr, options)?));
    }
    let mut out = format!(
        "UPDATE {} SET {}",
        ident(table, options),
        assignments.join(", ")
    );
    if let Some(selection) = map.get("where") {
        out.push_str(" WHERE ");
        out.push_str(&format_expr(selection, options)?);
    }
    Ok(out)
}

fn format_delete(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = as_object(value, "delete statement")?;
    let from = map
        .get("from")
        .and_then(Value::as_str)
        .ok_or_else(|| FormatError::UnknownNode("delete statement is missing a table".to_string()))?;
    let mut out = format!("DELETE FROM {}", ident(from, options));
    if let Some(selection) = map.get("where") {
        out.push_str(" WHERE ");
        out.push_str(&format_expr(selection, options)?);
    }
    Ok(out)
}

fn format_create_table(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = as_object(value, "create table statement")?;
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| FormatError::UnknownNode("create table statement is missing a name".to_string()))?;
    let mut out = String::from("CREATE ");
    if map.get("temporary").and_then(Value::as_bool).unwrap_or(false) {
        out.push_str("TEMPORARY ");
    }
    out.push_str("TABLE ");
    if map.get("if_not_exists").and_then(Value::as_bool).unwrap_or(false) {
        out.push_str("IF NOT EXISTS ");
    }
    out.push_str(&ident(name, options));

    if let Some(like) = map.get("like").and_then(Value::as_str) {
        out.push_str(&format!(" LIKE {}", ident(like, options)));
        return Ok(out);
    }

    let mut parts = Vec::new();
    if let Some(columns) = map.get("columns") {
        for column in as_list(columns) {
            parts.push(format_column_def(column, options)?);
        }
    }
    if let Some(constraints) = map.get("constraint") {
        for constraint in as_list(constraints) {
            parts.push(format_table_constraint(constraint, options)?);
        }
    }
    if !parts.is_empty() {
        out.push_str(&format!(" ({})", parts.join(", ")));
    }
    if let Some(query) = map.get("query") {
        out.push_str(" AS ");
        out.push_str(&format_query_like(query, options)?);
    }
    Ok(out)
}

fn format_column_def(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = as_object(value, "column definition")?;
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| FormatError::UnknownNode("column definition is missing a name".to_string()))?;
    let data_type = map
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| FormatError::UnknownNode("column definition is missing a type".to_string()))?;
    let mut out = format!("{} {}", ident(name, options), data_type);
    match map.get("nullable").and_then(Value::as_bool) {
        Some(false) => out.push_str(" NOT NULL"),
        Some(true) => out.push_str(" NULL"),
        None => {}
    }
    if let Some(default) = map.get("default") {
        out.push_str(&format!(" DEFAULT {}", format_expr(default, options)?));
    }
    if map.get("primary_key").and_then(Value::as_bool).unwrap_or(false) {
        out.push_str(" PRIMARY KEY");
    }
    if map.get("unique").and_then(Value::as_bool).unwrap_or(false) {
        out.push_str(" UNIQUE");
    }
    if let Some(references) = map.get("references").and_then(Value::as_str) {
        out.push_str(&format!(" REFERENCES {}", ident(references, options)));
    }
    if let Some(check) = map.get("check") {
        out.push_str(&format!(" CHECK ({})", format_expr(check, options)?));
    }
    Ok(out)
}

fn format_ident_list(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let columns = as_list(value)
        .iter()
        .map(|c| {
            c.as_str()
                .map(|s| ident(s, options))
                .ok_or_else(|| FormatError::UnknownNode("expected a column name".to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns.join(", "))
}

fn format_table_constraint(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = as_object(value, "table constraint")?;
    if let Some(columns) = map.get("primary_key") {
        return Ok(format!("PRIMARY KEY ({})", format_ident_list(columns, options)?));
    }
    if let Some(columns) = map.get("unique") {
        return Ok(format!("UNIQUE ({})", format_ident_list(columns, options)?));
    }
    if let Some(columns) = map.get("foreign_key") {
        let references = as_object(
            map.get("references")
                .ok_or_else(|| FormatError::UnknownNode("foreign key is missing references".to_string()))?,
            "foreign key references",
        )?;
        let table = references
            .get("table")
            .and_then(Value::as_str)
            .ok_or_else(|| FormatError::UnknownNode("foreign key references is missing a table".to_string()))?;
        let ref_columns = references
            .get("columns")
            .ok_or_else(|| FormatError::UnknownNode("foreign key references is missing columns".to_string()))?;
        return Ok(format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            format_ident_list(columns, options)?,
            ident(table, options),
            format_ident_list(ref_columns, options)?,
        ));
    }
    if let Some(check) = map.get("check") {
        return Ok(format!("CHECK ({})", format_expr(check, options)?));
    }
    Err(FormatError::UnknownNode(format!(
        "table constraint with keys {:?}",
        map.keys().collect::<Vec<_>>()
    )))
}

fn format_create_view(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = as_object(value, "create view statement")?;
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| FormatError::UnknownNode("create view statement is missing a name".to_string()))?;
    let mut out = String::from("CREATE ");
    if map.get("replace").and_then(Value::as_bool).unwrap_or(false) {
        out.push_str("OR REPLACE ");
    }
    if map.get("recursive").and_then(Value::as_bool).unwrap_or(false) {
        out.push_str("RECURSIVE ");
    }
    out.push_str("VIEW ");
    out.push_str(&ident(name, options));
    if let Some(columns) = map.get("columns") {
        out.push_str(&format!(" ({})", format_ident_list(columns, options)?));
    }
    out.push_str(" AS ");
    let query = map
        .get("query")
        .ok_or_else(|| FormatError::UnknownNode("create view statement is missing a query".to_string()))?;
    out.push_str(&format_query_like(query, options)?);
    if let Some(check_option) = map.get("check_option").and_then(Value::as_str) {
        out.push_str(&format!(" WITH {} CHECK OPTION", check_option.to_uppercase()));
    }
    Ok(out)
}

fn format_create_index(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = as_object(value, "create index statement")?;
    let table = map
        .get("table")
        .and_then(Value::as_str)
        .ok_or_else(|| FormatError::UnknownNode("create index statement is missing a table".to_string()))?;
    let mut out = String::from("CREATE ");
    if map.get("unique").and_then(Value::as_bool).unwrap_or(false) {
        out.push_str("UNIQUE ");
    }
    out.push_str("INDEX ");
    if map.get("if_not_exists").and_then(Value::as_bool).unwrap_or(false) {
        out.push_str("IF NOT EXISTS ");
    }
    if let Some(name) = map.get("name").and_then(Value::as_str) {
        out.push_str(&ident(name, options));
        out.push(' ');
    }
    out.push_str("ON ");
    out.push_str(&ident(table, options));
    let columns = map
        .get("columns")
        .ok_or_else(|| FormatError::UnknownNode("create index statement is missing columns".to_string()))?;
    let rendered = as_list(columns)
        .iter()
        .map(|c| format_index_column(c, options))
        .collect::<Result<Vec<_>, _>>()?;
    out.push_str(&format!(" ({})", rendered.join(", ")));
    Ok(out)
}

fn format_index_column(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    match value {
        Value::String(s) => Ok(ident(s, options)),
        Value::Object(map) => {
            let name = map
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| FormatError::UnknownNode("index column is missing a name".to_string()))?;
            let mut out = ident(name, options);
            match map.get("sort").and_then(Value::as_str) {
                Some("asc") => out.push_str(" ASC"),
                Some("desc") => out.push_str(" DESC"),
                _ => {}
            }
            Ok(out)
        }
        other => Err(FormatError::UnknownNode(format!(
            "unsupported index column shape: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn opts() -> FormatOptions {
        FormatOptions::default()
    }

    #[test]
    fn insert_with_values() {
        let tree = json!({
            "insert": {
                "table": "t",
                "columns": ["a", "b"],
                "query": {"select": [1, 2]},
            }
        });
        assert_eq!(
            format_stmt(&tree, &opts()).unwrap(),
            "INSERT INTO t (a, b) VALUES (1, 2)"
        );
    }

    #[test]
    fn update_with_where() {
        let tree = json!({
            "update": {
                "table": "t",
                "set": {"a": 1},
                "where": {"eq": ["b", 2]},
            }
        });
        assert_eq!(
            format_stmt(&tree, &opts()).unwrap(),
            "UPDATE t SET a = 1 WHERE b = 2"
        );
    }

    #[test]
    fn delete_with_where() {
        let tree = json!({
            "delete": {"from": "t", "where": {"eq": ["a", 1]}}
        });
        assert_eq!(format_stmt(&tree, &opts()).unwrap(), "DELETE FROM t WHERE a = 1");
    }

    #[test]
    fn create_table_with_columns() {
        let tree = json!({
            "create_table": {
                "name": "t",
                "columns": [
                    {"name": "a", "type": "INT", "nullable": false},
                    {"name": "b", "type": "TEXT"},
                ],
            }
        });
        assert_eq!(
            format_stmt(&tree, &opts()).unwrap(),
            "CREATE TABLE t (a INT NOT NULL, b TEXT)"
        );
    }

    #[test]
    fn create_view_as_select() {
        let tree = json!({
            "create_view": {
                "name": "v",
                "query": {"select": {"value": "a"}, "from": "t"},
            }
        });
        assert_eq!(
            format_stmt(&tree, &opts()).unwrap(),
            "CREATE VIEW v AS SELECT a FROM t"
        );
    }

    #[test]
    fn create_index_on_columns() {
        let tree = json!({
            "create_index": {"name": "idx", "table": "t", "columns": ["a", "b"]}
        });
        assert_eq!(
            format_stmt(&tree, &opts()).unwrap(),
            "CREATE INDEX idx ON t (a, b)"
        );
    }
}
