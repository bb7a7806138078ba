use serde_json::{Map, Value};

use crate::{error::FormatError, expr::format_expr, quote::quote_ident, FormatOptions};

const SET_OP_KEYWORDS: &[(&str, &str)] = &[
    ("union", "UNION"),
    ("union_all", "UNION ALL"),
    ("intersect", "INTERSECT"),
    ("except", "EXCEPT"),
];

const JOIN_KEYS: &[(&str, &str)] = &[
    ("join", "JOIN"),
    ("cross join", "CROSS JOIN"),
    ("left join", "LEFT JOIN"),
    ("right join", "RIGHT JOIN"),
    ("full join", "FULL JOIN"),
];

/// Formats a full query map: the optional `WITH` prefix, a `SELECT`/set
/// operation/`VALUES` body, and the trailing `ORDER BY`/`LIMIT`/`OFFSET`/
/// `FETCH` clauses. Used both for top-level queries and for any nested
/// query-shaped node (derived tables, `IN (subquery)`, `EXISTS (subquery)`).
pub(crate) fn format_query_like(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = value
        .as_object()
        .ok_or_else(|| FormatError::UnknownNode("query node is not an object".to_string()))?;
    format_query(map, options)
}

fn format_query(map: &Map<String, Value>, options: &FormatOptions) -> Result<String, FormatError> {
    let mut parts = Vec::new();
    if let Some(with) = map.get("with") {
        parts.push(format_with(with, options)?);
    }
    parts.push(format_query_body(map, options)?);
    if let Some(order_by) = map.get("orderby") {
        parts.push(format!("ORDER BY {}", format_order_by_items(order_by, options)?));
    }
    if let Some(limit) = map.get("limit") {
        parts.push(format!("LIMIT {}", format_expr(limit, options)?));
    }
    if let Some(offset) = map.get("offset") {
        parts.push(format!("OFFSET {}", format_expr(offset, options)?));
    }
    if let Some(fetch) = map.get("fetch") {
        parts.push(format!(
            "FETCH FIRST {} ROWS ONLY",
            format_expr(fetch, options)?
        ));
    }
    Ok(parts.join(" "))
}

fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn format_with(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let ctes = as_list(value);
    let mut rendered = Vec::with_capacity(ctes.len());
    for cte in ctes {
        let map = cte
            .as_object()
            .ok_or_else(|| FormatError::UnknownNode("CTE is not an object".to_string()))?;
        let name = map
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| FormatError::UnknownNode("CTE is missing a name".to_string()))?;
        let mut text = quote_ident(name, options.ansi_quotes, &options.should_quote);
        if let Some(columns) = map.get("columns") {
            let columns = as_list(columns)
                .iter()
                .map(|c| {
                    c.as_str()
                        .map(|s| quote_ident(s, options.ansi_quotes, &options.should_quote))
                        .ok_or_else(|| FormatError::UnknownNode("CTE column is not a string".to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            text.push_str(&format!("({})", columns.join(", ")));
        }
        let body = map
            .get("value")
            .ok_or_else(|| FormatError::UnknownNode("CTE is missing a value".to_string()))?;
        text.push_str(&format!(" AS ({})", format_query_like(body, options)?));
        rendered.push(text);
    }
    Ok(format!("WITH {}", rendered.join(", ")))
}

fn format_query_body(map: &Map<String, Value>, options: &FormatOptions) -> Result<String, FormatError> {
    for (key, keyword) in SET_OP_KEYWORDS {
        if let Some(value) = map.get(*key) {
            return format_set_op(value, keyword, options);
        }
    }
    format_select_body(map, options)
}

fn format_set_op(value: &Value, keyword: &str, options: &FormatOptions) -> Result<String, FormatError> {
    let operands = as_list(value);
    let mut rendered = Vec::with_capacity(operands.len());
    for operand in operands {
        let map = operand
            .as_object()
            .ok_or_else(|| FormatError::UnknownNode("set operation operand is not an object".to_string()))?;
        rendered.push(format_query(map, options)?);
    }
    Ok(rendered.join(&format!(" {} ", keyword)))
}

fn is_values_shape(projection: &Value, from_present: bool) -> bool {
    !from_present
        && match projection {
            Value::Array(items) => !items.is_empty() && items.iter().all(Value::is_array),
            _ => false,
        }
}

fn format_select_body(map: &Map<String, Value>, options: &FormatOptions) -> Result<String, FormatError> {
    let (projection, distinct) = match (map.get("select"), map.get("select_distinct")) {
        (_, Some(value)) => (value, true),
        (Some(value), None) => (value, false),
        (None, None) => {
            return Err(FormatError::UnknownNode(
                "query body has neither select nor a set operation".to_string(),
            ))
        }
    };
    let from_present = map.contains_key("from");
    if is_values_shape(projection, from_present) {
        let rows = projection
            .as_array()
            .expect("checked by is_values_shape");
        let mut rendered = Vec::with_capacity(rows.len());
        for row in rows {
            let items = row.as_array().expect("checked by is_values_shape");
            let mut cells = Vec::with_capacity(items.len());
            for item in items {
                cells.push(format_expr(item, options)?);
            }
            rendered.push(format!("({})", cells.join(", ")));
        }
        return Ok(format!("VALUES {}", rendered.join(", ")));
    }

    let mut out = String::from("SELECT ");
    if distinct {
        out.push_str("DISTINCT ");
    }
    out.push_str(&format_select_items(projection, options)?);
    if let Some(from) = map.get("from") {
        out.push_str(" FROM ");
        out.push_str(&format_from(from, options)?);
    }
    if let Some(selection) = map.get("where") {
        out.push_str(" WHERE ");
        out.push_str(&format_expr(selection, options)?);
    }
    if let Some(group_by) = map.get("groupby") {
        out.push_str(" GROUP BY ");
        out.push_str(&format_group_by(group_by, options)?);
    }
    if let Some(having) = map.get("having") {
        out.push_str(" HAVING ");
        out.push_str(&format_expr(having, options)?);
    }
    if let Some(window) = map.get("window") {
        out.push_str(" WINDOW ");
        out.push_str(&format_window(window, options)?);
    }
    Ok(out)
}

fn format_select_items(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let items = as_list(value);
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(format_select_item(item, options)?);
    }
    Ok(rendered.join(", "))
}

fn format_select_item(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    match value {
        Value::String(s) if s == "*" || s.ends_with(".*") => Ok(s.clone()),
        Value::Object(map) if map.contains_key("value") => {
            let mut text = format_expr(&map["value"], options)?;
            if let Some(name) = map.get("name").and_then(Value::as_str) {
                text.push_str(" AS ");
                text.push_str(&quote_ident(name, options.ansi_quotes, &options.should_quote));
            }
            Ok(text)
        }
        other => format_expr(other, options),
    }
}

/// Reconstructs the comma-separated `FROM` item list out of the flattened
/// relation/join sibling sequence the scrubber produces: consecutive join
/// objects attach (space-separated) to the table factor ahead of them, while
/// distinct groups join with `, `.
fn format_from(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let items = as_list(value);
    format_from_items(&items, options)
}

fn format_from_items(items: &[&Value], options: &FormatOptions) -> Result<String, FormatError> {
    let mut groups: Vec<String> = Vec::new();
    for item in items {
        if let Some(join_text) = format_join(item, options)? {
            let last = groups
                .last_mut()
                .ok_or_else(|| FormatError::UnknownNode("join with no preceding table".to_string()))?;
            last.push(' ');
            last.push_str(&join_text);
        } else {
            groups.push(format_table_factor(item, options)?);
        }
    }
    Ok(groups.join(", "))
}

fn join_keyword(map: &Map<String, Value>) -> Option<(&'static str, &'static str)> {
    JOIN_KEYS
        .iter()
        .find(|(key, _)| map.contains_key(*key))
        .map(|(key, keyword)| (*key, *keyword))
}

fn format_join(value: &Value, options: &FormatOptions) -> Result<Option<String>, FormatError> {
    let map = match value.as_object() {
        Some(map) => map,
        None => return Ok(None),
    };
    let (key, keyword) = match join_keyword(map) {
        Some(found) => found,
        None => return Ok(None),
    };
    let mut text = format!("{} {}", keyword, format_table_factor(&map[key], options)?);
    if let Some(on) = map.get("on") {
        text.push_str(" ON ");
        text.push_str(&format_expr(on, options)?);
    } else if let Some(using) = map.get("using") {
        let columns = as_list(using)
            .iter()
            .map(|c| {
                c.as_str()
                    .map(|s| quote_ident(s, options.ansi_quotes, &options.should_quote))
                    .ok_or_else(|| FormatError::UnknownNode("USING column is not a string".to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        text.push_str(&format!(" USING ({})", columns.join(", ")));
    }
    Ok(Some(text))
}

fn format_table_factor(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    match value {
        Value::String(s) => Ok(quote_ident(s, options.ansi_quotes, &options.should_quote)),
        Value::Array(items) => {
            let refs: Vec<&Value> = items.iter().collect();
            Ok(format!("({})", format_from_items(&refs, options)?))
        }
        Value::Object(map) => {
            let body = map
                .get("value")
                .ok_or_else(|| FormatError::UnknownNode("table factor is missing a value".to_string()))?;
            let mut text = if looks_like_query_body(body) {
                format!("({})", format_query_like(body, options)?)
            } else {
                format_expr(body, options)?
            };
            if map.get("lateral").and_then(Value::as_bool).unwrap_or(false) {
                text = format!("LATERAL {}", text);
            }
            if let Some(name) = map.get("name").and_then(Value::as_str) {
                text.push_str(" AS ");
                text.push_str(&quote_ident(name, options.ansi_quotes, &options.should_quote));
            }
            Ok(text)
        }
        other => Err(FormatError::UnknownNode(format!(
            "unsupported table factor shape: {other}"
        ))),
    }
}

fn looks_like_query_body(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.contains_key("select") || map.contains_key("select_distinct") || SET_OP_KEYWORDS.iter().any(|(k, _)| map.contains_key(*k)))
}

fn format_group_by(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let items = as_list(value);
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(format_grouping_element(item, options)?);
    }
    Ok(rendered.join(", "))
}

fn format_grouping_element(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    if let Value::Object(map) = value {
        if map.len() == 1 {
            if let Some(rollup) = map.get("rollup") {
                return Ok(format!("ROLLUP ({})", format_expr_list(rollup, options)?));
            }
            if let Some(cube) = map.get("cube") {
                return Ok(format!("CUBE ({})", format_expr_list(cube, options)?));
            }
        }
    }
    format_expr(value, options)
}

fn format_expr_list(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let items = as_list(value);
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(format_expr(item, options)?);
    }
    Ok(rendered.join(", "))
}

fn format_order_by_items(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let items = as_list(value);
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(format_sort_spec(item, options)?);
    }
    Ok(rendered.join(", "))
}

fn format_sort_spec(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    match value {
        Value::Object(map) if map.contains_key("value") => {
            let mut text = format_expr(&map["value"], options)?;
            match map.get("sort").and_then(Value::as_str) {
                Some("asc") => text.push_str(" ASC"),
                Some("desc") => text.push_str(" DESC"),
                _ => {}
            }
            Ok(text)
        }
        other => format_expr(other, options),
    }
}

fn format_window(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = value
        .as_object()
        .ok_or_else(|| FormatError::UnknownNode("window clause is not an object".to_string()))?;
    let mut rendered = Vec::with_capacity(map.len());
    for (name, spec) in map {
        rendered.push(format!(
            "{} AS ({})",
            quote_ident(name, options.ansi_quotes, &options.should_quote),
            format_window_spec(spec, options)?
        ));
    }
    Ok(rendered.join(", "))
}

/// Formats a `PARTITION BY ... ORDER BY ... <frame>` body, shared between
/// named `WINDOW` definitions and inline `OVER (...)` clauses.
pub(crate) fn format_window_spec(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let map = value
        .as_object()
        .ok_or_else(|| FormatError::UnknownNode("window spec is not an object".to_string()))?;
    let mut parts = Vec::new();
    if let Some(partition_by) = map.get("partitionby") {
        parts.push(format!("PARTITION BY {}", format_expr_list(partition_by, options)?));
    }
    if let Some(order_by) = map.get("orderby") {
        parts.push(format!("ORDER BY {}", format_order_by_items(order_by, options)?));
    }
    if let Some(range) = map.get("range") {
        let frame = range
            .as_object()
            .ok_or_else(|| FormatError::UnknownNode("window frame is not an object".to_string()))?;
        let mode = frame
            .get("mode")
            .and_then(Value::as_str)
            .ok_or_else(|| FormatError::UnknownNode("window frame is missing a mode".to_string()))?
            .to_uppercase();
        let min = frame
            .get("min")
            .and_then(Value::as_str)
            .ok_or_else(|| FormatError::UnknownNode("window frame is missing a lower bound".to_string()))?;
        match frame.get("max").and_then(Value::as_str) {
            Some(max) => parts.push(format!("{} BETWEEN {} AND {}", mode, min, max)),
            None => parts.push(format!("{} {}", mode, min)),
        }
    }
    Ok(parts.join(" "))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn opts() -> FormatOptions {
        FormatOptions::default()
    }

    #[test]
    fn simple_select_from() {
        let tree = json!({"select": {"value": "a"}, "from": "b"});
        assert_eq!(format_query_like(&tree, &opts()).unwrap(), "SELECT a FROM b");
    }

    #[test]
    fn select_with_join_on() {
        let tree = json!({
            "select": {"value": "a"},
            "from": ["t1", {"join": "t2", "on": {"eq": ["t1.id", "t2.id"]}}],
        });
        assert_eq!(
            format_query_like(&tree, &opts()).unwrap(),
            "SELECT a FROM t1 JOIN t2 ON t1.id = t2.id"
        );
    }

    #[test]
    fn select_with_two_from_items_and_join() {
        let tree = json!({
            "select": "*",
            "from": ["t1", {"join": "t2", "on": true}, "t3"],
        });
        assert_eq!(
            format_query_like(&tree, &opts()).unwrap(),
            "SELECT * FROM t1 JOIN t2 ON TRUE, t3"
        );
    }

    #[test]
    fn order_by_limit_offset() {
        let tree = json!({
            "select": {"value": "a"},
            "from": "b",
            "orderby": {"value": "a", "sort": "desc"},
            "limit": 10,
            "offset": 5,
        });
        assert_eq!(
            format_query_like(&tree, &opts()).unwrap(),
            "SELECT a FROM b ORDER BY a DESC LIMIT 10 OFFSET 5"
        );
    }

    #[test]
    fn union_all_of_two_selects() {
        let tree = json!({
            "union_all": [
                {"select": {"value": "a"}, "from": "t1"},
                {"select": {"value": "a"}, "from": "t2"},
            ]
        });
        assert_eq!(
            format_query_like(&tree, &opts()).unwrap(),
            "SELECT a FROM t1 UNION ALL SELECT a FROM t2"
        );
    }

    #[test]
    fn values_with_multiple_rows() {
        let tree = json!({"select": [[1, 2], [3, 4]]});
        assert_eq!(
            format_query_like(&tree, &opts()).unwrap(),
            "VALUES (1, 2), (3, 4)"
        );
    }

    #[test]
    fn group_by_rollup() {
        let tree = json!({
            "select": {"value": "a"},
            "from": "t",
            "groupby": {"rollup": ["a", "b"]},
        });
        assert_eq!(
            format_query_like(&tree, &opts()).unwrap(),
            "SELECT a FROM t GROUP BY ROLLUP (a, b)"
        );
    }

    #[test]
    fn derived_table_in_from() {
        let tree = json!({
            "select": "*",
            "from": {"value": {"select": {"value": "a"}, "from": "t"}, "name": "x"},
        });
        assert_eq!(
            format_query_like(&tree, &opts()).unwrap(),
            "SELECT * FROM (SELECT a FROM t) AS x"
        );
    }
}
