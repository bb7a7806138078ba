use serde_json::{Map, Value};

use crate::{
    error::FormatError,
    precedence::{self, needs_parens},
    quote::{quote_ident, quote_string_literal},
    query::format_query_like,
    FormatOptions,
};

/// The clause keys that mark an object as a query body rather than a
/// scalar/function-call expression; used to disambiguate `EXISTS (query)`
/// from `expr IS NOT NULL`, both of which scrub to `{"exists": x}`.
const QUERY_CLAUSE_KEYS: &[&str] = &[
    "with", "select", "select_distinct", "from", "where", "groupby", "having", "orderby",
    "limit", "offset", "fetch", "window", "union", "union_all", "intersect", "except",
];

fn looks_like_query(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.keys().any(|k| QUERY_CLAUSE_KEYS.contains(&k.as_str())),
        _ => false,
    }
}

/// Formats a value-expression node, recursing with its own precedence tier
/// so callers can decide whether to parenthesize it.
pub(crate) fn format_expr(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    Ok(format_expr_prec(value, options)?.0)
}

/// Returns the rendered text along with the tier it binds at, so the caller
/// can apply `needs_parens` without re-inspecting the node.
pub(crate) fn format_expr_prec(
    value: &Value,
    options: &FormatOptions,
) -> Result<(String, u8), FormatError> {
    match value {
        Value::Null => Ok(("NULL".to_string(), precedence::PRIMARY_PREC)),
        Value::Bool(b) => Ok((
            if *b { "TRUE" } else { "FALSE" }.to_string(),
            precedence::PRIMARY_PREC,
        )),
        Value::Number(n) => Ok((n.to_string(), precedence::PRIMARY_PREC)),
        Value::String(s) => Ok((
            quote_ident(s, options.ansi_quotes, &options.should_quote),
            precedence::PRIMARY_PREC,
        )),
        Value::Array(_) => Err(FormatError::UnknownNode(
            "bare array is not a value expression".to_string(),
        )),
        Value::Object(map) => format_object_expr(map, options),
    }
}

fn format_object_expr(
    map: &Map<String, Value>,
    options: &FormatOptions,
) -> Result<(String, u8), FormatError> {
    if let Some(literal) = map.get("literal") {
        return Ok((format_literal(literal)?, precedence::PRIMARY_PREC));
    }
    if map.contains_key("case") && map.len() == 1 {
        return Ok((format_case(&map["case"], options)?, precedence::PRIMARY_PREC));
    }
    if map.contains_key("substring") {
        return Ok((format_substring(map, options)?, precedence::PRIMARY_PREC));
    }
    if map.contains_key("trim") {
        return Ok((format_trim(map, options)?, precedence::PRIMARY_PREC));
    }
    if map.contains_key("value") && map.contains_key("over") {
        return Ok((format_window_call(map, options)?, precedence::PRIMARY_PREC));
    }
    if let Some(op) = map.get("op").and_then(Value::as_str) {
        if map.keys().all(|k| k == "op" || k == "args" || k == "kwargs") {
            let args = map.get("args");
            let kwargs = map.get("kwargs").and_then(Value::as_object);
            return Ok((
                format_named_call(op, args, kwargs, options)?,
                precedence::PRIMARY_PREC,
            ));
        }
    }
    if map.len() == 1 {
        let (op, args) = map.iter().next().unwrap();
        return format_named_op(op, args, options);
    }
    Err(FormatError::UnknownNode(format!(
        "expression node with keys {:?}",
        map.keys().collect::<Vec<_>>()
    )))
}

fn format_literal(literal: &Value) -> Result<String, FormatError> {
    match literal {
        Value::String(s) => Ok(quote_string_literal(s)),
        Value::Array(parts) => {
            let mut rendered = Vec::with_capacity(parts.len());
            for part in parts {
                match part {
                    Value::String(s) => rendered.push(quote_string_literal(s)),
                    other => {
                        return Err(FormatError::UnknownNode(format!(
                            "non-string element in literal sequence: {other}"
                        )))
                    }
                }
            }
            Ok(rendered.join(" "))
        }
        other => Err(FormatError::UnknownNode(format!(
            "unsupported literal shape: {other}"
        ))),
    }
}

/// Dispatches a single-key `{op: args}` node, trying every special form
/// before falling back to a generic function call.
fn format_named_op(
    op: &str,
    args: &Value,
    options: &FormatOptions,
) -> Result<(String, u8), FormatError> {
    if let Some((symbol, prec)) = precedence::binary_op(op) {
        let items = as_array(args, op, 2)?;
        return Ok((format_binary_chain(symbol, prec, items, options)?, prec));
    }
    if let Some((symbol, spaced, prec)) = precedence::unary_op(op) {
        let (operand, operand_prec) = format_expr_prec(args, options)?;
        let operand = paren_if(operand, needs_parens(operand_prec, prec, 1));
        let text = if spaced {
            format!("{} {}", symbol, operand)
        } else {
            format!("{}{}", symbol, operand)
        };
        return Ok((text, prec));
    }
    match op {
        "missing" => {
            let (operand, operand_prec) = format_expr_prec(args, options)?;
            let operand = paren_if(operand, needs_parens(operand_prec, precedence::IS_LIKE_PREC, 0));
            Ok((format!("{} IS NULL", operand), precedence::IS_LIKE_PREC))
        }
        "exists" if !looks_like_query(args) => {
            let (operand, operand_prec) = format_expr_prec(args, options)?;
            let operand = paren_if(operand, needs_parens(operand_prec, precedence::IS_LIKE_PREC, 0));
            Ok((format!("{} IS NOT NULL", operand), precedence::IS_LIKE_PREC))
        }
        "exists" => Ok((
            format!("EXISTS ({})", format_query_like(args, options)?),
            precedence::PRIMARY_PREC,
        )),
        "is_distinct_from" | "is_not_distinct_from" => {
            let items = as_array(args, op, 2)?;
            let left = format_operand(&items[0], precedence::IS_LIKE_PREC, 0, options)?;
            let right = format_operand(&items[1], precedence::IS_LIKE_PREC, 1, options)?;
            let keyword = if op == "is_distinct_from" {
                "IS DISTINCT FROM"
            } else {
                "IS NOT DISTINCT FROM"
            };
            Ok((format!("{} {} {}", left, keyword, right), precedence::IS_LIKE_PREC))
        }
        "in" | "not_in" => {
            let items = as_array(args, op, 2)?;
            let expr = format_operand(&items[0], precedence::IN_PREC, 0, options)?;
            let keyword = if op == "in" { "IN" } else { "NOT IN" };
            let list = format_in_operand(&items[1], options)?;
            Ok((format!("{} {} {}", expr, keyword, list), precedence::IN_PREC))
        }
        "between" | "not_between" => {
            let items = as_array(args, op, 3)?;
            let expr = format_operand(&items[0], precedence::BETWEEN_PREC, 0, options)?;
            let low = format_expr(&items[1], options)?;
            let high = format_expr(&items[2], options)?;
            let keyword = if op == "between" { "BETWEEN" } else { "NOT BETWEEN" };
            Ok((
                format!("{} {} {} AND {}", expr, keyword, low, high),
                precedence::BETWEEN_PREC,
            ))
        }
        "collate" => {
            let items = as_array(args, op, 2)?;
            let expr = format_operand(&items[0], precedence::COLLATE_PREC, 0, options)?;
            let collation = format_expr(&items[1], options)?;
            Ok((
                format!("{} COLLATE {}", expr, collation),
                precedence::COLLATE_PREC,
            ))
        }
        "cast" => {
            let items = as_array(args, op, 2)?;
            let expr = format_expr(&items[0], options)?;
            let ty = items[1]
                .as_str()
                .ok_or_else(|| FormatError::UnknownNode("cast target is not a string".to_string()))?;
            Ok((format!("CAST({} AS {})", expr, ty), precedence::PRIMARY_PREC))
        }
        "create_array" => {
            let items = format_array_items(args, options)?;
            Ok((format!("[{}]", items.join(", ")), precedence::PRIMARY_PREC))
        }
        "extract" => {
            let items = as_array(args, op, 2)?;
            let field = items[0]
                .as_str()
                .ok_or_else(|| FormatError::UnknownNode("extract field is not a string".to_string()))?;
            let expr = format_expr(&items[1], options)?;
            Ok((
                format!("EXTRACT({} FROM {})", field, expr),
                precedence::PRIMARY_PREC,
            ))
        }
        _ => Ok((format_function_call(op, args, options)?, precedence::PRIMARY_PREC)),
    }
}

/// Renders a `create_array` node's args, which per invariant 4 may have
/// degenerated to a bare scalar (single-element array) rather than staying
/// a JSON array.
fn format_array_items(args: &Value, options: &FormatOptions) -> Result<Vec<String>, FormatError> {
    match args {
        Value::Array(items) => items.iter().map(|item| format_expr(item, options)).collect(),
        other => Ok(vec![format_expr(other, options)?]),
    }
}

fn format_operand(
    value: &Value,
    parent_prec: u8,
    position: usize,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let (text, prec) = format_expr_prec(value, options)?;
    Ok(paren_if(text, needs_parens(prec, parent_prec, position)))
}

fn format_binary_chain(
    symbol: &str,
    prec: u8,
    items: &[Value],
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let mut rendered = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        rendered.push(format_operand(item, prec, i, options)?);
    }
    Ok(rendered.join(&format!(" {} ", symbol)))
}

fn format_in_operand(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    match value {
        Value::Array(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(format_expr(item, options)?);
            }
            Ok(format!("({})", rendered.join(", ")))
        }
        other if looks_like_query(other) => {
            Ok(format!("({})", format_query_like(other, options)?))
        }
        other => Ok(format!("({})", format_expr(other, options)?)),
    }
}

fn as_array<'a>(value: &'a Value, op: &str, expected_len: usize) -> Result<&'a [Value], FormatError> {
    match value.as_array() {
        Some(items) if items.len() == expected_len => Ok(items),
        Some(items) => Err(FormatError::InvalidArity {
            op: op.to_string(),
            expected: expected_len,
            found: items.len(),
        }),
        None => Err(FormatError::InvalidArity {
            op: op.to_string(),
            expected: expected_len,
            found: 1,
        }),
    }
}

fn format_case(arms: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    let arms = arms
        .as_array()
        .ok_or_else(|| FormatError::UnknownNode("case arms are not an array".to_string()))?;
    let mut out = String::from("CASE");
    for arm in arms {
        match arm {
            Value::Object(map) if map.contains_key("when") && map.contains_key("then") => {
                out.push_str(&format!(
                    " WHEN {} THEN {}",
                    format_expr(&map["when"], options)?,
                    format_expr(&map["then"], options)?
                ));
            }
            else_result => {
                out.push_str(&format!(" ELSE {}", format_expr(else_result, options)?));
            }
        }
    }
    out.push_str(" END");
    Ok(out)
}

fn format_substring(map: &Map<String, Value>, options: &FormatOptions) -> Result<String, FormatError> {
    let mut out = format!("SUBSTRING({}", format_expr(&map["substring"], options)?);
    if let Some(from) = map.get("start") {
        out.push_str(&format!(" FROM {}", format_expr(from, options)?));
    }
    if let Some(for_length) = map.get("length") {
        out.push_str(&format!(" FOR {}", format_expr(for_length, options)?));
    }
    out.push(')');
    Ok(out)
}

fn format_trim(map: &Map<String, Value>, options: &FormatOptions) -> Result<String, FormatError> {
    let mut out = String::from("TRIM(");
    if let Some(direction) = map.get("direction").and_then(Value::as_str) {
        out.push_str(&direction.to_uppercase());
        out.push(' ');
    }
    if let Some(characters) = map.get("characters") {
        out.push_str(&format_expr(characters, options)?);
        out.push_str(" FROM ");
    }
    out.push_str(&format_expr(&map["trim"], options)?);
    out.push(')');
    Ok(out)
}

fn format_window_call(map: &Map<String, Value>, options: &FormatOptions) -> Result<String, FormatError> {
    let value = format_expr(&map["value"], options)?;
    let over = crate::query::format_window_spec(&map["over"], options)?;
    Ok(format!("{} OVER ({})", value, over))
}

fn format_function_call(name: &str, args: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    format_named_call(name, Some(args), None, options)
}

fn format_named_call(
    name: &str,
    args: Option<&Value>,
    kwargs: Option<&Map<String, Value>>,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let rendered_name = quote_ident(name, options.ansi_quotes, &options.should_quote);
    let args_text = match args {
        None => String::new(),
        Some(Value::Object(map)) if map.is_empty() => String::new(),
        Some(Value::Object(map)) if map.len() == 1 && map.contains_key("distinct") => {
            format!("DISTINCT {}", format_distinct_args(&map["distinct"], options)?)
        }
        Some(Value::Array(items)) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(format_expr(item, options)?);
            }
            rendered.join(", ")
        }
        Some(other) => format_expr(other, options)?,
    };
    let mut text = format!("{}({})", rendered_name, args_text);
    if let Some(kwargs) = kwargs {
        if !kwargs.is_empty() {
            let mut rendered: Vec<String> = Vec::with_capacity(kwargs.len());
            for (key, value) in kwargs {
                rendered.push(format!("{} => {}", key, format_expr(value, options)?));
            }
            text = format!(
                "{}({}{}{})",
                rendered_name,
                args_text,
                if args_text.is_empty() { "" } else { ", " },
                rendered.join(", ")
            );
        }
    }
    Ok(text)
}

fn format_distinct_args(value: &Value, options: &FormatOptions) -> Result<String, FormatError> {
    match value {
        Value::Array(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(format_expr(item, options)?);
            }
            Ok(rendered.join(", "))
        }
        other => format_expr(other, options),
    }
}

fn paren_if(text: String, wrap: bool) -> String {
    if wrap {
        format!("({})", text)
    } else {
        text
    }
}
