use serde_json::{Map, Value};
use sqlcanon_ast::expression::{
    function::WindowSpec, From, GroupBy, GroupingElement, Join, JoinOperator, JoinSpec, OrderBy,
    Query, QueryBody, QueryBodyOperator, SelectItem, SetQuantifier, SortSpec, TableFactor,
    TableReference, Window, With,
};

use crate::{
    context::{vec_to_value, ScrubContext},
    expr::scrub_expr,
    literal::scrub_literal,
    util::{ident_value, object_name_value},
};

/// Scrubs a full query: the optional `WITH` prefix, the body (a `SELECT`,
/// set operation, or `VALUES`), and the trailing `ORDER BY`/`LIMIT`/
/// `OFFSET`/`FETCH` clauses, all flattened into one clause mapping.
pub(crate) fn scrub_query(query: &Query, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    if let Some(with) = &query.with {
        map.insert("with".to_string(), scrub_with(with, ctx));
    }
    scrub_query_body(&query.body, ctx, &mut map);
    if let Some(order_by) = &query.order_by {
        map.insert("orderby".to_string(), scrub_order_by(order_by, ctx));
    }
    if let Some(limit) = &query.limit {
        map.insert("limit".to_string(), scrub_literal(&limit.count));
    }
    if let Some(offset) = &query.offset {
        map.insert("offset".to_string(), scrub_literal(&offset.count));
    }
    if let Some(fetch) = &query.fetch {
        let value = match &fetch.quantity {
            Some(quantity) => scrub_literal(quantity),
            None => Value::from(1),
        };
        map.insert("fetch".to_string(), value);
    }
    Value::Object(map)
}

fn scrub_with(with: &With, ctx: &ScrubContext) -> Value {
    let ctes = with
        .ctes
        .iter()
        .map(|cte| {
            let mut map = Map::new();
            map.insert("name".to_string(), Value::String(ident_value(&cte.name)));
            if !cte.columns.is_empty() {
                map.insert(
                    "columns".to_string(),
                    Value::Array(cte.columns.iter().map(|c| Value::String(ident_value(c))).collect()),
                );
            }
            map.insert("value".to_string(), scrub_query(&cte.query, ctx));
            Value::Object(map)
        })
        .collect();
    vec_to_value(ctes)
}

fn set_op_key(op: QueryBodyOperator, quantifier: SetQuantifier) -> &'static str {
    match (op, quantifier) {
        (QueryBodyOperator::Union, SetQuantifier::All) => "union_all",
        (QueryBodyOperator::Union, SetQuantifier::Distinct) => "union",
        (QueryBodyOperator::Intersect, _) => "intersect",
        (QueryBodyOperator::Except, _) => "except",
    }
}

fn scrub_query_body(body: &QueryBody, ctx: &ScrubContext, map: &mut Map<String, Value>) {
    match body {
        QueryBody::QuerySpec(spec) => {
            let key = match spec.quantifier {
                SetQuantifier::Distinct => "select_distinct",
                SetQuantifier::All => "select",
            };
            let projection = vec_to_value(
                spec.projection
                    .iter()
                    .map(|item| scrub_select_item(item, ctx))
                    .collect(),
            );
            map.insert(key.to_string(), projection);
            if let Some(from) = &spec.from {
                map.insert("from".to_string(), scrub_from(from, ctx));
            }
            if let Some(selection) = &spec.selection {
                map.insert("where".to_string(), scrub_expr(&selection.expr, ctx));
            }
            if let Some(group_by) = &spec.group_by {
                map.insert("groupby".to_string(), scrub_group_by(group_by, ctx));
            }
            if let Some(having) = &spec.having {
                map.insert("having".to_string(), scrub_expr(&having.expr, ctx));
            }
            if let Some(window) = &spec.window {
                map.insert("window".to_string(), scrub_window(window, ctx));
            }
        }
        QueryBody::Subquery(query) => {
            if let Value::Object(inner) = scrub_query(query, ctx) {
                map.extend(inner);
            }
        }
        QueryBody::Values(values) => {
            let rows = values
                .list
                .iter()
                .map(|row| Value::Array(row.iter().map(|expr| scrub_expr(expr, ctx)).collect()))
                .collect();
            map.insert("select".to_string(), vec_to_value(rows));
        }
        QueryBody::Table(name) => {
            map.insert("select".to_string(), Value::String("*".to_string()));
            map.insert("from".to_string(), Value::String(object_name_value(name)));
        }
        QueryBody::Operation {
            left,
            op,
            quantifier,
            right,
        } => {
            let key = set_op_key(*op, *quantifier);
            let mut operands = Vec::new();
            flatten_same_set_op(left, *op, *quantifier, ctx, &mut operands);
            operands.push(scrub_query_body_operand(right, ctx));
            map.insert(key.to_string(), vec_to_value(operands));
        }
    }
}

fn scrub_query_body_operand(body: &QueryBody, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    scrub_query_body(body, ctx, &mut map);
    Value::Object(map)
}

fn flatten_same_set_op(
    body: &QueryBody,
    op: QueryBodyOperator,
    quantifier: SetQuantifier,
    ctx: &ScrubContext,
    out: &mut Vec<Value>,
) {
    if let QueryBody::Operation {
        left,
        op: inner_op,
        quantifier: inner_quantifier,
        right,
    } = body
    {
        if set_op_key(*inner_op, *inner_quantifier) == set_op_key(op, quantifier) {
            flatten_same_set_op(left, *inner_op, *inner_quantifier, ctx, out);
            out.push(scrub_query_body_operand(right, ctx));
            return;
        }
    }
    out.push(scrub_query_body_operand(body, ctx));
}

fn scrub_select_item(item: &SelectItem, ctx: &ScrubContext) -> Value {
    match item {
        SelectItem::Wildcard => Value::String("*".to_string()),
        SelectItem::QualifiedWildcard(name) => {
            Value::String(format!("{}.*", object_name_value(name)))
        }
        SelectItem::DerivedColumn { expr, alias } => {
            let mut map = Map::new();
            map.insert("value".to_string(), scrub_expr(expr, ctx));
            if let Some(alias) = alias {
                map.insert("name".to_string(), Value::String(ident_value(alias)));
            }
            Value::Object(map)
        }
    }
}

fn scrub_from(from: &From, ctx: &ScrubContext) -> Value {
    let mut items = Vec::new();
    for table_reference in &from.list {
        scrub_table_reference(table_reference, ctx, &mut items);
    }
    vec_to_value(items)
}

fn scrub_table_reference(table_reference: &TableReference, ctx: &ScrubContext, out: &mut Vec<Value>) {
    out.push(scrub_table_factor(&table_reference.relation, ctx));
    for join in &table_reference.joins {
        out.push(scrub_join(join, ctx));
    }
}

fn scrub_table_factor(factor: &TableFactor, ctx: &ScrubContext) -> Value {
    match factor {
        TableFactor::Table { name, alias } => match alias {
            Some(alias) => {
                let mut map = Map::new();
                map.insert("value".to_string(), Value::String(object_name_value(name)));
                map.insert("name".to_string(), Value::String(ident_value(&alias.name)));
                Value::Object(map)
            }
            None => Value::String(object_name_value(name)),
        },
        TableFactor::Derived {
            lateral,
            subquery,
            alias,
        } => {
            let mut map = Map::new();
            map.insert("value".to_string(), scrub_query(subquery, ctx));
            if let Some(alias) = alias {
                map.insert("name".to_string(), Value::String(ident_value(&alias.name)));
            }
            if *lateral {
                map.insert("lateral".to_string(), Value::Bool(true));
            }
            Value::Object(map)
        }
        TableFactor::NestedJoin(table_reference) => {
            let mut items = Vec::new();
            scrub_table_reference(table_reference, ctx, &mut items);
            vec_to_value(items)
        }
    }
}

fn scrub_join(join: &Join, ctx: &ScrubContext) -> Value {
    let (key, spec) = match &join.join {
        JoinOperator::Cross => ("cross join", None),
        JoinOperator::Inner(spec) => ("join", Some(spec)),
        JoinOperator::LeftOuter(spec) => ("left join", Some(spec)),
        JoinOperator::RightOuter(spec) => ("right join", Some(spec)),
        JoinOperator::FullOuter(spec) => ("full join", Some(spec)),
    };
    let mut map = Map::new();
    map.insert(key.to_string(), scrub_table_factor(&join.relation, ctx));
    if let Some(spec) = spec {
        match spec {
            JoinSpec::On(expr) => {
                map.insert("on".to_string(), scrub_expr(expr, ctx));
            }
            JoinSpec::Using(columns) => {
                map.insert(
                    "using".to_string(),
                    vec_to_value(columns.iter().map(|c| Value::String(ident_value(c))).collect()),
                );
            }
        }
    }
    Value::Object(map)
}

fn scrub_group_by(group_by: &GroupBy, ctx: &ScrubContext) -> Value {
    vec_to_value(
        group_by
            .list
            .iter()
            .map(|element| match element {
                GroupingElement::Expr(expr) => scrub_expr(expr, ctx),
                GroupingElement::Rollup(exprs) => {
                    let mut map = Map::new();
                    map.insert(
                        "rollup".to_string(),
                        vec_to_value(exprs.iter().map(|e| scrub_expr(e, ctx)).collect()),
                    );
                    Value::Object(map)
                }
                GroupingElement::Cube(exprs) => {
                    let mut map = Map::new();
                    map.insert(
                        "cube".to_string(),
                        vec_to_value(exprs.iter().map(|e| scrub_expr(e, ctx)).collect()),
                    );
                    Value::Object(map)
                }
            })
            .collect(),
    )
}

fn scrub_sort_spec(sort: &SortSpec, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    map.insert("value".to_string(), scrub_expr(&sort.expr, ctx));
    match sort.asc {
        Some(true) => {
            map.insert("sort".to_string(), Value::String("asc".to_string()));
        }
        Some(false) => {
            map.insert("sort".to_string(), Value::String("desc".to_string()));
        }
        None => {}
    }
    Value::Object(map)
}

fn scrub_order_by(order_by: &OrderBy, ctx: &ScrubContext) -> Value {
    vec_to_value(order_by.list.iter().map(|sort| scrub_sort_spec(sort, ctx)).collect())
}

fn scrub_window(window: &Window, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    for def in &window.list {
        map.insert(ident_value(&def.name), scrub_window_spec(&def.window_spec, ctx));
    }
    Value::Object(map)
}

/// Scrubs `PARTITION BY ... ORDER BY ... <frame>`, shared between named
/// `WINDOW` definitions and inline `OVER (...)` clauses.
pub(crate) fn scrub_window_spec(spec: &WindowSpec, ctx: &ScrubContext) -> Value {
    let mut map = Map::new();
    if !spec.partition_by.is_empty() {
        map.insert(
            "partitionby".to_string(),
            vec_to_value(spec.partition_by.iter().map(|e| scrub_expr(e, ctx)).collect()),
        );
    }
    if !spec.order_by.is_empty() {
        map.insert(
            "orderby".to_string(),
            vec_to_value(spec.order_by.iter().map(|s| scrub_sort_spec(s, ctx)).collect()),
        );
    }
    if let Some(frame) = &spec.window_frame {
        let mut frame_map = Map::new();
        frame_map.insert(
            "mode".to_string(),
            Value::String(frame.units.to_string().to_lowercase()),
        );
        frame_map.insert("min".to_string(), Value::String(frame.start_bound.to_string()));
        if let Some(end_bound) = &frame.end_bound {
            frame_map.insert("max".to_string(), Value::String(end_bound.to_string()));
        }
        map.insert("range".to_string(), Value::Object(frame_map));
    }
    Value::Object(map)
}
