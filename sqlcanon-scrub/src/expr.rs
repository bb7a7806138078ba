use serde_json::{Map, Value};
use sqlcanon_ast::{
    expression::{BinaryOperator, Function, FunctionArg, TrimWhereField, UnaryOperator},
    Expr,
};

use crate::{
    context::{call_node, vec_to_value, CallArgs, ScrubContext},
    literal::scrub_literal,
    query::{scrub_query, scrub_window_spec},
    util::{ident_value, object_name_value},
};

/// Scrubs a value expression into the canonical tree, routing every
/// operator and function construction through the `calls` hook.
pub(crate) fn scrub_expr(expr: &Expr, ctx: &ScrubContext) -> Value {
    match expr {
        Expr::Ident(ident) => Value::String(ident_value(ident)),
        Expr::CompoundIdent(parts) => Value::String(
            parts
                .iter()
                .map(|part| part.value.as_str())
                .collect::<Vec<_>>()
                .join("."),
        ),
        Expr::Wildcard => Value::String("*".to_string()),
        Expr::QualifiedWildcard(name) => Value::String(format!("{}.*", object_name_value(name))),
        Expr::Literal(literal) => scrub_literal(literal),
        Expr::Nested(inner) => scrub_expr(inner, ctx),
        Expr::Subquery(query) => scrub_query(query, ctx),
        Expr::Collate { expr, collation } => call_node(
            ctx,
            "collate",
            CallArgs::Many(vec![
                scrub_expr(expr, ctx),
                Value::String(object_name_value(collation)),
            ]),
            Map::new(),
        ),
        Expr::UnaryOp { op, expr } => scrub_unary_op(*op, expr, ctx),
        Expr::BinaryOp { left, op, right } => scrub_binary_chain(left, *op, right, ctx),
        Expr::IsNull(expr) => {
            let mut map = Map::new();
            map.insert("missing".to_string(), scrub_expr(expr, ctx));
            Value::Object(map)
        }
        Expr::IsNotNull(expr) => {
            let mut map = Map::new();
            map.insert("exists".to_string(), scrub_expr(expr, ctx));
            Value::Object(map)
        }
        Expr::IsDistinctFrom { left, right } => call_node(
            ctx,
            "is_distinct_from",
            CallArgs::Many(vec![scrub_expr(left, ctx), scrub_expr(right, ctx)]),
            Map::new(),
        ),
        Expr::IsNotDistinctFrom { left, right } => call_node(
            ctx,
            "is_not_distinct_from",
            CallArgs::Many(vec![scrub_expr(left, ctx), scrub_expr(right, ctx)]),
            Map::new(),
        ),
        Expr::InList {
            expr,
            list,
            negated,
        } => {
            let list_value = Value::Array(list.iter().map(|item| scrub_expr(item, ctx)).collect());
            call_node(
                ctx,
                if *negated { "not_in" } else { "in" },
                CallArgs::Many(vec![scrub_expr(expr, ctx), list_value]),
                Map::new(),
            )
        }
        Expr::InSubquery {
            expr,
            subquery,
            negated,
        } => call_node(
            ctx,
            if *negated { "not_in" } else { "in" },
            CallArgs::Many(vec![scrub_expr(expr, ctx), scrub_query(subquery, ctx)]),
            Map::new(),
        ),
        Expr::Between {
            expr,
            negated,
            low,
            high,
        } => call_node(
            ctx,
            if *negated { "not_between" } else { "between" },
            CallArgs::Many(vec![
                scrub_expr(expr, ctx),
                scrub_expr(low, ctx),
                scrub_expr(high, ctx),
            ]),
            Map::new(),
        ),
        Expr::Exists(query) => call_node(
            ctx,
            "exists",
            CallArgs::One(scrub_query(query, ctx)),
            Map::new(),
        ),
        Expr::Cast { expr, data_type } => call_node(
            ctx,
            "cast",
            CallArgs::Many(vec![
                scrub_expr(expr, ctx),
                Value::String(data_type.to_string()),
            ]),
            Map::new(),
        ),
        Expr::Extract { field, expr } => call_node(
            ctx,
            "extract",
            CallArgs::Many(vec![Value::String(field.to_string()), scrub_expr(expr, ctx)]),
            Map::new(),
        ),
        Expr::Substring {
            expr,
            from,
            for_length,
        } => {
            let mut map = Map::new();
            map.insert("substring".to_string(), scrub_expr(expr, ctx));
            if let Some(from) = from {
                map.insert("start".to_string(), scrub_expr(from, ctx));
            }
            if let Some(for_length) = for_length {
                map.insert("length".to_string(), scrub_expr(for_length, ctx));
            }
            Value::Object(map)
        }
        Expr::Trim {
            expr,
            trim_where,
            trim_what,
        } => {
            let mut map = Map::new();
            map.insert("trim".to_string(), scrub_expr(expr, ctx));
            if let Some(trim_where) = trim_where {
                map.insert(
                    "direction".to_string(),
                    Value::String(trim_where_name(*trim_where).to_string()),
                );
            }
            if let Some(trim_what) = trim_what {
                map.insert("characters".to_string(), scrub_expr(trim_what, ctx));
            }
            Value::Object(map)
        }
        Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        } => scrub_case(operand.as_deref(), conditions, results, else_result.as_deref(), ctx),
        Expr::Function(function) => scrub_function(function, ctx),
        Expr::Array(items) => scrub_array(items, ctx),
    }
}

/// Scrubs a BigQuery array literal into a `create_array` call node, per the
/// `mo-sql-parsing`-style op naming used for array construction. Unlike
/// `scrub_function`, the empty case stays `Many` rather than `None`: an
/// empty array literal must scrub to `[]`, not the `{}` a no-argument
/// function call gets.
fn scrub_array(items: &[Expr], ctx: &ScrubContext) -> Value {
    let mut values: Vec<Value> = items.iter().map(|item| scrub_expr(item, ctx)).collect();
    let args = if values.len() == 1 {
        CallArgs::One(values.pop().unwrap())
    } else {
        CallArgs::Many(values)
    };
    call_node(ctx, "create_array", args, Map::new())
}

fn unary_op_name(op: UnaryOperator) -> Option<&'static str> {
    match op {
        UnaryOperator::Plus => None,
        UnaryOperator::Minus => Some("neg"),
        UnaryOperator::Not => Some("not"),
        UnaryOperator::BitwiseNot => Some("binary_not"),
    }
}

fn scrub_unary_op(op: UnaryOperator, expr: &Expr, ctx: &ScrubContext) -> Value {
    let operand = scrub_expr(expr, ctx);
    match unary_op_name(op) {
        // Unary `+` is a no-op; it doesn't change the value, so it's
        // dropped rather than wrapped in its own node.
        None => operand,
        Some(name) => call_node(ctx, name, CallArgs::One(operand), Map::new()),
    }
}

fn binary_op_name(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::StringConcat => "concat",
        BinaryOperator::Multiply => "mul",
        BinaryOperator::Divide => "div",
        BinaryOperator::Modulo => "mod",
        BinaryOperator::Plus => "add",
        BinaryOperator::Minus => "sub",
        BinaryOperator::BitwiseAnd => "binary_and",
        BinaryOperator::BitwiseOr => "binary_or",
        BinaryOperator::GreaterThanOrEqual => "gte",
        BinaryOperator::LessThanOrEqual => "lte",
        BinaryOperator::LessThan => "lt",
        BinaryOperator::GreaterThan => "gt",
        BinaryOperator::Equal => "eq",
        BinaryOperator::NotEqual => "neq",
        BinaryOperator::And => "and",
        BinaryOperator::Or => "or",
        BinaryOperator::Like => "like",
        BinaryOperator::NotLike => "not_like",
    }
}

/// Builds a binary operator node, flattening a left-associative chain of the
/// same operator (`a + b + c`) into one node with an ordered argument
/// sequence rather than nesting, per the scrub rules for expressions.
fn scrub_binary_chain(left: &Expr, op: BinaryOperator, right: &Expr, ctx: &ScrubContext) -> Value {
    let mut args = Vec::new();
    flatten_same_op(left, op, ctx, &mut args);
    args.push(scrub_expr(right, ctx));
    call_node(ctx, binary_op_name(op), CallArgs::Many(args), Map::new())
}

fn flatten_same_op(expr: &Expr, op: BinaryOperator, ctx: &ScrubContext, out: &mut Vec<Value>) {
    if let Expr::BinaryOp {
        left,
        op: inner_op,
        right,
    } = expr
    {
        if *inner_op == op {
            flatten_same_op(left, op, ctx, out);
            out.push(scrub_expr(right, ctx));
            return;
        }
    }
    out.push(scrub_expr(expr, ctx));
}

fn trim_where_name(field: TrimWhereField) -> &'static str {
    match field {
        TrimWhereField::Both => "both",
        TrimWhereField::Leading => "leading",
        TrimWhereField::Trailing => "trailing",
    }
}

fn scrub_case(
    operand: Option<&Expr>,
    conditions: &[Expr],
    results: &[Expr],
    else_result: Option<&Expr>,
    ctx: &ScrubContext,
) -> Value {
    let mut arms = Vec::with_capacity(conditions.len() + 1);
    for (condition, result) in conditions.iter().zip(results) {
        let condition_value = scrub_expr(condition, ctx);
        let when_value = match operand {
            Some(operand) => call_node(
                ctx,
                "eq",
                CallArgs::Many(vec![scrub_expr(operand, ctx), condition_value]),
                Map::new(),
            ),
            None => condition_value,
        };
        let mut arm = Map::new();
        arm.insert("when".to_string(), when_value);
        arm.insert("then".to_string(), scrub_expr(result, ctx));
        arms.push(Value::Object(arm));
    }
    if let Some(else_result) = else_result {
        arms.push(scrub_expr(else_result, ctx));
    }
    let mut map = Map::new();
    map.insert("case".to_string(), Value::Array(arms));
    Value::Object(map)
}

fn scrub_function(function: &Function, ctx: &ScrubContext) -> Value {
    let mut positional = Vec::new();
    let mut kwargs = Map::new();
    for arg in &function.args {
        match arg {
            FunctionArg::Unnamed(expr) => positional.push(scrub_expr(expr, ctx)),
            FunctionArg::Named { name, arg } => {
                kwargs.insert(ident_value(name), scrub_expr(arg, ctx));
            }
        }
    }

    let args = if function.distinct {
        let mut distinct = Map::new();
        distinct.insert("distinct".to_string(), vec_to_value(positional));
        CallArgs::One(Value::Object(distinct))
    } else {
        match positional.len() {
            0 => CallArgs::None,
            1 => CallArgs::One(positional.pop().unwrap()),
            _ => CallArgs::Many(positional),
        }
    };

    let name = object_name_value(&function.name);
    let node = call_node(ctx, &name, args, kwargs);
    match &function.over {
        Some(window_spec) => {
            let mut map = Map::new();
            map.insert("value".to_string(), node);
            map.insert("over".to_string(), scrub_window_spec(window_spec, ctx));
            Value::Object(map)
        }
        None => node,
    }
}
