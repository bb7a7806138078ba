use serde_json::{Map, Value};

use crate::options::CallsMode;

/// A private marker substituted for every SQL `NULL` during the scrub walk
/// and replaced by the caller's configured sentinel in [`replace_nulls`].
/// The embedded NUL bytes make collision with any lexable SQL string
/// literal impossible.
const NULL_PLACEHOLDER: &str = "\u{0}__null__\u{0}";

/// Per-parse scrub state. Threaded through the walk instead of kept as
/// global mutable state, since nothing here needs to outlive one call to
/// [`crate::scrub`].
pub(crate) struct ScrubContext {
    pub(crate) calls: CallsMode,
}

impl ScrubContext {
    pub(crate) fn new(calls: CallsMode) -> Self {
        Self { calls }
    }
}

/// The scrub-time placeholder for a SQL `NULL` literal.
pub(crate) fn null_placeholder() -> Value {
    Value::String(NULL_PLACEHOLDER.to_string())
}

/// Replaces every `NULL_PLACEHOLDER` leaf in `value` with `null`, recursing
/// into arrays and objects. Runs once, after the scrub walk completes.
pub(crate) fn replace_nulls(value: Value, null: &Value) -> Value {
    match value {
        Value::String(ref s) if s == NULL_PLACEHOLDER => null.clone(),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| replace_nulls(item, null)).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, val)| (key, replace_nulls(val, null)))
                .collect(),
        ),
        other => other,
    }
}

/// Collapses an argument list per invariant 4: a single-element list
/// degenerates to its lone value, an empty list becomes an empty array, and
/// everything else stays an ordered array.
pub(crate) fn vec_to_value(mut items: Vec<Value>) -> Value {
    match items.len() {
        0 => Value::Array(items),
        1 => items.pop().unwrap(),
        _ => Value::Array(items),
    }
}

/// The arity-shaped argument payload of a call node, decided by the
/// grammar (unary vs. n-ary vs. no-argument) before the `calls` hook picks
/// the final shape.
pub(crate) enum CallArgs {
    /// `NOW()`
    None,
    /// A unary operator or single-argument function.
    One(Value),
    /// An n-ary operator chain or multi-argument function call.
    Many(Vec<Value>),
}

/// Routes one operator/function construction through the selected
/// [`CallsMode`], mirroring `simple_op`/`normal_op` exactly.
pub(crate) fn call_node(
    ctx: &ScrubContext,
    op: &str,
    args: CallArgs,
    kwargs: Map<String, Value>,
) -> Value {
    match ctx.calls {
        CallsMode::Simple => {
            let mut out = kwargs;
            let args_value = match args {
                CallArgs::None => Value::Object(Map::new()),
                CallArgs::One(v) => v,
                CallArgs::Many(vs) => Value::Array(vs),
            };
            out.insert(op.to_string(), args_value);
            Value::Object(out)
        }
        CallsMode::Normal => {
            let mut out = Map::new();
            out.insert("op".to_string(), Value::String(op.to_string()));
            let args_vec = match args {
                CallArgs::None => Vec::new(),
                CallArgs::One(v) => vec![v],
                CallArgs::Many(vs) => vs,
            };
            let keep_args = match args_vec.first() {
                None => false,
                Some(Value::Object(map)) => !map.is_empty(),
                Some(_) => true,
            };
            if keep_args {
                out.insert("args".to_string(), Value::Array(args_vec));
            }
            if !kwargs.is_empty() {
                out.insert("kwargs".to_string(), Value::Object(kwargs));
            }
            Value::Object(out)
        }
    }
}
