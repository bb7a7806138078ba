use serde_json::{json, Number, Value};
use sqlcanon_ast::types::Literal;

use crate::context::null_placeholder;

/// Scrubs a literal value. String-shaped literals are always wrapped in
/// `{"literal": ...}` per invariant 2; `NULL` becomes the scrub-time
/// placeholder, back-patched by [`crate::context::replace_nulls`].
pub(crate) fn scrub_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Null => null_placeholder(),
        Literal::Boolean(v) => Value::Bool(*v),
        Literal::Number(raw) => scrub_number(raw),
        Literal::String(v) => json!({"literal": v}),
        Literal::StringSequence(parts) => json!({"literal": parts}),
        Literal::NationalString(v) => json!({"literal": v}),
        Literal::BitString(v) => json!({"literal": v}),
        Literal::HexString(v) => json!({"literal": v}),
        Literal::Date(date) => json!({"date": date.to_string()}),
        Literal::Time(time) => json!({"time": time.to_string()}),
        Literal::Timestamp(timestamp) => json!({"timestamp": timestamp.to_string()}),
        Literal::Interval(interval) => json!({"interval": interval.value, "unit": interval.leading_field.map(|f| f.to_string())}),
    }
}

/// Parses a literal's original text into a JSON number, falling back to the
/// raw text if it doesn't fit `i64`/`f64` (e.g. a number wider than either).
fn scrub_number(raw: &str) -> Value {
    if let Some(digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        if let Ok(int) = i64::from_str_radix(digits, 16) {
            return Value::Number(Number::from(int));
        }
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(Number::from(int));
    }
    if let Ok(float) = raw.parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_literal_is_wrapped() {
        assert_eq!(
            scrub_literal(&Literal::String("hello".into())),
            json!({"literal": "hello"})
        );
    }

    #[test]
    fn null_becomes_placeholder() {
        let placeholder = scrub_literal(&Literal::Null);
        assert!(matches!(placeholder, Value::String(ref s) if s.contains("__null__")));
    }

    #[test]
    fn integer_and_float_numbers() {
        assert_eq!(scrub_literal(&Literal::Number("42".into())), json!(42));
        assert_eq!(scrub_literal(&Literal::Number("4.5".into())), json!(4.5));
    }

    #[test]
    fn hex_literal_becomes_a_number() {
        assert_eq!(scrub_literal(&Literal::Number("0x1A2b".into())), json!(6699));
        assert_eq!(scrub_literal(&Literal::Number("0X0".into())), json!(0));
    }
}
