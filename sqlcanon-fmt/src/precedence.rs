//! The operator precedence ladder of spec §4.2, keyed by the canonical
//! tree's `op` string (the same names `sqlcanon-scrub::expr` emits) rather
//! than by the parser's `BinaryOperator`/`UnaryOperator` enums, since the
//! formatter's input is the JSON tree, not the typed AST. Higher value
//! binds tighter, mirroring `sqlcanon-parser`'s `*_PREC` constants.

/// Binary infix operators, with their rendered symbol/keyword and tier.
pub(crate) fn binary_op(op: &str) -> Option<(&'static str, u8)> {
    Some(match op {
        "concat" => ("||", 130),
        "mul" => ("*", 120),
        "div" => ("/", 120),
        "mod" => ("%", 120),
        "add" => ("+", 100),
        "sub" => ("-", 100),
        "binary_and" => ("&", 90),
        "binary_or" => ("|", 90),
        "gte" => (">=", 80),
        "lte" => ("<=", 80),
        "lt" => ("<", 80),
        "gt" => (">", 80),
        "eq" => ("=", 70),
        "neq" => ("<>", 70),
        "like" => ("LIKE", 40),
        "not_like" => ("NOT LIKE", 40),
        "and" => ("AND", 20),
        "or" => ("OR", 10),
        _ => return None,
    })
}

/// Unary prefix operators, with their rendered keyword/symbol, a flag for
/// whether a space separates the operator from its operand, and the tier.
pub(crate) fn unary_op(op: &str) -> Option<(&'static str, bool, u8)> {
    Some(match op {
        "neg" => ("-", false, 110),
        "binary_not" => ("~", false, 110),
        "not" => ("NOT", true, 30),
        _ => return None,
    })
}

/// `COLLATE` binds as a postfix operator, tighter than everything else.
pub(crate) const COLLATE_PREC: u8 = 140;
/// `BETWEEN`/`NOT BETWEEN`.
pub(crate) const BETWEEN_PREC: u8 = 60;
/// `IN`/`NOT IN`.
pub(crate) const IN_PREC: u8 = 50;
/// `IS [NOT] ...`/`EXISTS`/`IS [NOT] DISTINCT FROM`.
pub(crate) const IS_LIKE_PREC: u8 = 40;
/// The precedence of a primary (identifier, literal, parenthesized
/// expression, function call): always tighter than any operator, so a
/// primary is never parenthesized as someone else's child.
pub(crate) const PRIMARY_PREC: u8 = u8::MAX;

/// Whether `child`, appearing at `position` (0 = leftmost) among its
/// parent's operands, needs parenthesizing given the parent's precedence.
/// Left operands of a left-associative chain never need parens at equal
/// precedence (the natural left-to-right grouping already matches); every
/// other position parenthesizes on a tie, per spec §4.6's tie-break rule.
pub(crate) fn needs_parens(child_prec: u8, parent_prec: u8, position: usize) -> bool {
    if position == 0 {
        child_prec < parent_prec
    } else {
        child_prec <= parent_prec
    }
}
