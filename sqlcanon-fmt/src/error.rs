use thiserror::Error;

/// Errors raised while rendering a canonical JSON parse tree back to SQL.
///
/// Unlike the lexer/parser errors earlier in the pipeline, these carry no
/// source location: the canonical tree no longer remembers where any node
/// came from, so a malformed tree can only be reported by the shape that
/// defeated the formatter.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The tree held an object/array shape the formatter doesn't recognize.
    #[error("unknown node: {0}")]
    UnknownNode(String),
    /// An operator's argument array didn't have the arity it requires.
    #[error("operator `{op}` expects {expected} argument(s), found {found}")]
    InvalidArity {
        op: String,
        expected: usize,
        found: usize,
    },
}
