use thiserror::Error;

/// The unified error surface of every public entry point in this crate,
/// composing the per-stage error types of the pipeline it sits on top of.
#[derive(Debug, Error)]
pub enum Error {
    /// The lexer failed before parsing could start.
    #[error("lex error: {0}")]
    Lex(String),
    /// No grammar rule matched the input at some position.
    #[error("parse error: {0}")]
    Parse(String),
    /// A caller-supplied option value was not in its accepted set.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The formatter encountered a tree shape it doesn't recognize.
    #[error("format error: {0}")]
    Format(#[from] sqlcanon_fmt::FormatError),
}

impl From<sqlcanon_parser::ParserError> for Error {
    fn from(err: sqlcanon_parser::ParserError) -> Self {
        match &err {
            sqlcanon_parser::ParserError::TokenizeError(msg) => Error::Lex(msg.clone()),
            // `Display` folds in the position and source-text snippet (when
            // present), so `Error::Parse` carries the full spec §7 message.
            sqlcanon_parser::ParserError::ParseError { .. } => Error::Parse(err.to_string()),
        }
    }
}

/// A caller-supplied option value outside its accepted set (spec §7's
/// `ConfigError`: currently only raised by `all_columns`).
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// `all_columns` must be absent or exactly `"*"`.
    #[error("expected all_columns to be absent or \"*\", got {0:?}")]
    InvalidAllColumns(String),
}
