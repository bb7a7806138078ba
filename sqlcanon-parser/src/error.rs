#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
use core::fmt;

pub use sqlcanon_lexer::Location;
use sqlcanon_lexer::LexerError;

/// A parser-level error: either the lexer failed to tokenize the input, or
/// no grammar rule matched at the current position.
///
/// `location`/`snippet` are `None` when an error is raised with no token
/// position in hand (e.g. validating the body of an already-consumed
/// literal); every error raised while consuming tokens from the `Parser`
/// carries both, per spec §7.
#[derive(Clone, Debug, PartialEq)]
pub enum ParserError {
    /// The lexer failed before parsing could start.
    TokenizeError(String),
    /// No grammar rule matched at the current position.
    ParseError {
        /// What was expected and what was found instead.
        message: String,
        /// The line/column/offset the error was raised at, when available.
        location: Option<Location>,
        /// A short window of source text surrounding `location`.
        snippet: Option<String>,
    },
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::TokenizeError(s) => f.write_str(s),
            ParserError::ParseError {
                message,
                location,
                snippet,
            } => {
                f.write_str(message)?;
                if let Some(location) = location {
                    write!(f, " at line {}, column {}", location.line, location.column)?;
                }
                if let Some(snippet) = snippet {
                    write!(f, " (near \"{}\")", snippet)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParserError {}

impl From<LexerError> for ParserError {
    fn from(err: LexerError) -> Self {
        Self::TokenizeError(err.to_string())
    }
}

impl ParserError {
    /// Returns the error's message, without its position/snippet.
    pub fn message(&self) -> &str {
        match self {
            ParserError::TokenizeError(s) => s,
            ParserError::ParseError { message, .. } => message,
        }
    }

    /// Fills in `location`/`snippet` if they aren't already set. Lets
    /// callers with access to a `Parser` (and hence a position) enrich an
    /// error built by a free function that only had a literal's text.
    pub(crate) fn located_at(mut self, location: Location, snippet: impl Into<String>) -> Self {
        if let ParserError::ParseError {
            location: loc,
            snippet: snip,
            ..
        } = &mut self
        {
            if loc.is_none() {
                *loc = Some(location);
                *snip = Some(snippet.into());
            }
        }
        self
    }
}

/// Builds a `ParseError` value from a message, with no position available.
pub(crate) fn parse_error_value(message: impl Into<String>) -> ParserError {
    ParserError::ParseError {
        message: message.into(),
        location: None,
        snippet: None,
    }
}

/// Builds a `ParseError` from a message, with no position available.
pub(crate) fn parse_error<R>(message: impl Into<String>) -> Result<R, ParserError> {
    Err(parse_error_value(message))
}
