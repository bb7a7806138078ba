#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;

/// A 1-based line/column position in the source text, recorded at the point
/// a lexer error was raised.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Line number, starting at 1.
    pub line: u64,
    /// Column number, starting at 1.
    pub column: u64,
    /// 0-based byte offset into the source text.
    pub offset: usize,
}

impl Location {
    pub(crate) fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += ch.len_utf8();
    }

    pub(crate) fn into_error(self, message: impl Into<String>) -> LexerError {
        LexerError {
            message: message.into(),
            location: self,
        }
    }
}

/// Lexer error: a message plus the 1-based line/column it was raised at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexerError {
    /// Human-readable description of the error.
    pub message: String,
    /// The position in the source text at which scanning failed.
    pub location: Location,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.location.line, self.location.column
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LexerError {}
