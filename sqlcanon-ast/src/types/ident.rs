#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An identifier, decomposed into its value and the quote style.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ident {
    /// The value of the identifier without quotes.
    pub value: String,
    /// An identifier can be "quoted" (<delimited identifier> in ANSI
    /// parlance). Valid quote characters are `"`, `` ` ``, and `[`
    /// (SQL Server, closed by `]`).
    pub quote: Option<char>,
}

impl Ident {
    /// Creates a new, unquoted identifier.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Ident {
            value: value.into(),
            quote: None,
        }
    }

    /// Creates a new quoted identifier. Panics if `quote` is not a valid
    /// identifier quote character.
    pub fn with_quote<S: Into<String>>(quote: char, value: S) -> Self {
        assert!(quote == '"' || quote == '`' || quote == '[');
        Ident {
            value: value.into(),
            quote: Some(quote),
        }
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value.to_string())
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote {
            None => f.write_str(&self.value),
            Some(q) if q == '"' || q == '`' => write!(f, "{}{}{}", q, self.value, q),
            Some('[') => write!(f, "[{}]", self.value),
            Some(q) => panic!("unsupported quote character {} for SQL identifier", q),
        }
    }
}
