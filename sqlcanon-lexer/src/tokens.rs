#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
use core::fmt;

use sqlcanon_core::KeywordDef;

/// A single lexical token.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token<K> {
    /// Whitespace (space, newline, tab).
    Whitespace(Whitespace),
    /// Single-line or multi-line comment.
    Comment(Comment),

    /// An unsigned numeric literal, decimal or `0x`-prefixed hexadecimal.
    Number(String),
    /// Character string literal: `'string'`.
    String(String),
    /// National character string literal: `N'string'`.
    NationalString(String),
    /// Bit string literal: `B'101010'`.
    BitString(String),
    /// Hexadecimal string literal: `X'deadbeef'`.
    HexString(String),

    /// An optionally quoted SQL identifier.
    Ident(Ident),
    /// A reserved keyword.
    Keyword(K, &'static str),

    /// A character that could not be tokenized as part of any other token.
    Char(char),

    /// Comma `,`
    Comma,
    /// Semicolon `;`
    SemiColon,
    /// Period `.`
    Period,
    /// Colon `:`
    Colon,
    /// Double colon `::`
    DoubleColon,

    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,

    /// Equal `=`
    Equal,
    /// Not equal `<>` or `!=`
    NotEqual,
    /// Less than `<`
    LessThan,
    /// Less than or equal `<=`
    LessThanOrEqual,
    /// Greater than `>`
    GreaterThan,
    /// Greater than or equal `>=`
    GreaterThanOrEqual,

    /// Left shift `<<`
    LeftShift,
    /// Right shift `>>`
    RightShift,

    /// Plus `+`
    Plus,
    /// Minus `-`
    Minus,
    /// Asterisk `*`
    Asterisk,
    /// Slash `/`
    Slash,
    /// Percent `%`
    Percent,

    /// Caret `^`
    Caret,
    /// Exclamation `!`
    Exclamation,
    /// Double exclamation `!!`
    DoubleExclamation,
    /// Question `?`
    Question,
    /// Tilde `~`
    Tilde,
    /// Ampersand `&`
    Ampersand,
    /// Pipe `|`
    Pipe,
    /// Concat `||`
    Concat,
    /// Backslash `\`
    Backslash,
    /// Sharp `#`
    Sharp,
    /// At `@`
    At,
}

impl<K: fmt::Display> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Whitespace(space) => write!(f, "{}", space),
            Token::Comment(comment) => write!(f, "{}", comment),
            Token::Number(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "'{}'", s),
            Token::NationalString(s) => write!(f, "N'{}'", s),
            Token::BitString(s) => write!(f, "B'{}'", s),
            Token::HexString(s) => write!(f, "X'{}'", s),
            Token::Ident(ident) => write!(f, "{}", ident),
            Token::Keyword(keyword, _) => write!(f, "{}", keyword),
            Token::Char(c) => write!(f, "{}", c),
            Token::Comma => f.write_str(","),
            Token::SemiColon => f.write_str(";"),
            Token::Period => f.write_str("."),
            Token::Colon => f.write_str(":"),
            Token::DoubleColon => f.write_str("::"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::LeftBracket => f.write_str("["),
            Token::RightBracket => f.write_str("]"),
            Token::LeftBrace => f.write_str("{"),
            Token::RightBrace => f.write_str("}"),
            Token::Equal => f.write_str("="),
            Token::NotEqual => f.write_str("<>"),
            Token::LessThan => f.write_str("<"),
            Token::LessThanOrEqual => f.write_str("<="),
            Token::GreaterThan => f.write_str(">"),
            Token::GreaterThanOrEqual => f.write_str(">="),
            Token::LeftShift => f.write_str("<<"),
            Token::RightShift => f.write_str(">>"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Asterisk => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Percent => f.write_str("%"),
            Token::Caret => f.write_str("^"),
            Token::Exclamation => f.write_str("!"),
            Token::DoubleExclamation => f.write_str("!!"),
            Token::Question => f.write_str("?"),
            Token::Tilde => f.write_str("~"),
            Token::Ampersand => f.write_str("&"),
            Token::Pipe => f.write_str("|"),
            Token::Concat => f.write_str("||"),
            Token::Backslash => f.write_str("\\"),
            Token::Sharp => f.write_str("#"),
            Token::At => f.write_str("@"),
        }
    }
}

impl<K: KeywordDef> Token<K> {
    /// Looks up `ident` in `K`'s reserved-word table and, if it matches,
    /// returns the keyword token (case-insensitively).
    pub fn keyword(ident: impl AsRef<str>) -> Option<Self> {
        let upper = ident.as_ref().to_uppercase();
        K::KEYWORD_STRINGS
            .binary_search(&upper.as_str())
            .map(|i| Self::Keyword(K::KEYWORDS[i], K::KEYWORD_STRINGS[i]))
            .ok()
    }

    /// Creates an (unquoted) identifier or, if `value` matches a reserved
    /// word and `quote` is `None`, the corresponding keyword token.
    pub fn make(value: impl Into<String> + AsRef<str>, quote: Option<char>) -> Self {
        if quote.is_none() {
            if let Some(keyword) = Self::keyword(&value) {
                return keyword;
            }
        }
        Self::ident(value, quote)
    }

    /// Creates an optionally quoted SQL identifier, bypassing keyword lookup.
    pub fn ident(value: impl Into<String>, quote: Option<char>) -> Self {
        Self::Ident(Ident {
            value: value.into(),
            quote,
        })
    }
}

impl<K> Token<K> {
    /// Returns `true` if this token is whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }

    /// Returns `true` if this token is a comment.
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::Comment(_))
    }
}

/// Whitespace token.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Whitespace {
    /// `' '`
    Space,
    /// `'\n'` (also emitted for `'\r'` and `'\r\n'`)
    Newline,
    /// `'\t'`
    Tab,
}

impl fmt::Display for Whitespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => f.write_str(" "),
            Self::Newline => f.write_str("\n"),
            Self::Tab => f.write_str("\t"),
        }
    }
}

/// Comment token.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comment {
    /// A `--` (or dialect-specific prefix) single-line comment.
    SingleLine {
        /// The prefix that introduced the comment (e.g. `"--"`).
        prefix: String,
        /// The comment text, including the trailing newline if present.
        comment: String,
    },
    /// A `/* ... */` comment, possibly nested, split by line.
    MultiLine(Vec<String>),
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleLine { prefix, comment } => write!(f, "{}{}", prefix, comment),
            Self::MultiLine(lines) => write!(f, "/*{}*/", lines.join("\n")),
        }
    }
}

/// An optionally quoted SQL identifier.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ident {
    /// The value of the identifier, with quotes and escapes stripped.
    pub value: String,
    /// The quoting style used, if any: `'"'` or `` '`' ``.
    pub quote: Option<char>,
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
