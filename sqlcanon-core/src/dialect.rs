use core::fmt::{Debug, Display};

/// A customizable SQL dialect structure, parameterized over a lexer and
/// parser configuration.
#[derive(Clone, Debug, Default)]
pub struct CustomDialect<L, P> {
    lexer_conf: L,
    parser_conf: P,
}

impl<L: DialectLexerConf, P: DialectParserConf> CustomDialect<L, P> {
    /// Creates a new SQL dialect from the given configurations.
    pub fn new(lexer_conf: L, parser_conf: P) -> Self {
        Self {
            lexer_conf,
            parser_conf,
        }
    }

    /// Returns the lexer configuration.
    pub fn lexer_conf(&self) -> &L {
        &self.lexer_conf
    }

    /// Returns the parser configuration.
    pub fn parser_conf(&self) -> &P {
        &self.parser_conf
    }
}

/// The marker for a dialect: common, mysql, sqlserver or bigquery.
pub trait Dialect: Debug {
    /// The keyword definition of the dialect.
    type Keyword: KeywordDef;

    /// The lexer configuration of the dialect.
    type LexerConf: DialectLexerConf;

    /// The parser configuration of the dialect.
    type ParserConf: DialectParserConf;

    /// Returns the lexer configuration.
    fn lexer_conf(&self) -> &Self::LexerConf;

    /// Returns the parser configuration.
    fn parser_conf(&self) -> &Self::ParserConf;
}

/// The marker for a keyword definition, generated by [`define_keyword!`].
pub trait KeywordDef
where
    Self: Copy + Clone + Debug + Display + Eq + 'static,
{
    /// All sorted keywords for the definition.
    const KEYWORDS: &'static [Self];

    /// All sorted keyword strings for the definition.
    const KEYWORD_STRINGS: &'static [&'static str];
}

/// The configuration of the lexer part of a dialect.
///
/// Drives the identifier/string-literal quoting matrix of the dialect
/// (`"x"`, `[x]`, `` `x` ``).
pub trait DialectLexerConf: Clone + Debug + Default {
    /// Determine if a character is the quotation mark of a string literal.
    /// The default, "single quote", is ANSI-compliant and holds for every
    /// dialect.
    fn is_string_literal_quotation(&self, ch: char) -> bool {
        ch == '\''
    }

    /// Determine if a character is the quotation mark of a double-quoted
    /// token. Whether this produces an identifier, a string literal, or an
    /// error is decided per-dialect in the lexer.
    fn is_double_quote(&self, ch: char) -> bool {
        ch == '"'
    }

    /// Determine if double-quoted tokens are string literals (MySQL,
    /// BigQuery) rather than delimited identifiers (common, SQL Server).
    fn double_quote_is_string_literal(&self) -> bool {
        false
    }

    /// Determine if `[...]` introduces a delimited identifier.
    fn bracket_is_identifier(&self) -> bool {
        false
    }

    /// Determine if `[...]` introduces an array literal.
    fn bracket_is_array(&self) -> bool {
        false
    }

    /// Determine if a character starts a backtick-quoted identifier.
    fn is_backtick_identifier_start(&self, ch: char) -> bool {
        ch == '`'
    }

    /// Determine if a character is a valid start character for an unquoted
    /// identifier.
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    /// Determine if a character is a valid part character for an unquoted
    /// identifier.
    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    }

    /// Determine if the whitespace token will be dropped from the token
    /// stream.
    fn ignore_whitespace(&self) -> bool {
        true
    }

    /// Determine if the comment token will be dropped from the token
    /// stream.
    fn ignore_comment(&self) -> bool {
        true
    }
}

/// The configuration of the parser part of a dialect. No dialect currently
/// needs parser-level configuration beyond the keyword table, but the seam
/// mirrors [`DialectLexerConf`] for symmetry and future extension.
pub trait DialectParserConf: Clone + Debug + Default {}
