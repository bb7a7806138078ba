//! The BigQuery dialect.
//!
//! `"x"` is a string literal, `[x]` is an array literal, `` `x` `` is a
//! delimited identifier.

mod keyword;

pub use self::keyword::BigQueryKeyword;

use crate::{Dialect, DialectLexerConf, DialectParserConf};

/// The BigQuery dialect's lexer configuration: `"x"` is a string literal,
/// `[x]` is an array literal, `` `x` `` is a delimited identifier.
#[derive(Clone, Debug, Default)]
pub struct BigQueryLexerConf;

impl DialectLexerConf for BigQueryLexerConf {
    fn double_quote_is_string_literal(&self) -> bool {
        true
    }

    fn bracket_is_array(&self) -> bool {
        true
    }
}

/// The BigQuery dialect's parser configuration.
#[derive(Clone, Debug, Default)]
pub struct BigQueryParserConf;

impl DialectParserConf for BigQueryParserConf {}

/// The BigQuery dialect marker type.
#[derive(Clone, Debug, Default)]
pub struct BigQueryDialect {
    lexer_conf: BigQueryLexerConf,
    parser_conf: BigQueryParserConf,
}

impl Dialect for BigQueryDialect {
    type Keyword = BigQueryKeyword;
    type LexerConf = BigQueryLexerConf;
    type ParserConf = BigQueryParserConf;

    fn lexer_conf(&self) -> &Self::LexerConf {
        &self.lexer_conf
    }

    fn parser_conf(&self) -> &Self::ParserConf {
        &self.parser_conf
    }
}
