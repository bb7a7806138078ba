//! The MySQL dialect.
//!
//! `"x"` is a string literal (double-quoted strings), `` `x` `` is a
//! delimited identifier, `[x]` is not recognized and is a lex error.

mod keyword;

pub use self::keyword::MySqlKeyword;

use crate::{Dialect, DialectLexerConf, DialectParserConf};

/// The MySQL dialect's lexer configuration: `"x"` is a string literal,
/// `` `x` `` is a delimited identifier, `[x]` is unsupported.
#[derive(Clone, Debug, Default)]
pub struct MySqlLexerConf;

impl DialectLexerConf for MySqlLexerConf {
    fn double_quote_is_string_literal(&self) -> bool {
        true
    }
}

/// The MySQL dialect's parser configuration.
#[derive(Clone, Debug, Default)]
pub struct MySqlParserConf;

impl DialectParserConf for MySqlParserConf {}

/// The MySQL dialect marker type.
#[derive(Clone, Debug, Default)]
pub struct MySqlDialect {
    lexer_conf: MySqlLexerConf,
    parser_conf: MySqlParserConf,
}

impl Dialect for MySqlDialect {
    type Keyword = MySqlKeyword;
    type LexerConf = MySqlLexerConf;
    type ParserConf = MySqlParserConf;

    fn lexer_conf(&self) -> &Self::LexerConf {
        &self.lexer_conf
    }

    fn parser_conf(&self) -> &Self::ParserConf {
        &self.parser_conf
    }
}
