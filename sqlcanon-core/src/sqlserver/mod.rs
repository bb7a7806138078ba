//! The SQL Server dialect.
//!
//! `"x"`, `[x]`, and `` `x` `` are all accepted as delimited identifiers.

mod keyword;

pub use self::keyword::SqlServerKeyword;

use crate::{Dialect, DialectLexerConf, DialectParserConf};

/// The SQL Server dialect's lexer configuration: `"x"`, `[x]`, and
/// `` `x` `` are all delimited identifiers.
#[derive(Clone, Debug, Default)]
pub struct SqlServerLexerConf;

impl DialectLexerConf for SqlServerLexerConf {
    fn bracket_is_identifier(&self) -> bool {
        true
    }
}

/// The SQL Server dialect's parser configuration.
#[derive(Clone, Debug, Default)]
pub struct SqlServerParserConf;

impl DialectParserConf for SqlServerParserConf {}

/// The SQL Server dialect marker type.
#[derive(Clone, Debug, Default)]
pub struct SqlServerDialect {
    lexer_conf: SqlServerLexerConf,
    parser_conf: SqlServerParserConf,
}

impl Dialect for SqlServerDialect {
    type Keyword = SqlServerKeyword;
    type LexerConf = SqlServerLexerConf;
    type ParserConf = SqlServerParserConf;

    fn lexer_conf(&self) -> &Self::LexerConf {
        &self.lexer_conf
    }

    fn parser_conf(&self) -> &Self::ParserConf {
        &self.parser_conf
    }
}
