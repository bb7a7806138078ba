#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::{iter::Peekable, str::Chars};

use sqlcanon_core::{Dialect, DialectLexerConf};

use crate::{
    error::{LexerError, Location},
    tokens::{Comment, Token, Whitespace},
};

/// Converts a SQL source string into a sequence of [`Token`]s for a given
/// [`Dialect`].
pub struct Lexer<'a, D: Dialect> {
    dialect: &'a D,
    iter: Peekable<Chars<'a>>,
    location: Location,
}

impl<'a, D: Dialect> Lexer<'a, D> {
    /// Creates a new SQL lexer for the given input string.
    pub fn new(dialect: &'a D, input: &'a str) -> Self {
        Self {
            dialect,
            iter: input.chars().peekable(),
            location: Location { line: 1, column: 1, offset: 0 },
        }
    }

    /// Returns the current location scanned by the lexer.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Tokenizes the whole input, dropping whitespace/comment tokens when
    /// the dialect is configured to do so.
    pub fn tokenize(&mut self) -> Result<Vec<Token<D::Keyword>>, LexerError> {
        Ok(self
            .tokenize_with_locations()?
            .into_iter()
            .map(|(token, _)| token)
            .collect())
    }

    /// Tokenizes the whole input like [`tokenize`], pairing each surviving
    /// token with the line/column/byte offset it started at. Used by the
    /// parser to report a position for `ParseError` (spec §7).
    pub fn tokenize_with_locations(&mut self) -> Result<Vec<(Token<D::Keyword>, Location)>, LexerError> {
        let mut tokens = vec![];
        loop {
            let start = self.location;
            match self.next_token()? {
                Some(token) => {
                    if self.dialect.lexer_conf().ignore_whitespace() && token.is_whitespace() {
                        continue;
                    }
                    if self.dialect.lexer_conf().ignore_comment() && token.is_comment() {
                        continue;
                    }
                    tokens.push((token, start));
                }
                None => break,
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token<D::Keyword>>, LexerError> {
        let conf = self.dialect.lexer_conf();
        match self.iter.peek() {
            Some(&ch) => match ch {
                ' ' | '\t' | '\n' | '\r' => Ok(self.tokenize_whitespace().map(Token::Whitespace)),
                // National character string literal: N'...'. PostgreSQL/MySQL
                // also accept lowercase 'n'.
                n @ 'N' | n @ 'n' => {
                    self.next_char();
                    if self.next_if_is('\'') {
                        let s = self.tokenize_quoted('\'')?;
                        Ok(Some(Token::NationalString(s)))
                    } else {
                        let ident = self.tokenize_ident(n);
                        Ok(Some(Token::make(ident, None)))
                    }
                }
                // Hexadecimal string literal: X'...'.
                x @ 'X' | x @ 'x' => {
                    self.next_char();
                    if self.next_if_is('\'') {
                        let s = self.tokenize_quoted('\'')?;
                        Ok(Some(Token::HexString(s)))
                    } else {
                        let ident = self.tokenize_ident(x);
                        Ok(Some(Token::make(ident, None)))
                    }
                }
                // Bit string literal: B'...'.
                b @ 'B' | b @ 'b' => {
                    self.next_char();
                    if self.next_if_is('\'') {
                        let s = self.tokenize_quoted('\'')?;
                        Ok(Some(Token::BitString(s)))
                    } else {
                        let ident = self.tokenize_ident(b);
                        Ok(Some(Token::make(ident, None)))
                    }
                }
                // String literal: 'x'.
                quote if conf.is_string_literal_quotation(quote) => {
                    self.next_char();
                    let s = self.tokenize_quoted(quote)?;
                    Ok(Some(Token::String(s)))
                }
                // Double-quoted token: either a string literal (MySQL,
                // BigQuery) or a delimited identifier (common, SQL Server).
                quote if conf.is_double_quote(quote) => {
                    self.next_char();
                    let s = self.tokenize_quoted(quote)?;
                    if conf.double_quote_is_string_literal() {
                        Ok(Some(Token::String(s)))
                    } else {
                        Ok(Some(Token::ident(s, Some('"'))))
                    }
                }
                // Backtick-quoted identifier.
                quote if conf.is_backtick_identifier_start(quote) => {
                    self.next_char();
                    let s = self.tokenize_quoted(quote)?;
                    Ok(Some(Token::ident(s, Some('`'))))
                }
                // `[x]`-delimited identifier (SQL Server).
                '[' if conf.bracket_is_identifier() => {
                    self.next_char();
                    let s = self.tokenize_quoted(']')?;
                    Ok(Some(Token::ident(s, Some('['))))
                }
                // Identifier or keyword.
                ch if conf.is_identifier_start(ch) => {
                    self.next_char();
                    let ident = self.tokenize_ident(ch);
                    Ok(Some(Token::make(ident, None)))
                }
                // Number or bare period.
                ch if ch.is_ascii_digit() || ch == '.' => self.tokenize_number(),
                _ => self.tokenize_symbol(),
            },
            None => Ok(None),
        }
    }

    fn tokenize_whitespace(&mut self) -> Option<Whitespace> {
        self.iter.next().map(|ch| match ch {
            ' ' => {
                self.location.advance(' ');
                Whitespace::Space
            }
            '\t' => {
                self.location.advance('\t');
                Whitespace::Tab
            }
            '\n' => {
                self.location.advance('\n');
                Whitespace::Newline
            }
            '\r' => {
                // Emit a single Newline token for both '\r' and "\r\n".
                self.iter.next_if_eq(&'\n');
                self.location.advance('\n');
                Whitespace::Newline
            }
            _ => unreachable!(),
        })
    }

    /// Tokenizes a `'`, `"`, or `` ` ``-quoted run of text; the open quote
    /// has already been consumed. A doubled quote character (`''`, `""`,
    /// or `` `` ``) is an escaped literal quote rather than the closing
    /// delimiter, per §4.1's `''`-escape rule.
    fn tokenize_quoted(&mut self, quote: char) -> Result<String, LexerError> {
        let mut s = String::new();
        loop {
            s.push_str(&self.next_while(|&ch| ch != quote));
            if !self.next_if_is(quote) {
                return self.tokenize_error(format!("expected close quote '{}' before EOF", quote));
            }
            if self.next_if_is(quote) {
                s.push(quote);
                continue;
            }
            return Ok(s);
        }
    }

    fn tokenize_ident(&mut self, first: char) -> String {
        let mut ident = first.to_string();
        let predicate = |ch: &char| self.dialect.lexer_conf().is_identifier_part(*ch);
        ident.push_str(&self.next_while(predicate));
        ident
    }

    fn tokenize_number(&mut self) -> Result<Option<Token<D::Keyword>>, LexerError> {
        // `0x`/`0X`-prefixed hexadecimal integer literal.
        if self.iter.peek() == Some(&'0') {
            let mut lookahead = self.iter.clone();
            lookahead.next();
            if matches!(lookahead.peek(), Some('x') | Some('X')) {
                self.next_char(); // '0'
                self.next_char(); // 'x'/'X'
                let digits = self.next_while(|ch| ch.is_ascii_hexdigit());
                return Ok(Some(Token::Number(format!("0x{}", digits))));
            }
        }

        let mut s = self.next_while(|ch| ch.is_ascii_digit());
        if self.next_if_is('.') {
            s.push('.');
        }
        s += &self.next_while(|ch| ch.is_ascii_digit());

        if s == "." {
            return Ok(Some(Token::Period));
        }
        Ok(Some(Token::Number(s)))
    }

    fn tokenize_symbol(&mut self) -> Result<Option<Token<D::Keyword>>, LexerError> {
        let token = self.next_if_token(|ch| {
            Some(match ch {
                ',' => Token::Comma,
                ';' => Token::SemiColon,
                ':' => Token::Colon,

                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                '[' => Token::LeftBracket,
                ']' => Token::RightBracket,
                '{' => Token::LeftBrace,
                '}' => Token::RightBrace,

                '=' => Token::Equal,
                '<' => Token::LessThan,
                '>' => Token::GreaterThan,

                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Asterisk,
                '/' => Token::Slash,
                '%' => Token::Percent,

                '^' => Token::Caret,
                '!' => Token::Exclamation,
                '?' => Token::Question,
                '~' => Token::Tilde,
                '&' => Token::Ampersand,
                '|' => Token::Pipe,
                '\\' => Token::Backslash,
                '#' => Token::Sharp,
                '@' => Token::At,
                _ => Token::Char(ch),
            })
        });
        if let Some(token) = token {
            Ok(Some(match token {
                Token::Colon if self.next_if_is(':') => Token::DoubleColon,
                Token::LessThan if self.next_if_is('>') => Token::NotEqual,
                Token::LessThan if self.next_if_is('=') => Token::LessThanOrEqual,
                Token::LessThan if self.next_if_is('<') => Token::LeftShift,
                Token::GreaterThan if self.next_if_is('=') => Token::GreaterThanOrEqual,
                Token::GreaterThan if self.next_if_is('>') => Token::RightShift,
                Token::Minus if self.next_if_is('-') => {
                    Token::Comment(self.tokenize_single_line_comment("--"))
                }
                Token::Slash if self.next_if_is('*') => {
                    Token::Comment(self.tokenize_multi_line_comment()?)
                }
                Token::Exclamation if self.next_if_is('=') => Token::NotEqual,
                Token::Exclamation if self.next_if_is('!') => Token::DoubleExclamation,
                Token::Pipe if self.next_if_is('|') => Token::Concat,
                token => token,
            }))
        } else {
            Ok(None)
        }
    }

    fn tokenize_single_line_comment(&mut self, prefix: impl Into<String>) -> Comment {
        let mut comment = self.next_while(|c| c != &'\n');
        if let Some(ch) = self.next_char() {
            comment.push(ch);
        }
        Comment::SingleLine {
            prefix: prefix.into(),
            comment,
        }
    }

    fn tokenize_multi_line_comment(&mut self) -> Result<Comment, LexerError> {
        let mut comment = String::new();
        let mut nested = 1;
        loop {
            match self.next_char() {
                Some(ch) => {
                    if ch == '*' && self.next_if_is('/') {
                        if nested == 1 {
                            let lines = comment.split('\n').map(|s| s.to_string()).collect();
                            break Ok(Comment::MultiLine(lines));
                        } else {
                            nested -= 1;
                            comment.push_str("*/");
                        }
                    } else if ch == '/' && self.next_if_is('*') {
                        nested += 1;
                        comment.push_str("/*");
                    } else {
                        comment.push(ch);
                    }
                }
                None => return self.tokenize_error("unexpected EOF while in a multi-line comment"),
            }
        }
    }

    fn tokenize_error<R>(&self, message: impl Into<String>) -> Result<R, LexerError> {
        Err(self.location.into_error(message))
    }

    fn next_if_token<F: Fn(char) -> Option<Token<D::Keyword>>>(
        &mut self,
        tokenizer: F,
    ) -> Option<Token<D::Keyword>> {
        let token = self.iter.peek().and_then(|&c| tokenizer(c))?;
        self.next_char();
        Some(token)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.iter.next() {
            self.location.advance(ch);
            Some(ch)
        } else {
            None
        }
    }

    #[inline]
    fn next_if_is(&mut self, ch: char) -> bool {
        if self.iter.next_if_eq(&ch).is_some() {
            self.location.advance(ch);
            true
        } else {
            false
        }
    }

    fn next_while<F: Fn(&char) -> bool>(&mut self, predicate: F) -> String {
        let mut value = String::new();
        while let Some(ch) = self.iter.next_if(&predicate) {
            self.location.advance(ch);
            value.push(ch);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlcanon_core::{common::CommonDialect, mysql::MySqlDialect, sqlserver::SqlServerDialect};

    macro_rules! tokenize {
        ($input:expr, $expected:expr) => {{
            let dialect = CommonDialect::default();
            let mut lexer = Lexer::new(&dialect, $input);
            assert_eq!(lexer.tokenize(), $expected);
        }};
        ($input:expr, $expected:expr, $dialect:expr) => {{
            let mut lexer = Lexer::new($dialect, $input);
            assert_eq!(lexer.tokenize(), $expected);
        }};
    }

    #[test]
    fn tokenize_whitespace() {
        tokenize!(
            " line1\nline2\t\rline3\r\nline4\r",
            Ok(vec![
                Token::Whitespace(Whitespace::Space),
                Token::ident("line1", None),
                Token::Whitespace(Whitespace::Newline),
                Token::ident("line2", None),
                Token::Whitespace(Whitespace::Tab),
                Token::Whitespace(Whitespace::Newline),
                Token::ident("line3", None),
                Token::Whitespace(Whitespace::Newline),
                Token::ident("line4", None),
                Token::Whitespace(Whitespace::Newline),
            ])
        );
    }

    #[test]
    fn tokenize_single_line_comment() {
        tokenize!(
            "0--this is a comment\n1",
            Ok(vec![
                Token::Number("0".into()),
                Token::Comment(Comment::SingleLine {
                    prefix: "--".into(),
                    comment: "this is a comment\n".into(),
                }),
                Token::Number("1".into()),
            ])
        );
    }

    #[test]
    fn tokenize_multi_line_comment() {
        tokenize!(
            "/*line1\nline2*/",
            Ok(vec![Token::Comment(Comment::MultiLine(vec![
                "line1".into(),
                "line2".into(),
            ]))])
        );
        tokenize!(
            "/*/*/",
            Err(Location { line: 1, column: 6, offset: 5 }
                .into_error("unexpected EOF while in a multi-line comment"))
        );
    }

    #[test]
    fn tokenize_number_literal() {
        tokenize!(
            ".1 12345.6789 0. .",
            Ok(vec![
                Token::Number(".1".into()),
                Token::Whitespace(Whitespace::Space),
                Token::Number("12345.6789".into()),
                Token::Whitespace(Whitespace::Space),
                Token::Number("0.".into()),
                Token::Whitespace(Whitespace::Space),
                Token::Period,
            ])
        );
    }

    #[test]
    fn tokenize_hex_number_literal() {
        tokenize!(
            "0x1A2b",
            Ok(vec![Token::Number("0x1A2b".into())])
        );
    }

    #[test]
    fn tokenize_string_literal() {
        tokenize!("'hello'", Ok(vec![Token::String("hello".into())]));
        tokenize!("N'hi'", Ok(vec![Token::NationalString("hi".into())]));
        tokenize!("X'abcdef'", Ok(vec![Token::HexString("abcdef".into())]));
        tokenize!("B'0101'", Ok(vec![Token::BitString("0101".into())]));
        tokenize!(
            "select 'foo",
            Err(Location {
                line: 1,
                column: 12,
                offset: 11
            }
            .into_error("expected close quote ''' before EOF"))
        );
    }

    #[test]
    fn tokenize_string_literal_escaped_quote() {
        tokenize!(
            "'it''s'",
            Ok(vec![Token::String("it'".to_string() + "s")])
        );
        tokenize!("''", Ok(vec![Token::String("".into())]));
    }

    #[test]
    fn tokenize_delimited_ident_common() {
        // common dialect: double quote is a delimited identifier.
        tokenize!("\"foo\"", Ok(vec![Token::ident("foo", Some('"'))]));
    }

    #[test]
    fn tokenize_double_quote_string_literal_mysql() {
        let dialect = MySqlDialect::default();
        tokenize!("\"foo\"", Ok(vec![Token::String("foo".into())]), &dialect);
    }

    #[test]
    fn tokenize_mysql_logical_xor() {
        let dialect = MySqlDialect::default();
        tokenize!(
            "true XOR false",
            Ok(vec![
                Token::keyword("true").unwrap(),
                Token::Whitespace(Whitespace::Space),
                Token::keyword("XOR").unwrap(),
                Token::Whitespace(Whitespace::Space),
                Token::keyword("false").unwrap(),
            ]),
            &dialect
        );
    }

    #[test]
    fn tokenize_bracket_ident_sqlserver() {
        let dialect = SqlServerDialect::default();
        tokenize!(
            "[my table]",
            Ok(vec![Token::ident("my table", Some('['))]),
            &dialect
        );
        tokenize!(
            "[unterminated",
            Err(Location {
                line: 1,
                column: 14,
                offset: 13
            }
            .into_error("expected close quote ']' before EOF")),
            &dialect
        );
    }

    #[test]
    fn tokenize_simple_select() {
        tokenize!(
            "SELECT * FROM customer WHERE id = 1",
            Ok(vec![
                Token::keyword("SELECT").unwrap(),
                Token::Whitespace(Whitespace::Space),
                Token::Asterisk,
                Token::Whitespace(Whitespace::Space),
                Token::keyword("FROM").unwrap(),
                Token::Whitespace(Whitespace::Space),
                Token::ident("customer", None),
                Token::Whitespace(Whitespace::Space),
                Token::keyword("WHERE").unwrap(),
                Token::Whitespace(Whitespace::Space),
                Token::ident("id", None),
                Token::Whitespace(Whitespace::Space),
                Token::Equal,
                Token::Whitespace(Whitespace::Space),
                Token::Number("1".into()),
            ])
        );
    }
}
