mod expression;
mod statement;
mod types;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, format, vec, vec::Vec};
use core::fmt::Display;

use sqlcanon_core::Dialect;
use sqlcanon_lexer::{Lexer, Location, Token};

use crate::{
    error::{parse_error, ParserError},
    peek::{MultiPeek, PeekIteratorExt},
};

/// SQL parser, generic over the dialect `D`.
///
/// Each dialect has its own independently-typed `Keyword` enum, so keywords
/// here are matched by the canonical uppercase string carried alongside
/// `Token::Keyword`, rather than by comparing enum variants directly.
pub struct Parser<'a, D: Dialect> {
    dialect: &'a D,
    iter: MultiPeek<Box<dyn Iterator<Item = (Token<D::Keyword>, Location)> + 'static>>,
    /// The original SQL text, kept around to slice out an `expected()`
    /// error's surrounding-text window (spec §7).
    source: &'a str,
    /// The location one past the last token, used when an error is raised
    /// with no token left to peek at.
    eof_location: Location,
}

impl<'a, D: Dialect> Parser<'a, D> {
    /// Creates a new SQL parser from the given tokens, with no source text
    /// to build an error snippet from.
    pub fn new_with_tokens(dialect: &'a D, tokens: Vec<Token<D::Keyword>>) -> Self {
        // ignore whitespace and comment.
        let filter = tokens
            .into_iter()
            .filter(|token| !token.is_whitespace() && !token.is_comment())
            .map(|token| (token, Location::default()));
        Self {
            dialect,
            iter: (Box::new(filter) as Box<dyn Iterator<Item = (Token<D::Keyword>, Location)>>)
                .multipeek(),
            source: "",
            eof_location: Location::default(),
        }
    }

    /// Creates a new SQL parser from the given SQL string.
    pub fn new_with_sql(dialect: &'a D, sql: &str) -> Result<Self, ParserError> {
        let mut lexer = Lexer::new(dialect, sql);
        let tokens = lexer.tokenize_with_locations()?;
        let eof_location = lexer.location();
        let filter = tokens
            .into_iter()
            .filter(|(token, _)| !token.is_whitespace() && !token.is_comment());
        Ok(Self {
            dialect,
            iter: (Box::new(filter) as Box<dyn Iterator<Item = (Token<D::Keyword>, Location)>>)
                .multipeek(),
            source: sql,
            eof_location,
        })
    }

    /// The location of the next token, or the end-of-input location if the
    /// token stream is exhausted.
    pub fn current_location(&mut self) -> Location {
        self.iter
            .peek()
            .map(|(_, location)| *location)
            .unwrap_or(self.eof_location)
    }

    /// A short window of source text surrounding `offset`, for citing in a
    /// `ParseError` alongside its position (spec §7).
    fn snippet_at(&self, offset: usize) -> String {
        const RADIUS: usize = 20;
        let len = self.source.len();
        let start = offset.saturating_sub(RADIUS).min(len);
        let end = offset.saturating_add(RADIUS).min(len);
        let start = (start..=offset.min(len))
            .find(|&i| self.source.is_char_boundary(i))
            .unwrap_or(0);
        let end = (end..=len)
            .find(|&i| self.source.is_char_boundary(i))
            .unwrap_or(len);
        self.source[start..end].trim().to_string()
    }

    /// Parses a comma-separated list of 1+ items accepted by `f`.
    pub fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Parser<'a, D>) -> Result<T, ParserError>,
    {
        let mut values = vec![];
        loop {
            values.push(f(self)?);
            if !self.next_token_if_is(&Token::Comma) {
                break;
            }
        }
        Ok(values)
    }

    /// Reports an unexpected token, citing the position it was found at and
    /// a window of surrounding source text (spec §7).
    pub fn expected<R>(
        &mut self,
        expected: impl Display,
        found: Option<impl Display>,
    ) -> Result<R, ParserError> {
        let message = if let Some(found) = &found {
            format!("Expected: {}, found: {}", expected, found)
        } else {
            format!("Expected: {}, but not found", expected)
        };
        let location = self.current_location();
        self.parse_error_at(message, location)
    }

    /// Builds a `ParseError` for `message`, citing `location` and the source
    /// text surrounding it.
    pub(crate) fn parse_error_at<R>(
        &self,
        message: impl Into<String>,
        location: Location,
    ) -> Result<R, ParserError> {
        let snippet = self.snippet_at(location.offset);
        parse_error(message).map_err(|err| err.located_at(location, snippet))
    }

    /// Consumes the next keyword token and returns `Ok` if its canonical
    /// string matches `expected` (case-insensitively), otherwise returns an
    /// error.
    pub fn expect_keyword(&mut self, expected: &str) -> Result<(), ParserError> {
        if self.parse_keyword(expected) {
            Ok(())
        } else {
            let found = self.peek_token().cloned();
            self.expected(expected, found)
        }
    }

    /// Consumes the next keyword tokens if they match `expected` in order,
    /// otherwise returns an error.
    pub fn expect_keywords(&mut self, expected: &[&str]) -> Result<(), ParserError> {
        for &kw in expected {
            self.expect_keyword(kw)?;
        }
        Ok(())
    }

    /// Consumes the next keyword token if its canonical string is one of
    /// `keywords`, returning the matched string.
    pub fn expect_one_of_keywords(
        &mut self,
        keywords: &[&'static str],
    ) -> Result<&'static str, ParserError> {
        if let Some(keyword) = self.parse_one_of_keywords(keywords) {
            Ok(keyword)
        } else {
            let found = self.peek_token().cloned();
            self.expected(format!("one of {:?}", keywords), found)
        }
    }

    /// Consumes the next keyword token and returns `true` if its canonical
    /// string matches `expected` (case-insensitively), otherwise returns
    /// `false` without advancing.
    pub fn parse_keyword(&mut self, expected: &str) -> bool {
        self.next_token_if(|token| is_keyword(token, expected))
            .is_some()
    }

    /// Consumes the next multiple keyword tokens and returns `true` if they
    /// match `expected` in order, otherwise returns `false` without
    /// advancing.
    pub fn parse_keywords(&mut self, expected: &[&str]) -> bool {
        for &keyword in expected {
            match self.peek_next_token() {
                Some(token) if is_keyword(token, keyword) => {}
                _ => {
                    self.reset_peek_cursor();
                    return false;
                }
            }
        }
        for _ in 0..expected.len() {
            self.next_token();
        }
        true
    }

    /// Consumes the next keyword token if its canonical string is one of
    /// `keywords`, returning the matched string.
    pub fn parse_one_of_keywords(&mut self, keywords: &[&'static str]) -> Option<&'static str> {
        match self.peek_token() {
            Some(Token::Keyword(_, s)) => {
                let matched = keywords.iter().copied().find(|kw| kw.eq_ignore_ascii_case(s));
                if matched.is_some() {
                    self.next_token();
                }
                matched
            }
            _ => None,
        }
    }

    /// Consumes the next token and returns `Ok` if it matches `expected`,
    /// otherwise returns an error.
    pub fn expect_token(&mut self, expected: &Token<D::Keyword>) -> Result<(), ParserError> {
        if self.next_token_if_is(expected) {
            Ok(())
        } else {
            let found = self.peek_token().cloned();
            self.expected(expected, found)
        }
    }

    /// Returns a reference to the `next_token()` value without advancing
    /// the iterator.
    pub fn peek_token(&mut self) -> Option<&Token<D::Keyword>> {
        self.iter.peek().map(|(token, _)| token)
    }

    /// Works exactly like `next_token()` with the only difference that it
    /// doesn't advance itself. `peek_next_token()` can be called multiple
    /// times to peek further ahead. Calling `next_token()` resets the
    /// peeking cursor.
    pub fn peek_next_token(&mut self) -> Option<&Token<D::Keyword>> {
        self.iter.peek_next().map(|(token, _)| token)
    }

    /// Resets the peek cursor.
    pub fn reset_peek_cursor(&mut self) {
        self.iter.reset_cursor();
    }

    /// Consumes the next token and returns it.
    pub fn next_token(&mut self) -> Option<Token<D::Keyword>> {
        self.iter.next().map(|(token, _)| token)
    }

    /// Consumes and returns the next token if `func` returns true for it.
    pub fn next_token_if(
        &mut self,
        mut func: impl FnMut(&Token<D::Keyword>) -> bool,
    ) -> Option<Token<D::Keyword>> {
        self.iter
            .next_if(|(token, _)| func(token))
            .map(|(token, _)| token)
    }

    /// Consumes and returns the next token if it matches `expected`.
    pub fn next_token_if_eq(&mut self, expected: &Token<D::Keyword>) -> Option<Token<D::Keyword>> {
        self.iter
            .next_if(|(token, _)| token == expected)
            .map(|(token, _)| token)
    }

    /// Consumes the next token and returns `true` if it matches `expected`.
    pub fn next_token_if_is(&mut self, expected: &Token<D::Keyword>) -> bool {
        self.next_token_if_eq(expected).is_some()
    }

    /// Consumes the next token and returns `true` if it is a "soft keyword":
    /// either a reserved keyword, or an unquoted identifier, whose text
    /// matches `expected` case-insensitively.
    ///
    /// Clause introducers like `OVER`/`PARTITION`/`PRIMARY`/`CHECK` are not
    /// in every dialect's reserved-word table, so they must still parse as
    /// ordinary identifiers everywhere else; this keeps them usable as
    /// column names while still recognizing them where the grammar expects
    /// them.
    pub fn parse_word(&mut self, expected: &str) -> bool {
        self.next_token_if(|token| is_word(token, expected)).is_some()
    }

    /// Consumes the next tokens and returns `true` if they are soft keywords
    /// matching `expected` in order, otherwise returns `false` without
    /// advancing.
    pub fn parse_words(&mut self, expected: &[&str]) -> bool {
        for &word in expected {
            match self.peek_next_token() {
                Some(token) if is_word(token, word) => {}
                _ => {
                    self.reset_peek_cursor();
                    return false;
                }
            }
        }
        for _ in 0..expected.len() {
            self.next_token();
        }
        true
    }

    /// Consumes the next soft keyword and returns `Ok` if it matches
    /// `expected`, otherwise returns an error.
    pub fn expect_word(&mut self, expected: &str) -> Result<(), ParserError> {
        if self.parse_word(expected) {
            Ok(())
        } else {
            let found = self.peek_token().cloned();
            self.expected(expected, found)
        }
    }
}

/// True if `token` is a keyword whose canonical string matches `expected`.
pub(crate) fn is_keyword<K>(token: &Token<K>, expected: &str) -> bool {
    matches!(token, Token::Keyword(_, s) if s.eq_ignore_ascii_case(expected))
}

/// True if `token` is a reserved keyword or an unquoted identifier whose
/// text matches `expected`, case-insensitively.
pub(crate) fn is_word<K>(token: &Token<K>, expected: &str) -> bool {
    match token {
        Token::Keyword(_, s) => s.eq_ignore_ascii_case(expected),
        Token::Ident(ident) if ident.quote.is_none() => ident.value.eq_ignore_ascii_case(expected),
        _ => false,
    }
}
