mod function;
mod query;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, format, vec};

use sqlcanon_ast::{expression::*, types::*};
use sqlcanon_core::Dialect;
use sqlcanon_lexer::Token;

use crate::{error::ParserError, parser::Parser};

/// The numeric precedence ladder of §4.2: higher binds tighter. Values leave
/// room between tiers for future operators without renumbering everything.
impl<'a, D: Dialect> Parser<'a, D> {
    const OR_PREC: u8 = 10;
    const AND_PREC: u8 = 20;
    const UNARY_NOT_PREC: u8 = 30;
    const IS_LIKE_PREC: u8 = 40;
    const IN_PREC: u8 = 50;
    const BETWEEN_PREC: u8 = 60;
    const EQ_PREC: u8 = 70;
    const CMP_PREC: u8 = 80;
    const BITWISE_PREC: u8 = 90;
    const ADD_SUB_PREC: u8 = 100;
    const UNARY_PREC: u8 = 110;
    const MUL_DIV_MOD_PREC: u8 = 120;
    const CONCAT_PREC: u8 = 130;
    const COLLATE_PREC: u8 = 140;

    /// Parses a complete expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParserError> {
        self.parse_subexpr(0)
    }

    /// Parses tokens until an operator of precedence `<= precedence` is
    /// reached.
    pub fn parse_subexpr(&mut self, precedence: u8) -> Result<Expr, ParserError> {
        let mut expr = self.parse_prefix()?;
        loop {
            let next_precedence = self.next_precedence()?;
            if precedence >= next_precedence {
                break;
            }
            expr = self.parse_infix(Box::new(expr), next_precedence)?;
        }
        Ok(expr)
    }

    /// Parses an expression prefix: a primary, or a unary-prefix operator
    /// applied to one.
    pub fn parse_prefix(&mut self) -> Result<Expr, ParserError> {
        if self.parse_keyword("NOT") {
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Not,
                expr: Box::new(self.parse_subexpr(Self::UNARY_NOT_PREC)?),
            });
        }
        if self.next_token_if_is(&Token::Minus) {
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr: Box::new(self.parse_subexpr(Self::UNARY_PREC)?),
            });
        }
        if self.next_token_if_is(&Token::Plus) {
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Plus,
                expr: Box::new(self.parse_subexpr(Self::UNARY_PREC)?),
            });
        }
        if self.next_token_if_is(&Token::Tilde) {
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::BitwiseNot,
                expr: Box::new(self.parse_subexpr(Self::UNARY_PREC)?),
            });
        }
        if self.parse_keyword("CASE") {
            return self.parse_case_expr();
        }
        if self.parse_keyword("CAST") {
            return self.parse_cast_expr();
        }
        if self.parse_keyword("EXISTS") {
            self.expect_token(&Token::LeftParen)?;
            let query = self.parse_query()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(Expr::Exists(Box::new(query)));
        }
        if self.parse_keyword("EXTRACT") {
            return self.parse_extract_expr();
        }
        if self.parse_keyword("SUBSTRING") {
            return self.parse_substring_expr();
        }
        if self.parse_keyword("TRIM") {
            return self.parse_trim_expr();
        }
        match self.peek_token() {
            Some(Token::String(_)) => Ok(Expr::Literal(self.parse_string_literal_sequence()?)),
            Some(Token::Number(_))
            | Some(Token::NationalString(_))
            | Some(Token::HexString(_))
            | Some(Token::BitString(_)) => Ok(Expr::Literal(self.parse_literal()?)),
            Some(Token::Keyword(_, s))
                if s.eq_ignore_ascii_case("NULL")
                    || s.eq_ignore_ascii_case("TRUE")
                    || s.eq_ignore_ascii_case("FALSE") =>
            {
                Ok(Expr::Literal(self.parse_literal()?))
            }
            Some(Token::Asterisk) => {
                self.next_token();
                Ok(Expr::Wildcard)
            }
            Some(Token::LeftParen) => {
                self.next_token();
                let expr = if self.next_is_query() {
                    Expr::Subquery(Box::new(self.parse_query()?))
                } else {
                    Expr::Nested(Box::new(self.parse_expr()?))
                };
                self.expect_token(&Token::RightParen)?;
                Ok(expr)
            }
            Some(Token::LeftBracket) if self.dialect.lexer_conf().bracket_is_array() => {
                self.parse_array_expr()
            }
            Some(Token::Ident(_)) | Some(Token::Keyword(_, _)) => self.parse_ident_or_function(),
            other => {
                let other = other.cloned();
                self.expected("an expression", other)
            }
        }
    }

    /// Parses an identifier, a dotted identifier chain possibly ending in
    /// `.*`, or a function call, disambiguating on the token that follows
    /// the name.
    fn parse_ident_or_function(&mut self) -> Result<Expr, ParserError> {
        // `DATE`/`TIME`/`TIMESTAMP`/`INTERVAL` as a bare word here are
        // literals, not identifiers, because `parse_literal` already
        // consumed the keyword token form above these match arms won't be
        // reached for reserved `TIMESTAMP`; the soft-keyword forms fall
        // through to ordinary identifier parsing and are handled at the
        // literal call site further up the chain where a quoted string
        // follows.
        let first = self.parse_identifier()?;
        if self.next_token_if_is(&Token::LeftParen) {
            return self.parse_function_call(ObjectName(vec![first]));
        }
        if matches!(self.peek_token(), Some(Token::Period)) {
            let mut parts = vec![first];
            let mut ends_with_wildcard = false;
            while self.next_token_if_is(&Token::Period) {
                if self.next_token_if_is(&Token::Asterisk) {
                    ends_with_wildcard = true;
                    break;
                }
                parts.push(self.parse_identifier()?);
            }
            if ends_with_wildcard {
                return Ok(Expr::QualifiedWildcard(ObjectName(parts)));
            }
            if self.next_token_if_is(&Token::LeftParen) {
                return self.parse_function_call(ObjectName(parts));
            }
            return Ok(Expr::CompoundIdent(parts));
        }
        Ok(Expr::Ident(first))
    }

    /// Parses a BigQuery `[expr, ...]` array literal; `self.next_token()`
    /// has not yet consumed the opening `[`.
    fn parse_array_expr(&mut self) -> Result<Expr, ParserError> {
        self.next_token();
        let items = if self.next_token_if_is(&Token::RightBracket) {
            vec![]
        } else {
            let items = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RightBracket)?;
            items
        };
        Ok(Expr::Array(items))
    }

    fn parse_case_expr(&mut self) -> Result<Expr, ParserError> {
        let operand = if !self.parse_keyword_peek("WHEN") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        let mut conditions = vec![];
        let mut results = vec![];
        while self.parse_keyword("WHEN") {
            conditions.push(self.parse_expr()?);
            self.expect_keyword("THEN")?;
            results.push(self.parse_expr()?);
        }
        let else_result = if self.parse_keyword("ELSE") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword("END")?;
        Ok(Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        })
    }

    /// True if the upcoming token is the given keyword, without consuming it.
    fn parse_keyword_peek(&mut self, expected: &str) -> bool {
        let matched = self
            .peek_token()
            .map(|token| crate::parser::is_keyword(token, expected))
            .unwrap_or(false);
        matched
    }

    fn parse_cast_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword("AS")?;
        let data_type = self.parse_data_type()?;
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    fn parse_extract_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LeftParen)?;
        let field = self.parse_date_time_field()?;
        self.expect_keyword("FROM")?;
        let expr = self.parse_expr()?;
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::Extract {
            field,
            expr: Box::new(expr),
        })
    }

    fn parse_substring_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LeftParen)?;
        let expr = Box::new(self.parse_expr()?);
        let from = if self.parse_keyword("FROM") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        let for_length = if self.parse_keyword("FOR") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::Substring {
            expr,
            from,
            for_length,
        })
    }

    fn parse_trim_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LeftParen)?;
        let trim_where = if self.parse_keyword("BOTH") {
            Some(TrimWhereField::Both)
        } else if self.parse_keyword("LEADING") {
            Some(TrimWhereField::Leading)
        } else if self.parse_keyword("TRAILING") {
            Some(TrimWhereField::Trailing)
        } else {
            None
        };
        // `TRIM(expr)`, `TRIM(chars FROM expr)`, or `TRIM(BOTH chars FROM
        // expr)`: peek for the `FROM` that disambiguates a leading operand
        // as the trim characters rather than the trimmed expression.
        let first = self.parse_expr()?;
        let (trim_what, expr) = if self.parse_keyword("FROM") {
            (Some(Box::new(first)), self.parse_expr()?)
        } else {
            (None, first)
        };
        self.expect_token(&Token::RightParen)?;
        Ok(Expr::Trim {
            expr: Box::new(expr),
            trim_where,
            trim_what,
        })
    }

    /// Returns the precedence of the upcoming infix operator, or `0` if the
    /// next token does not continue the current expression.
    pub fn next_precedence(&mut self) -> Result<u8, ParserError> {
        let precedence = match self.peek_next_token() {
            Some(token) if crate::parser::is_keyword(token, "OR") => Self::OR_PREC,
            Some(token) if crate::parser::is_keyword(token, "AND") => Self::AND_PREC,
            Some(token) if crate::parser::is_keyword(token, "NOT") => {
                match self.peek_next_token() {
                    Some(token) if crate::parser::is_keyword(token, "IN") => Self::IN_PREC,
                    Some(token) if crate::parser::is_keyword(token, "BETWEEN") => {
                        Self::BETWEEN_PREC
                    }
                    Some(token) if crate::parser::is_keyword(token, "LIKE") => Self::IS_LIKE_PREC,
                    _ => 0,
                }
            }
            Some(token) if crate::parser::is_keyword(token, "IS") => Self::IS_LIKE_PREC,
            Some(token) if crate::parser::is_keyword(token, "LIKE") => Self::IS_LIKE_PREC,
            Some(token) if crate::parser::is_keyword(token, "IN") => Self::IN_PREC,
            Some(token) if crate::parser::is_keyword(token, "BETWEEN") => Self::BETWEEN_PREC,
            Some(Token::Equal) | Some(Token::NotEqual) => Self::EQ_PREC,
            Some(Token::GreaterThanOrEqual)
            | Some(Token::LessThanOrEqual)
            | Some(Token::LessThan)
            | Some(Token::GreaterThan) => Self::CMP_PREC,
            Some(Token::Ampersand) | Some(Token::Pipe) => Self::BITWISE_PREC,
            Some(Token::Plus) | Some(Token::Minus) => Self::ADD_SUB_PREC,
            Some(Token::Asterisk) | Some(Token::Slash) | Some(Token::Percent) => {
                Self::MUL_DIV_MOD_PREC
            }
            Some(Token::Concat) => Self::CONCAT_PREC,
            Some(token) if crate::parser::is_keyword(token, "COLLATE") => Self::COLLATE_PREC,
            Some(Token::DoubleColon) => Self::COLLATE_PREC,
            _ => 0,
        };
        self.reset_peek_cursor();
        Ok(precedence)
    }

    /// Parses the infix operator (and its right-hand operand, if any)
    /// following `expr`.
    pub fn parse_infix(&mut self, expr: Box<Expr>, precedence: u8) -> Result<Expr, ParserError> {
        if self.parse_word("COLLATE") {
            let collation = self.parse_object_name()?;
            return Ok(Expr::Collate { expr, collation });
        }
        if self.next_token_if_is(&Token::DoubleColon) {
            let data_type = self.parse_data_type()?;
            return Ok(Expr::Cast { expr, data_type });
        }
        if self.parse_keyword("IS") {
            return self.parse_is(expr);
        }
        if self.parse_keyword("NOT") {
            if self.parse_keyword("IN") {
                return self.parse_in(expr, true);
            }
            if self.parse_keyword("BETWEEN") {
                return self.parse_between(expr, true);
            }
            if self.parse_keyword("LIKE") {
                let right = Box::new(self.parse_subexpr(precedence)?);
                return Ok(Expr::BinaryOp {
                    left: expr,
                    op: BinaryOperator::NotLike,
                    right,
                });
            }
            let found = self.peek_token().cloned();
            return self.expected("IN, BETWEEN or LIKE after NOT", found);
        }
        if self.parse_keyword("IN") {
            return self.parse_in(expr, false);
        }
        if self.parse_keyword("BETWEEN") {
            return self.parse_between(expr, false);
        }

        let location = self.current_location();
        let op = match self.next_token() {
            Some(Token::Plus) => BinaryOperator::Plus,
            Some(Token::Minus) => BinaryOperator::Minus,
            Some(Token::Asterisk) => BinaryOperator::Multiply,
            Some(Token::Slash) => BinaryOperator::Divide,
            Some(Token::Percent) => BinaryOperator::Modulo,
            Some(Token::Concat) => BinaryOperator::StringConcat,
            Some(Token::Ampersand) => BinaryOperator::BitwiseAnd,
            Some(Token::Pipe) => BinaryOperator::BitwiseOr,
            Some(Token::GreaterThanOrEqual) => BinaryOperator::GreaterThanOrEqual,
            Some(Token::LessThanOrEqual) => BinaryOperator::LessThanOrEqual,
            Some(Token::LessThan) => BinaryOperator::LessThan,
            Some(Token::GreaterThan) => BinaryOperator::GreaterThan,
            Some(Token::Equal) => {
                // `==` is tokenized as two consecutive `=` tokens.
                self.next_token_if_is(&Token::Equal);
                BinaryOperator::Equal
            }
            Some(Token::NotEqual) => BinaryOperator::NotEqual,
            Some(token) if crate::parser::is_keyword(&token, "AND") => BinaryOperator::And,
            Some(token) if crate::parser::is_keyword(&token, "OR") => BinaryOperator::Or,
            Some(token) if crate::parser::is_keyword(&token, "LIKE") => BinaryOperator::Like,
            token => {
                return self.parse_error_at(format!("no infix parser for token {:?}", token), location)
            }
        };
        let right = Box::new(self.parse_subexpr(precedence)?);
        Ok(Expr::BinaryOp {
            left: expr,
            op,
            right,
        })
    }

    fn parse_is(&mut self, expr: Box<Expr>) -> Result<Expr, ParserError> {
        if self.parse_keyword("NULL") {
            return Ok(Expr::IsNull(expr));
        }
        if self.parse_keywords(&["DISTINCT", "FROM"]) {
            let right = Box::new(self.parse_expr()?);
            return Ok(Expr::IsDistinctFrom { left: expr, right });
        }
        if self.parse_keyword("NOT") {
            if self.parse_keyword("NULL") {
                return Ok(Expr::IsNotNull(expr));
            }
            if self.parse_keywords(&["DISTINCT", "FROM"]) {
                let right = Box::new(self.parse_expr()?);
                return Ok(Expr::IsNotDistinctFrom { left: expr, right });
            }
        }
        let found = self.peek_token().cloned();
        self.expected("NULL or [NOT] DISTINCT FROM after IS", found)
    }

    /// Parses `(expr, ...)` or `(subquery)` after `[NOT] IN` has already
    /// been consumed.
    fn parse_in(&mut self, expr: Box<Expr>, negated: bool) -> Result<Expr, ParserError> {
        self.expect_token(&Token::LeftParen)?;
        let result = if self.next_is_query() {
            Expr::InSubquery {
                expr,
                negated,
                subquery: Box::new(self.parse_query()?),
            }
        } else {
            Expr::InList {
                expr,
                negated,
                list: self.parse_comma_separated(Parser::parse_expr)?,
            }
        };
        self.expect_token(&Token::RightParen)?;
        Ok(result)
    }

    /// Parses `<low> AND <high>` after `[NOT] BETWEEN` has already been
    /// consumed.
    fn parse_between(&mut self, expr: Box<Expr>, negated: bool) -> Result<Expr, ParserError> {
        // Parse the operands at AND's own precedence so the loop halts
        // before folding the trailing AND into either operand.
        let low = Box::new(self.parse_subexpr(Self::AND_PREC)?);
        self.expect_keyword("AND")?;
        let high = Box::new(self.parse_subexpr(Self::AND_PREC)?);
        Ok(Expr::Between {
            expr,
            negated,
            low,
            high,
        })
    }

    fn next_is_query(&mut self) -> bool {
        let is_query = matches!(self.peek_token(), Some(token) if crate::parser::is_keyword(token, "SELECT") || crate::parser::is_keyword(token, "WITH"));
        is_query
    }
}

#[cfg(test)]
mod tests {
    use sqlcanon_core::{bigquery::BigQueryDialect, common::CommonDialect};

    use super::*;

    #[test]
    fn parse_bigquery_array_literal() {
        let dialect = BigQueryDialect::default();
        let expr = Parser::new_with_sql(&dialect, "[1, 2, 3]")
            .unwrap()
            .parse_expr()
            .unwrap();
        match expr {
            Expr::Array(items) => assert_eq!(items.len(), 3),
            other => panic!("expected an array literal, got {:?}", other),
        }
    }

    #[test]
    fn parse_bigquery_empty_array_literal() {
        let dialect = BigQueryDialect::default();
        let expr = Parser::new_with_sql(&dialect, "[]")
            .unwrap()
            .parse_expr()
            .unwrap();
        match expr {
            Expr::Array(items) => assert!(items.is_empty()),
            other => panic!("expected an empty array literal, got {:?}", other),
        }
    }

    #[test]
    fn bracket_is_not_an_array_outside_bigquery() {
        let dialect = CommonDialect::default();
        let result = Parser::new_with_sql(&dialect, "[1, 2, 3]")
            .unwrap()
            .parse_expr();
        assert!(result.is_err());
    }

    #[test]
    fn no_infix_parser_error_carries_position_and_snippet() {
        let dialect = CommonDialect::default();
        let mut parser = Parser::new_with_sql(&dialect, "a ? b").unwrap();
        let left = Box::new(parser.parse_prefix().unwrap());
        let precedence = parser.next_precedence().unwrap();
        let err = parser.parse_infix(left, precedence).unwrap_err();
        match err {
            ParserError::ParseError {
                location, snippet, ..
            } => {
                let location = location.expect("expected a location on the error");
                assert_eq!(location.offset, 2);
                assert_eq!(snippet.as_deref(), Some("a ? b"));
            }
            other => panic!("expected a ParseError, got {:?}", other),
        }
    }
}
