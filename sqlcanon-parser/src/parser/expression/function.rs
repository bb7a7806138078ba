#[cfg(not(feature = "std"))]
use alloc::vec;

use sqlcanon_ast::{
    expression::{Function, FunctionArg, WindowFrame, WindowFrameBound, WindowFrameUnits, WindowSpec},
    types::ObjectName,
    Expr,
};
use sqlcanon_core::Dialect;
use sqlcanon_lexer::Token;

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses the argument list and optional `OVER (...)` clause of a
    /// function call; the opening `(` has already been consumed by the
    /// caller.
    pub(crate) fn parse_function_call(&mut self, name: ObjectName) -> Result<Expr, ParserError> {
        if self.next_token_if_is(&Token::RightParen) {
            let over = self.parse_optional_over()?;
            return Ok(Expr::Function(Function {
                name,
                distinct: false,
                args: vec![],
                over,
            }));
        }
        let distinct = self.parse_keyword("DISTINCT");
        let args = self.parse_comma_separated(Parser::parse_function_arg)?;
        self.expect_token(&Token::RightParen)?;
        let over = self.parse_optional_over()?;
        Ok(Expr::Function(Function {
            name,
            distinct,
            args,
            over,
        }))
    }

    /// Parses one function-call argument: `name => expr` or a bare `expr`
    /// (including the bare `*` of `COUNT(*)`, which falls out of ordinary
    /// expression parsing as `Expr::Wildcard`).
    fn parse_function_arg(&mut self) -> Result<FunctionArg, ParserError> {
        if self.next_is_named_arg() {
            let name = self.parse_identifier()?;
            self.expect_token(&Token::Equal)?;
            self.expect_token(&Token::GreaterThan)?;
            let arg = self.parse_expr()?;
            return Ok(FunctionArg::Named { name, arg });
        }
        Ok(FunctionArg::Unnamed(self.parse_expr()?))
    }

    /// Looks ahead for `<ident> = >`, the `=>` named-argument marker (the
    /// lexer has no dedicated fat-arrow token, so `=` and `>` are matched
    /// as a pair).
    fn next_is_named_arg(&mut self) -> bool {
        let is_name = matches!(
            self.peek_next_token(),
            Some(Token::Ident(_)) | Some(Token::Keyword(_, _))
        );
        let is_eq = is_name && matches!(self.peek_next_token(), Some(Token::Equal));
        let is_arrow = is_eq && matches!(self.peek_next_token(), Some(Token::GreaterThan));
        self.reset_peek_cursor();
        is_arrow
    }

    /// Parses the `OVER (...)` clause of a window function call, if one
    /// follows. `OVER <name>` referencing a `WINDOW`-clause definition is
    /// also accepted, but since the AST has no named-window-reference slot
    /// it is recorded as an otherwise-empty window spec.
    fn parse_optional_over(&mut self) -> Result<Option<WindowSpec>, ParserError> {
        if !self.parse_word("OVER") {
            return Ok(None);
        }
        if self.next_token_if_is(&Token::LeftParen) {
            let spec = self.parse_window_spec_body()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(Some(spec));
        }
        self.parse_identifier()?;
        Ok(Some(WindowSpec::default()))
    }

    /// Parses the body of `OVER (...)`: `PARTITION BY`, `ORDER BY`, and the
    /// trailing frame clause, each optional. The enclosing parentheses are
    /// consumed by the caller.
    pub(crate) fn parse_window_spec_body(&mut self) -> Result<WindowSpec, ParserError> {
        let partition_by = if self.parse_words(&["PARTITION", "BY"]) {
            self.parse_comma_separated(Parser::parse_expr)?
        } else {
            vec![]
        };
        let order_by = if self.parse_keyword("ORDER") {
            self.expect_keyword("BY")?;
            self.parse_comma_separated(Parser::parse_sort_spec)?
        } else {
            vec![]
        };
        let window_frame = self.parse_optional_window_frame()?;
        Ok(WindowSpec {
            partition_by,
            order_by,
            window_frame,
        })
    }

    fn parse_optional_window_frame(&mut self) -> Result<Option<WindowFrame>, ParserError> {
        let units = if self.parse_keyword("ROWS") {
            WindowFrameUnits::Rows
        } else if self.parse_word("RANGE") {
            WindowFrameUnits::Range
        } else if self.parse_word("GROUPS") {
            WindowFrameUnits::Groups
        } else {
            return Ok(None);
        };
        if self.parse_keyword("BETWEEN") {
            let start_bound = self.parse_window_frame_bound()?;
            self.expect_keyword("AND")?;
            let end_bound = Some(self.parse_window_frame_bound()?);
            Ok(Some(WindowFrame {
                units,
                start_bound,
                end_bound,
            }))
        } else {
            let start_bound = self.parse_window_frame_bound()?;
            Ok(Some(WindowFrame {
                units,
                start_bound,
                end_bound: None,
            }))
        }
    }

    fn parse_window_frame_bound(&mut self) -> Result<WindowFrameBound, ParserError> {
        if self.parse_words(&["CURRENT", "ROW"]) {
            return Ok(WindowFrameBound::CurrentRow);
        }
        if self.parse_word("UNBOUNDED") {
            if self.parse_keyword("PRECEDING") {
                return Ok(WindowFrameBound::Preceding(None));
            }
            if self.parse_word("FOLLOWING") {
                return Ok(WindowFrameBound::Following(None));
            }
            let found = self.peek_token().cloned();
            return self.expected("PRECEDING or FOLLOWING", found);
        }
        let n = self.parse_literal_uint()?;
        if self.parse_keyword("PRECEDING") {
            return Ok(WindowFrameBound::Preceding(Some(n)));
        }
        if self.parse_word("FOLLOWING") {
            return Ok(WindowFrameBound::Following(Some(n)));
        }
        let found = self.peek_token().cloned();
        self.expected("PRECEDING or FOLLOWING", found)
    }
}
