#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec, vec::Vec};

use sqlcanon_ast::statement::{Assignment, DeleteStmt, InsertStmt, SelectStmt, UpdateStmt};
use sqlcanon_core::Dialect;
use sqlcanon_lexer::Token;

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses `SELECT ...` or `WITH ... SELECT ...`; neither keyword has
    /// been consumed yet, since the query grammar itself recognizes both.
    pub(crate) fn parse_select_stmt(&mut self) -> Result<SelectStmt, ParserError> {
        Ok(SelectStmt(Box::new(self.parse_query()?)))
    }

    /// Parses `INSERT INTO table [(columns)] {VALUES ... | query}`; the
    /// `INSERT` keyword has already been consumed.
    pub(crate) fn parse_insert_stmt(&mut self) -> Result<InsertStmt, ParserError> {
        self.expect_keyword("INTO")?;
        let table = self.parse_object_name()?;
        let columns = if self.next_token_if_is(&Token::LeftParen) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            cols
        } else {
            vec![]
        };
        let source = if self.parse_keywords(&["DEFAULT", "VALUES"]) {
            None
        } else {
            Some(Box::new(self.parse_query()?))
        };
        Ok(InsertStmt {
            table,
            columns,
            source,
        })
    }

    /// Parses `UPDATE table SET col = expr [, ...] [WHERE expr]`; the
    /// `UPDATE` keyword has already been consumed.
    pub(crate) fn parse_update_stmt(&mut self) -> Result<UpdateStmt, ParserError> {
        let table = self.parse_object_name()?;
        self.expect_keyword("SET")?;
        let assignments = self.parse_comma_separated(Parser::parse_assignment)?;
        let selection = if self.parse_keyword("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(UpdateStmt {
            table,
            assignments,
            selection,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParserError> {
        let target = self.parse_identifier()?;
        self.expect_token(&Token::Equal)?;
        let value = self.parse_expr()?;
        Ok(Assignment { target, value })
    }

    /// Parses `DELETE FROM table [WHERE expr]`; the `DELETE` keyword has
    /// already been consumed.
    pub(crate) fn parse_delete_stmt(&mut self) -> Result<DeleteStmt, ParserError> {
        self.expect_keyword("FROM")?;
        let table = self.parse_object_name()?;
        let selection = if self.parse_keyword("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(DeleteStmt { table, selection })
    }
}

#[cfg(test)]
mod tests {
    use sqlcanon_core::common::CommonDialect;

    use super::*;

    #[test]
    fn parse_insert_with_columns_and_values() {
        let dialect = CommonDialect::default();
        let stmt = Parser::new_with_sql(&dialect, "INSERT INTO t (a, b) VALUES (1, 2)")
            .unwrap()
            .parse_insert_stmt()
            .unwrap();
        assert_eq!(stmt.columns.len(), 2);
        assert!(stmt.source.is_some());
    }

    #[test]
    fn parse_insert_default_values() {
        let dialect = CommonDialect::default();
        let stmt = Parser::new_with_sql(&dialect, "INSERT INTO t DEFAULT VALUES")
            .unwrap()
            .parse_insert_stmt()
            .unwrap();
        assert!(stmt.columns.is_empty());
        assert!(stmt.source.is_none());
    }

    #[test]
    fn parse_update_with_where() {
        let dialect = CommonDialect::default();
        let stmt = Parser::new_with_sql(&dialect, "UPDATE t SET a = 1, b = 2 WHERE c = 3")
            .unwrap()
            .parse_update_stmt()
            .unwrap();
        assert_eq!(stmt.assignments.len(), 2);
        assert!(stmt.selection.is_some());
    }

    #[test]
    fn parse_delete_without_where() {
        let dialect = CommonDialect::default();
        let stmt = Parser::new_with_sql(&dialect, "DELETE FROM t")
            .unwrap()
            .parse_delete_stmt()
            .unwrap();
        assert!(stmt.selection.is_none());
    }
}
