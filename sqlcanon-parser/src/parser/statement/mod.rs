mod ddl;
mod dml;

use sqlcanon_ast::Stmt;
use sqlcanon_core::Dialect;

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses one top-level statement: `SELECT`, `INSERT`, `UPDATE`,
    /// `DELETE`, or a `CREATE TABLE`/`VIEW`/`INDEX` data-definition form.
    pub fn parse_statement(&mut self) -> Result<Stmt, ParserError> {
        if self.parse_keyword("CREATE") {
            return self.parse_create_stmt();
        }
        if self.next_keyword_is("SELECT") || self.next_keyword_is("WITH") {
            return Ok(Stmt::Select(self.parse_select_stmt()?));
        }
        if self.parse_keyword("INSERT") {
            return Ok(Stmt::Insert(self.parse_insert_stmt()?));
        }
        if self.parse_keyword("UPDATE") {
            return Ok(Stmt::Update(self.parse_update_stmt()?));
        }
        if self.parse_keyword("DELETE") {
            return Ok(Stmt::Delete(self.parse_delete_stmt()?));
        }
        let found = self.peek_token().cloned();
        self.expected(
            "SELECT, WITH, INSERT, UPDATE, DELETE, or CREATE",
            found,
        )
    }

    fn next_keyword_is(&mut self, expected: &str) -> bool {
        matches!(self.peek_token(), Some(token) if crate::parser::is_keyword(token, expected))
    }
}
