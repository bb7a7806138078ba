#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec, vec::Vec};

use sqlcanon_ast::statement::{
    ColumnConstraint, ColumnConstraintDef, ColumnDef, CreateIndexStmt, CreateTableStmt,
    CreateViewStmt, IndexColumn, LikeClause, ReferentialAction, ReferentialMatchType, Stmt,
    TableConstraint, TableConstraintDef, ViewCheckOption,
};
use sqlcanon_core::Dialect;
use sqlcanon_lexer::Token;

use crate::{
    error::ParserError,
    parser::{is_word, Parser},
};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses a `CREATE TABLE`/`VIEW`/`INDEX` statement; the `CREATE`
    /// keyword has already been consumed.
    pub(crate) fn parse_create_stmt(&mut self) -> Result<Stmt, ParserError> {
        if self.parse_word("UNIQUE") {
            return Ok(Stmt::CreateIndex(self.parse_create_index_stmt(true)?));
        }
        if self.parse_keyword("INDEX") {
            return Ok(Stmt::CreateIndex(self.parse_create_index_stmt_body(false)?));
        }
        let or_replace = self.parse_words(&["OR", "REPLACE"]);
        if self.parse_word("VIEW") {
            return Ok(Stmt::CreateView(self.parse_create_view_stmt(or_replace, false)?));
        }
        if self.parse_word("RECURSIVE") {
            self.expect_word("VIEW")?;
            return Ok(Stmt::CreateView(self.parse_create_view_stmt(or_replace, true)?));
        }
        let temporary = self.parse_word("TEMPORARY") || self.parse_word("TEMP");
        self.expect_keyword("TABLE")?;
        Ok(Stmt::CreateTable(self.parse_create_table_stmt(temporary)?))
    }

    fn parse_create_index_stmt(&mut self, unique: bool) -> Result<CreateIndexStmt, ParserError> {
        self.expect_keyword("INDEX")?;
        self.parse_create_index_stmt_body(unique)
    }

    fn parse_create_index_stmt_body(
        &mut self,
        unique: bool,
    ) -> Result<CreateIndexStmt, ParserError> {
        let if_not_exists = self.parse_words(&["IF", "NOT", "EXISTS"]);
        let index = if self.next_keyword_is_on() {
            None
        } else {
            Some(self.parse_object_name()?)
        };
        self.expect_keyword("ON")?;
        let table = self.parse_object_name()?;
        self.expect_token(&Token::LeftParen)?;
        let columns = self.parse_comma_separated(Parser::parse_index_column)?;
        self.expect_token(&Token::RightParen)?;
        Ok(CreateIndexStmt {
            unique,
            if_not_exists,
            index,
            table,
            columns,
        })
    }

    fn next_keyword_is_on(&mut self) -> bool {
        matches!(self.peek_token(), Some(token) if crate::parser::is_keyword(token, "ON"))
    }

    fn parse_index_column(&mut self) -> Result<IndexColumn, ParserError> {
        let column = self.parse_identifier()?;
        let asc = if self.parse_keyword("ASC") {
            Some(true)
        } else if self.parse_keyword("DESC") {
            Some(false)
        } else {
            None
        };
        Ok(IndexColumn { column, asc })
    }

    fn parse_create_view_stmt(
        &mut self,
        or_replace: bool,
        recursive: bool,
    ) -> Result<CreateViewStmt, ParserError> {
        let name = self.parse_object_name()?;
        let columns = if self.next_token_if_is(&Token::LeftParen) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            cols
        } else {
            vec![]
        };
        self.expect_keyword("AS")?;
        let query = Box::new(self.parse_query()?);
        let check_option = if self.parse_keyword("WITH") {
            let option = if self.parse_word("LOCAL") {
                ViewCheckOption::Local
            } else {
                self.parse_word("CASCADED");
                ViewCheckOption::Cascaded
            };
            self.expect_word("CHECK")?;
            self.expect_word("OPTION")?;
            Some(option)
        } else {
            None
        };
        Ok(CreateViewStmt {
            or_replace,
            recursive,
            name,
            columns,
            query,
            check_option,
        })
    }

    fn parse_create_table_stmt(&mut self, temporary: bool) -> Result<CreateTableStmt, ParserError> {
        let if_not_exists = self.parse_words(&["IF", "NOT", "EXISTS"]);
        let name = self.parse_object_name()?;

        if self.parse_word("LIKE") {
            let table = self.parse_object_name()?;
            return Ok(CreateTableStmt {
                temporary,
                if_not_exists,
                name,
                columns: vec![],
                constraints: vec![],
                like: Some(LikeClause { table }),
                query: None,
            });
        }

        let (columns, constraints) = if self.next_token_if_is(&Token::LeftParen) {
            let defs = self.parse_comma_separated(Parser::parse_table_element)?;
            self.expect_token(&Token::RightParen)?;
            let mut columns = vec![];
            let mut constraints = vec![];
            for def in defs {
                match def {
                    TableElement::Column(column) => columns.push(column),
                    TableElement::Constraint(constraint) => constraints.push(constraint),
                }
            }
            (columns, constraints)
        } else {
            (vec![], vec![])
        };

        let query = if self.parse_keyword("AS") {
            Some(Box::new(self.parse_query()?))
        } else {
            None
        };

        Ok(CreateTableStmt {
            temporary,
            if_not_exists,
            name,
            columns,
            constraints,
            like: None,
            query,
        })
    }

    fn parse_table_element(&mut self) -> Result<TableElement, ParserError> {
        if self.is_table_constraint_start() {
            return Ok(TableElement::Constraint(self.parse_table_constraint_def()?));
        }
        Ok(TableElement::Column(self.parse_column_def()?))
    }

    /// Looks one token ahead for a table-constraint introducer, without
    /// consuming it.
    fn is_table_constraint_start(&mut self) -> bool {
        let starts = matches!(
            self.peek_next_token(),
            Some(token) if is_word(token, "CONSTRAINT")
                || is_word(token, "PRIMARY")
                || is_word(token, "UNIQUE")
                || is_word(token, "FOREIGN")
                || is_word(token, "CHECK")
        );
        self.reset_peek_cursor();
        starts
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParserError> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut collation = None;
        let mut default = None;
        let mut constraints = vec![];
        loop {
            if self.parse_keyword("COLLATE") {
                collation = Some(self.parse_object_name()?);
                continue;
            }
            if self.parse_word("DEFAULT") {
                default = Some(self.parse_expr()?);
                continue;
            }
            if let Some(constraint) = self.parse_optional_column_constraint_def()? {
                constraints.push(constraint);
                continue;
            }
            break;
        }
        Ok(ColumnDef {
            name,
            data_type,
            constraints,
            default,
            collation,
        })
    }

    fn parse_optional_column_constraint_def(
        &mut self,
    ) -> Result<Option<ColumnConstraintDef>, ParserError> {
        let name = if self.parse_word("CONSTRAINT") {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let constraint = if self.parse_keyword("NOT") {
            self.expect_keyword("NULL")?;
            ColumnConstraint::NotNull
        } else if self.parse_keyword("NULL") {
            ColumnConstraint::Null
        } else if self.parse_word("PRIMARY") {
            self.expect_word("KEY")?;
            ColumnConstraint::Unique { is_primary: true }
        } else if self.parse_word("UNIQUE") {
            ColumnConstraint::Unique { is_primary: false }
        } else if self.parse_word("REFERENCES") {
            self.parse_references_constraint()?
        } else if self.parse_word("CHECK") {
            self.expect_token(&Token::LeftParen)?;
            let expr = self.parse_expr()?;
            self.expect_token(&Token::RightParen)?;
            ColumnConstraint::Check(Box::new(expr))
        } else if name.is_some() {
            let found = self.peek_token().cloned();
            return self.expected("a column constraint after CONSTRAINT name", found);
        } else {
            return Ok(None);
        };
        Ok(Some(ColumnConstraintDef { name, constraint }))
    }

    fn parse_references_constraint(&mut self) -> Result<ColumnConstraint, ParserError> {
        let table = self.parse_object_name()?;
        let referred_columns = if self.next_token_if_is(&Token::LeftParen) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            cols
        } else {
            vec![]
        };
        let match_type = self.parse_optional_referential_match_type()?;
        let (on_delete, on_update) = self.parse_optional_referential_actions()?;
        Ok(ColumnConstraint::References {
            table,
            referred_columns,
            match_type,
            on_delete,
            on_update,
        })
    }

    fn parse_optional_referential_match_type(
        &mut self,
    ) -> Result<Option<ReferentialMatchType>, ParserError> {
        if !self.parse_word("MATCH") {
            return Ok(None);
        }
        if self.parse_keyword("FULL") {
            Ok(Some(ReferentialMatchType::Full))
        } else if self.parse_word("PARTIAL") {
            Ok(Some(ReferentialMatchType::Partial))
        } else {
            self.expect_word("SIMPLE")?;
            Ok(Some(ReferentialMatchType::Simple))
        }
    }

    fn parse_optional_referential_actions(
        &mut self,
    ) -> Result<(Option<ReferentialAction>, Option<ReferentialAction>), ParserError> {
        let mut on_delete = None;
        let mut on_update = None;
        loop {
            if !self.parse_keyword("ON") {
                break;
            }
            if self.parse_keyword("DELETE") {
                on_delete = Some(self.parse_referential_action()?);
            } else {
                self.expect_keyword("UPDATE")?;
                on_update = Some(self.parse_referential_action()?);
            }
        }
        Ok((on_delete, on_update))
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParserError> {
        if self.parse_word("RESTRICT") {
            return Ok(ReferentialAction::Restrict);
        }
        if self.parse_word("CASCADE") {
            return Ok(ReferentialAction::Cascade);
        }
        if self.parse_words(&["SET", "NULL"]) {
            return Ok(ReferentialAction::SetNull);
        }
        if self.parse_words(&["SET", "DEFAULT"]) {
            return Ok(ReferentialAction::SetDefault);
        }
        if self.parse_words(&["NO", "ACTION"]) {
            return Ok(ReferentialAction::NoAction);
        }
        let found = self.peek_token().cloned();
        self.expected("a referential action", found)
    }

    fn parse_table_constraint_def(&mut self) -> Result<TableConstraintDef, ParserError> {
        let name = if self.parse_word("CONSTRAINT") {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let constraint = if self.parse_word("PRIMARY") {
            self.expect_word("KEY")?;
            self.expect_token(&Token::LeftParen)?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            TableConstraint::Unique {
                columns,
                is_primary: true,
            }
        } else if self.parse_word("UNIQUE") {
            self.expect_token(&Token::LeftParen)?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            TableConstraint::Unique {
                columns,
                is_primary: false,
            }
        } else if self.parse_word("FOREIGN") {
            self.expect_word("KEY")?;
            self.expect_token(&Token::LeftParen)?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            self.expect_word("REFERENCES")?;
            let foreign_table = self.parse_object_name()?;
            self.expect_token(&Token::LeftParen)?;
            let referred_columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            TableConstraint::ForeignKey {
                columns,
                foreign_table,
                referred_columns,
            }
        } else {
            self.expect_word("CHECK")?;
            self.expect_token(&Token::LeftParen)?;
            let expr = self.parse_expr()?;
            self.expect_token(&Token::RightParen)?;
            TableConstraint::Check(Box::new(expr))
        };
        Ok(TableConstraintDef { name, constraint })
    }
}

/// One element of a `CREATE TABLE (...)` element list: a column definition
/// or a table-level constraint.
enum TableElement {
    Column(ColumnDef),
    Constraint(TableConstraintDef),
}

#[cfg(test)]
mod tests {
    use sqlcanon_core::common::CommonDialect;

    use super::*;

    fn parse_stmt(sql: &str) -> Stmt {
        let dialect = CommonDialect::default();
        Parser::new_with_sql(&dialect, sql)
            .unwrap()
            .parse_statement()
            .unwrap()
    }

    #[test]
    fn parse_create_table_with_constraints() {
        let stmt = parse_stmt(
            "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(20) NOT NULL, \
             CONSTRAINT fk FOREIGN KEY (id) REFERENCES other (id))",
        );
        match stmt {
            Stmt::CreateTable(stmt) => {
                assert_eq!(stmt.columns.len(), 2);
                assert_eq!(stmt.constraints.len(), 1);
            }
            other => panic!("expected CREATE TABLE, got {:?}", other),
        }
    }

    #[test]
    fn parse_create_table_if_not_exists_like() {
        let stmt = parse_stmt("CREATE TABLE IF NOT EXISTS t LIKE other");
        match stmt {
            Stmt::CreateTable(stmt) => {
                assert!(stmt.if_not_exists);
                assert!(stmt.like.is_some());
            }
            other => panic!("expected CREATE TABLE, got {:?}", other),
        }
    }

    #[test]
    fn parse_create_view_with_check_option() {
        let stmt = parse_stmt("CREATE OR REPLACE VIEW v AS SELECT a FROM t WITH CASCADED CHECK OPTION");
        match stmt {
            Stmt::CreateView(stmt) => {
                assert!(stmt.or_replace);
                assert_eq!(stmt.check_option, Some(ViewCheckOption::Cascaded));
            }
            other => panic!("expected CREATE VIEW, got {:?}", other),
        }
    }

    #[test]
    fn parse_create_unique_index() {
        let stmt = parse_stmt("CREATE UNIQUE INDEX idx ON t (a, b DESC)");
        match stmt {
            Stmt::CreateIndex(stmt) => {
                assert!(stmt.unique);
                assert_eq!(stmt.columns.len(), 2);
                assert_eq!(stmt.columns[1].asc, Some(false));
            }
            other => panic!("expected CREATE INDEX, got {:?}", other),
        }
    }
}
