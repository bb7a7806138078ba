#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec};

use sqlcanon_ast::{expression::*, Expr};
use sqlcanon_core::Dialect;
use sqlcanon_lexer::Token;

use crate::{error::ParserError, parser::Parser};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses a full query: `[WITH ...] <body> [ORDER BY ...] [LIMIT ...]
    /// [OFFSET ...] [FETCH ...]`. The leading `WITH`/`SELECT` keyword has
    /// not yet been consumed by the caller.
    pub fn parse_query(&mut self) -> Result<Query, ParserError> {
        let with = if self.parse_keyword("WITH") {
            Some(self.parse_with()?)
        } else {
            None
        };
        let body = self.parse_query_body()?;
        let order_by = if self.parse_keyword("ORDER") {
            self.expect_keyword("BY")?;
            Some(OrderBy {
                list: self.parse_comma_separated(Parser::parse_sort_spec)?,
            })
        } else {
            None
        };
        let limit = self.parse_optional_limit()?;
        let offset = self.parse_optional_offset()?;
        let fetch = self.parse_optional_fetch()?;
        Ok(Query {
            with,
            body,
            order_by,
            limit,
            offset,
            fetch,
        })
    }

    fn parse_with(&mut self) -> Result<With, ParserError> {
        let recursive = self.parse_keyword("RECURSIVE");
        let ctes = self.parse_comma_separated(Parser::parse_cte)?;
        Ok(With { recursive, ctes })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParserError> {
        let name = self.parse_identifier()?;
        let columns = if self.next_token_if_is(&Token::LeftParen) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            cols
        } else {
            vec![]
        };
        self.expect_keyword("AS")?;
        self.expect_token(&Token::LeftParen)?;
        let query = Box::new(self.parse_query()?);
        self.expect_token(&Token::RightParen)?;
        Ok(Cte {
            name,
            columns,
            query,
        })
    }

    /// Parses the left-associative `UNION`/`INTERSECT`/`EXCEPT` chain over
    /// query terms; same-kind runs fold left rather than nesting by
    /// precedence, per the query body's own redesign note.
    fn parse_query_body(&mut self) -> Result<QueryBody, ParserError> {
        let mut left = self.parse_query_term()?;
        loop {
            let op = if self.parse_keyword("UNION") {
                QueryBodyOperator::Union
            } else if self.parse_keyword("INTERSECT") {
                QueryBodyOperator::Intersect
            } else if self.parse_keyword("EXCEPT") {
                QueryBodyOperator::Except
            } else {
                break;
            };
            let quantifier = if self.parse_keyword("ALL") {
                SetQuantifier::All
            } else {
                self.parse_keyword("DISTINCT");
                SetQuantifier::Distinct
            };
            let right = self.parse_query_term()?;
            left = QueryBody::Operation {
                left: Box::new(left),
                op,
                quantifier,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parses one operand of a set-operation chain: a `SELECT`, a
    /// parenthesized subquery, a `VALUES` list, or `TABLE name`.
    fn parse_query_term(&mut self) -> Result<QueryBody, ParserError> {
        if self.parse_keyword("VALUES") {
            return Ok(QueryBody::Values(self.parse_values_body()?));
        }
        if self.parse_keyword("TABLE") {
            return Ok(QueryBody::Table(self.parse_object_name()?));
        }
        if self.next_token_if_is(&Token::LeftParen) {
            let query = self.parse_query()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(QueryBody::Subquery(Box::new(query)));
        }
        self.expect_keyword("SELECT")?;
        Ok(QueryBody::QuerySpec(Box::new(self.parse_query_spec()?)))
    }

    fn parse_values_body(&mut self) -> Result<Values, ParserError> {
        let list = self.parse_comma_separated(|p: &mut Self| {
            p.expect_token(&Token::LeftParen)?;
            let row = p.parse_comma_separated(Parser::parse_expr)?;
            p.expect_token(&Token::RightParen)?;
            Ok(row)
        })?;
        Ok(Values { list })
    }

    /// Parses a `SELECT` specification; the `SELECT` keyword has already
    /// been consumed.
    fn parse_query_spec(&mut self) -> Result<QuerySpec, ParserError> {
        let quantifier = if self.parse_keyword("DISTINCT") {
            SetQuantifier::Distinct
        } else {
            self.parse_keyword("ALL");
            SetQuantifier::All
        };
        let projection = self.parse_comma_separated(Parser::parse_select_item)?;
        let from = if self.parse_keyword("FROM") {
            Some(self.parse_from()?)
        } else {
            None
        };
        let selection = if self.parse_keyword("WHERE") {
            Some(Where {
                expr: self.parse_expr()?,
            })
        } else {
            None
        };
        let group_by = if self.parse_keyword("GROUP") {
            self.expect_keyword("BY")?;
            Some(GroupBy {
                list: self.parse_comma_separated(Parser::parse_grouping_element)?,
            })
        } else {
            None
        };
        let having = if self.parse_keyword("HAVING") {
            Some(Having {
                expr: self.parse_expr()?,
            })
        } else {
            None
        };
        let window = if self.parse_keyword("WINDOW") {
            Some(Window {
                list: self.parse_comma_separated(Parser::parse_window_def)?,
            })
        } else {
            None
        };
        Ok(QuerySpec {
            quantifier,
            projection,
            from,
            selection,
            group_by,
            having,
            window,
        })
    }

    /// Parses one projection item: `*`, `table.*`, or `expr [[AS] alias]`.
    fn parse_select_item(&mut self) -> Result<SelectItem, ParserError> {
        match self.parse_expr()? {
            Expr::Wildcard => Ok(SelectItem::Wildcard),
            Expr::QualifiedWildcard(name) => Ok(SelectItem::QualifiedWildcard(name)),
            expr => {
                let alias = if self.parse_keyword("AS") {
                    Some(self.parse_identifier()?)
                } else if matches!(self.peek_token(), Some(Token::Ident(_))) {
                    Some(self.parse_identifier()?)
                } else {
                    None
                };
                Ok(SelectItem::DerivedColumn { expr, alias })
            }
        }
    }

    fn parse_from(&mut self) -> Result<From, ParserError> {
        let list = self.parse_comma_separated(Parser::parse_table_reference)?;
        Ok(From { list })
    }

    fn parse_table_reference(&mut self) -> Result<TableReference, ParserError> {
        let relation = self.parse_table_factor()?;
        let mut joins = vec![];
        while let Some(join) = self.parse_joined_table()? {
            joins.push(join);
        }
        Ok(TableReference { relation, joins })
    }

    /// Parses a base `FROM`/join relation: a named table, a `[LATERAL]
    /// (subquery)` or `(VALUES ...)` derived table, or a parenthesized
    /// nested join.
    fn parse_table_factor(&mut self) -> Result<TableFactor, ParserError> {
        if self.parse_word("LATERAL") {
            self.expect_token(&Token::LeftParen)?;
            let subquery = Box::new(self.parse_query()?);
            self.expect_token(&Token::RightParen)?;
            let alias = self.parse_optional_table_alias()?;
            return Ok(TableFactor::Derived {
                lateral: true,
                subquery,
                alias,
            });
        }
        if self.next_token_if_is(&Token::LeftParen) {
            if self.next_is_query() {
                let subquery = Box::new(self.parse_query()?);
                self.expect_token(&Token::RightParen)?;
                let alias = self.parse_optional_table_alias()?;
                return Ok(TableFactor::Derived {
                    lateral: false,
                    subquery,
                    alias,
                });
            }
            if self.parse_keyword("VALUES") {
                let values = self.parse_values_body()?;
                let subquery = Box::new(Query {
                    with: None,
                    body: QueryBody::Values(values),
                    order_by: None,
                    limit: None,
                    offset: None,
                    fetch: None,
                });
                self.expect_token(&Token::RightParen)?;
                let alias = self.parse_optional_table_alias()?;
                return Ok(TableFactor::Derived {
                    lateral: false,
                    subquery,
                    alias,
                });
            }
            let nested = self.parse_table_reference()?;
            self.expect_token(&Token::RightParen)?;
            return Ok(TableFactor::NestedJoin(Box::new(nested)));
        }
        let name = self.parse_object_name()?;
        let alias = self.parse_optional_table_alias()?;
        Ok(TableFactor::Table { name, alias })
    }

    /// Parses `[AS] name [(columns)]`, accepting the bare-alias form used
    /// whenever the upcoming token is an ordinary (non-keyword) identifier.
    fn parse_optional_table_alias(&mut self) -> Result<Option<TableAlias>, ParserError> {
        let name = if self.parse_keyword("AS") {
            self.parse_identifier()?
        } else if matches!(self.peek_token(), Some(Token::Ident(_))) {
            self.parse_identifier()?
        } else {
            return Ok(None);
        };
        let columns = if self.next_token_if_is(&Token::LeftParen) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            cols
        } else {
            vec![]
        };
        Ok(Some(TableAlias { name, columns }))
    }

    /// Parses one chained join, if the upcoming tokens introduce one. The
    /// nine dialect join spellings fold into the five `JoinOperator`
    /// shapes here: bare `JOIN` and `INNER JOIN` both produce `Inner`, and
    /// `LEFT`/`RIGHT`/`FULL` each accept an optional `OUTER`.
    fn parse_joined_table(&mut self) -> Result<Option<Join>, ParserError> {
        if self.parse_keyword("CROSS") {
            self.expect_keyword("JOIN")?;
            let relation = self.parse_table_factor()?;
            return Ok(Some(Join {
                join: JoinOperator::Cross,
                relation,
            }));
        }
        if self.parse_keyword("JOIN") || self.parse_keywords(&["INNER", "JOIN"]) {
            let relation = self.parse_table_factor()?;
            let spec = self.parse_join_spec()?;
            return Ok(Some(Join {
                join: JoinOperator::Inner(spec),
                relation,
            }));
        }
        if self.parse_keyword("LEFT") {
            self.parse_keyword("OUTER");
            self.expect_keyword("JOIN")?;
            let relation = self.parse_table_factor()?;
            let spec = self.parse_join_spec()?;
            return Ok(Some(Join {
                join: JoinOperator::LeftOuter(spec),
                relation,
            }));
        }
        if self.parse_keyword("RIGHT") {
            self.parse_keyword("OUTER");
            self.expect_keyword("JOIN")?;
            let relation = self.parse_table_factor()?;
            let spec = self.parse_join_spec()?;
            return Ok(Some(Join {
                join: JoinOperator::RightOuter(spec),
                relation,
            }));
        }
        if self.parse_keyword("FULL") {
            self.parse_keyword("OUTER");
            self.expect_keyword("JOIN")?;
            let relation = self.parse_table_factor()?;
            let spec = self.parse_join_spec()?;
            return Ok(Some(Join {
                join: JoinOperator::FullOuter(spec),
                relation,
            }));
        }
        Ok(None)
    }

    fn parse_join_spec(&mut self) -> Result<JoinSpec, ParserError> {
        if self.parse_keyword("ON") {
            return Ok(JoinSpec::On(Box::new(self.parse_expr()?)));
        }
        if self.parse_keyword("USING") {
            self.expect_token(&Token::LeftParen)?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&Token::RightParen)?;
            return Ok(JoinSpec::Using(columns));
        }
        let found = self.peek_token().cloned();
        self.expected("ON or USING after join type", found)
    }

    fn parse_grouping_element(&mut self) -> Result<GroupingElement, ParserError> {
        if self.parse_keyword("ROLLUP") {
            self.expect_token(&Token::LeftParen)?;
            let list = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RightParen)?;
            return Ok(GroupingElement::Rollup(list));
        }
        if self.parse_keyword("CUBE") {
            self.expect_token(&Token::LeftParen)?;
            let list = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&Token::RightParen)?;
            return Ok(GroupingElement::Cube(list));
        }
        Ok(GroupingElement::Expr(self.parse_expr()?))
    }

    fn parse_window_def(&mut self) -> Result<WindowDef, ParserError> {
        let name = self.parse_identifier()?;
        self.expect_keyword("AS")?;
        self.expect_token(&Token::LeftParen)?;
        let window_spec = self.parse_window_spec_body()?;
        self.expect_token(&Token::RightParen)?;
        Ok(WindowDef { name, window_spec })
    }

    /// Parses one `ORDER BY`/window `ORDER BY` sort key.
    pub(crate) fn parse_sort_spec(&mut self) -> Result<SortSpec, ParserError> {
        let expr = self.parse_expr()?;
        let asc = if self.parse_keyword("ASC") {
            Some(true)
        } else if self.parse_keyword("DESC") {
            Some(false)
        } else {
            None
        };
        let nulls_first = if self.parse_keywords(&["NULLS", "FIRST"]) {
            Some(true)
        } else if self.parse_keywords(&["NULLS", "LAST"]) {
            Some(false)
        } else {
            None
        };
        Ok(SortSpec {
            expr,
            asc,
            nulls_first,
        })
    }

    fn parse_optional_limit(&mut self) -> Result<Option<Limit>, ParserError> {
        if !self.parse_keyword("LIMIT") {
            return Ok(None);
        }
        let count = self.parse_literal()?;
        Ok(Some(Limit { count }))
    }

    fn parse_optional_offset(&mut self) -> Result<Option<Offset>, ParserError> {
        if !self.parse_keyword("OFFSET") {
            return Ok(None);
        }
        let count = self.parse_literal()?;
        let rows = if self.parse_keyword("ROW") {
            OffsetRows::Row
        } else if self.parse_keyword("ROWS") {
            OffsetRows::Rows
        } else {
            OffsetRows::None
        };
        Ok(Some(Offset { count, rows }))
    }

    fn parse_optional_fetch(&mut self) -> Result<Option<Fetch>, ParserError> {
        if !self.parse_keyword("FETCH") {
            return Ok(None);
        }
        self.expect_one_of_keywords(&["FIRST", "NEXT"])?;
        let (quantity, percent) = if self.parse_one_of_keywords(&["ROW", "ROWS"]).is_some() {
            (None, false)
        } else {
            let quantity = self.parse_literal()?;
            let percent = self.parse_keyword("PERCENT");
            self.expect_one_of_keywords(&["ROW", "ROWS"])?;
            (Some(quantity), percent)
        };
        let with_ties = if self.parse_keyword("ONLY") {
            false
        } else if self.parse_keywords(&["WITH", "TIES"]) {
            true
        } else {
            let found = self.peek_token().cloned();
            return self.expected("ONLY or WITH TIES", found);
        };
        Ok(Some(Fetch {
            quantity,
            percent,
            with_ties,
        }))
    }
}

#[cfg(test)]
mod tests {
    use sqlcanon_core::common::CommonDialect;
    use sqlcanon_ast::types::Ident;

    use super::*;

    #[test]
    fn parse_simple_select() {
        let dialect = CommonDialect::default();
        let query = Parser::new_with_sql(&dialect, "SELECT a, b FROM t WHERE a = 1")
            .unwrap()
            .parse_query()
            .unwrap();
        match query.body {
            QueryBody::QuerySpec(spec) => {
                assert_eq!(spec.projection.len(), 2);
                assert!(spec.from.is_some());
                assert!(spec.selection.is_some());
            }
            other => panic!("expected a query spec, got {:?}", other),
        }
    }

    #[test]
    fn parse_union_chain_flattens_left() {
        let dialect = CommonDialect::default();
        let query = Parser::new_with_sql(
            &dialect,
            "SELECT a FROM t UNION SELECT b FROM u UNION ALL SELECT c FROM v",
        )
        .unwrap()
        .parse_query()
        .unwrap();
        match query.body {
            QueryBody::Operation { op, quantifier, .. } => {
                assert_eq!(op, QueryBodyOperator::Union);
                assert_eq!(quantifier, SetQuantifier::All);
            }
            other => panic!("expected a set operation, got {:?}", other),
        }
    }

    #[test]
    fn parse_joins_and_aliases() {
        let dialect = CommonDialect::default();
        let query = Parser::new_with_sql(
            &dialect,
            "SELECT * FROM a JOIN b ON a.id = b.id LEFT JOIN c AS cc ON a.id = cc.id",
        )
        .unwrap()
        .parse_query()
        .unwrap();
        match query.body {
            QueryBody::QuerySpec(spec) => {
                let from = spec.from.unwrap();
                assert_eq!(from.list.len(), 1);
                assert_eq!(from.list[0].joins.len(), 2);
                match &from.list[0].joins[1].relation {
                    TableFactor::Table { alias, .. } => {
                        assert_eq!(alias.as_ref().unwrap().name, Ident::new("cc"));
                    }
                    other => panic!("expected a named table, got {:?}", other),
                }
            }
            other => panic!("expected a query spec, got {:?}", other),
        }
    }

    #[test]
    fn parse_cte_and_order_limit() {
        let dialect = CommonDialect::default();
        let query = Parser::new_with_sql(
            &dialect,
            "WITH x AS (SELECT a FROM t) SELECT a FROM x ORDER BY a DESC LIMIT 10 OFFSET 5",
        )
        .unwrap()
        .parse_query()
        .unwrap();
        assert!(query.with.is_some());
        assert!(query.order_by.is_some());
        assert!(query.limit.is_some());
        assert!(query.offset.is_some());
    }
}
