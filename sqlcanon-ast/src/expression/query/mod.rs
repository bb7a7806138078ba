//! The `SELECT` query grammar: query bodies, set operations, and the
//! trailing `ORDER BY`/`LIMIT`/`OFFSET`/`FETCH` clauses.

mod table;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::table::{
    From, GroupBy, GroupingElement, Having, Join, JoinOperator, JoinSpec, TableAlias, TableFactor,
    TableReference, Where, Window, WindowDef,
};
use crate::{
    types::{Ident, Literal, ObjectName},
    utils::display_comma_separated,
    Expr,
};

/// A full query: optional `WITH` prefix, a body, and the trailing clauses
/// that bind to the query as a whole rather than to any one `SELECT`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Query {
    /// The `WITH` clause, if present.
    pub with: Option<With>,
    /// The query body: a single `SELECT`, a set operation, or `VALUES`.
    pub body: QueryBody,
    /// The trailing `ORDER BY` clause.
    pub order_by: Option<OrderBy>,
    /// The trailing `LIMIT` clause.
    pub limit: Option<Limit>,
    /// The trailing `OFFSET` clause.
    pub offset: Option<Offset>,
    /// The trailing `FETCH` clause.
    pub fetch: Option<Fetch>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{} ", with)?;
        }
        write!(f, "{}", self.body)?;
        if let Some(order_by) = &self.order_by {
            write!(f, " {}", order_by)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {}", limit)?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " {}", offset)?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " {}", fetch)?;
        }
        Ok(())
    }
}

/// The body of a query: either one `SELECT`, a parenthesized/`VALUES` term,
/// or a left-associative chain of set operations over such terms.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QueryBody {
    /// A single `SELECT ...` specification.
    QuerySpec(Box<QuerySpec>),
    /// A parenthesized subquery used as a set-operation operand.
    Subquery(Box<Query>),
    /// A `VALUES (...), (...)` list.
    Values(Values),
    /// A `TABLE <name>` shorthand for `SELECT * FROM <name>`.
    Table(ObjectName),
    /// `<left> <op> [ALL|DISTINCT] <right>`; same-kind chains flatten left
    /// during parsing rather than nesting arbitrarily deep.
    Operation {
        /// The left operand.
        left: Box<QueryBody>,
        /// `UNION`, `INTERSECT` or `EXCEPT`.
        op: QueryBodyOperator,
        /// `ALL` or `DISTINCT` (default).
        quantifier: SetQuantifier,
        /// The right operand.
        right: Box<QueryBody>,
    },
}

impl fmt::Display for QueryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuerySpec(query) => write!(f, "{}", query),
            Self::Subquery(query) => write!(f, "({})", query),
            Self::Values(values) => write!(f, "{}", values),
            Self::Table(name) => write!(f, "TABLE {}", name),
            Self::Operation {
                left,
                op,
                quantifier,
                right,
            } => {
                write!(f, "{} {}", left, op)?;
                if *quantifier == SetQuantifier::All {
                    write!(f, " ALL")?;
                }
                write!(f, " {}", right)
            }
        }
    }
}

/// The core `SELECT [DISTINCT] <proj> FROM ... WHERE ... GROUP BY ... HAVING
/// ... WINDOW ...` specification.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuerySpec {
    /// `ALL` (default) or `DISTINCT`.
    pub quantifier: SetQuantifier,
    /// The projection list.
    pub projection: Vec<SelectItem>,
    /// The `FROM` clause; absent for dialects that allow a `FROM`-less
    /// `SELECT` (e.g. `SELECT 1`).
    pub from: Option<From>,
    /// The `WHERE` clause.
    pub selection: Option<Where>,
    /// The `GROUP BY` clause.
    pub group_by: Option<GroupBy>,
    /// The `HAVING` clause.
    pub having: Option<Having>,
    /// Named window definitions introduced by `WINDOW w AS (...)`.
    pub window: Option<Window>,
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        if self.quantifier == SetQuantifier::Distinct {
            write!(f, "DISTINCT ")?;
        }
        write!(f, "{}", display_comma_separated(&self.projection))?;
        if let Some(from) = &self.from {
            write!(f, " FROM {}", from)?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " {}", selection)?;
        }
        if let Some(group_by) = &self.group_by {
            write!(f, " {}", group_by)?;
        }
        if let Some(having) = &self.having {
            write!(f, " {}", having)?;
        }
        if let Some(window) = &self.window {
            write!(f, " {}", window)?;
        }
        Ok(())
    }
}

/// One item of the projection list.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectItem {
    /// `*`
    Wildcard,
    /// `<table>.*`
    QualifiedWildcard(ObjectName),
    /// `<expr> [AS <alias>]`
    DerivedColumn {
        /// The projected expression.
        expr: Expr,
        /// The optional column alias.
        alias: Option<Ident>,
    },
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => write!(f, "*"),
            Self::QualifiedWildcard(name) => write!(f, "{}.*", name),
            Self::DerivedColumn { expr, alias } => {
                write!(f, "{}", expr)?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", alias)?;
                }
                Ok(())
            }
        }
    }
}

/// `VALUES (expr, ...), (expr, ...)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Values {
    /// Each inner vector is one row.
    pub list: Vec<Vec<Expr>>,
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VALUES ")?;
        let mut first = true;
        for row in &self.list {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "({})", display_comma_separated(row))?;
        }
        Ok(())
    }
}

/// A set operation keyword.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QueryBodyOperator {
    /// `UNION`
    Union,
    /// `EXCEPT`
    Except,
    /// `INTERSECT`
    Intersect,
}

impl fmt::Display for QueryBodyOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "UNION",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        })
    }
}

/// `ALL` or `DISTINCT` (the default).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SetQuantifier {
    /// `ALL`
    All,
    /// `DISTINCT`
    Distinct,
}

impl Default for SetQuantifier {
    fn default() -> Self {
        Self::Distinct
    }
}

/// `WITH [RECURSIVE] cte [, cte]*`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct With {
    /// Whether `RECURSIVE` was specified.
    pub recursive: bool,
    /// The common table expressions, in source order.
    pub ctes: Vec<Cte>,
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WITH ")?;
        if self.recursive {
            write!(f, "RECURSIVE ")?;
        }
        write!(f, "{}", display_comma_separated(&self.ctes))
    }
}

/// One `name [(columns)] AS (query)` common table expression.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cte {
    /// The CTE's name, bound in the rest of the `WITH` query.
    pub name: Ident,
    /// The optional explicit column-name list.
    pub columns: Vec<Ident>,
    /// The CTE's own query.
    pub query: Box<Query>,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        write!(f, " AS ({})", self.query)
    }
}

/// `ORDER BY sort_spec [, sort_spec]*`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderBy {
    /// The ordered sort keys.
    pub list: Vec<SortSpec>,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORDER BY {}", display_comma_separated(&self.list))
    }
}

/// One `ORDER BY` key: an expression plus optional direction/null ordering.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortSpec {
    /// The sort key expression.
    pub expr: Expr,
    /// `Some(true)` for `ASC`, `Some(false)` for `DESC`, `None` for the
    /// dialect default.
    pub asc: Option<bool>,
    /// `Some(true)` for `NULLS FIRST`, `Some(false)` for `NULLS LAST`.
    pub nulls_first: Option<bool>,
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.asc {
            Some(true) => write!(f, " ASC")?,
            Some(false) => write!(f, " DESC")?,
            None => {}
        }
        match self.nulls_first {
            Some(true) => write!(f, " NULLS FIRST")?,
            Some(false) => write!(f, " NULLS LAST")?,
            None => {}
        }
        Ok(())
    }
}

/// `OFFSET <count> [ROW | ROWS]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    /// The offset count.
    pub count: Literal,
    /// Which row-unit keyword followed the count, if any.
    pub rows: OffsetRows,
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OFFSET {}{}", self.count, self.rows)
    }
}

/// The row-unit keyword following an `OFFSET` count.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OffsetRows {
    /// No unit keyword given.
    None,
    /// `ROW`
    Row,
    /// `ROWS`
    Rows,
}

impl fmt::Display for OffsetRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Row => write!(f, " ROW"),
            Self::Rows => write!(f, " ROWS"),
        }
    }
}

/// `FETCH {FIRST | NEXT} [count [PERCENT]] {ROW | ROWS} {ONLY | WITH TIES}`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fetch {
    /// The row count, if given (`FETCH FIRST ROW ONLY` omits it).
    pub quantity: Option<Literal>,
    /// Whether `PERCENT` followed the count.
    pub percent: bool,
    /// `WITH TIES` instead of `ONLY`.
    pub with_ties: bool,
}

impl fmt::Display for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FETCH FIRST")?;
        if let Some(quantity) = &self.quantity {
            write!(f, " {}", quantity)?;
            if self.percent {
                write!(f, " PERCENT")?;
            }
        }
        if self.with_ties {
            write!(f, " ROWS WITH TIES")
        } else {
            write!(f, " ROWS ONLY")
        }
    }
}

/// `LIMIT <count>`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Limit {
    /// The limit count.
    pub count: Literal,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.count)
    }
}
