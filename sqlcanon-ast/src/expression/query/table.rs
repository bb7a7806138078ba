#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Query;
use crate::{
    expression::function::WindowSpec,
    types::{Ident, ObjectName},
    utils::display_comma_separated,
    Expr,
};

/// The `FROM` clause: a comma-separated list of table references.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct From {
    /// The comma-separated `FROM` items.
    pub list: Vec<TableReference>,
}

impl fmt::Display for From {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_comma_separated(&self.list))
    }
}

/// A single `FROM` item together with the joins chained onto it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableReference {
    /// The base table, subquery, or nested join.
    pub relation: TableFactor,
    /// Joins chained onto `relation`, in source order.
    pub joins: Vec<Join>,
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relation)?;
        for join in &self.joins {
            write!(f, " {}", join)?;
        }
        Ok(())
    }
}

/// A base relation appearing in `FROM` or after a join keyword.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TableFactor {
    /// A named table, with an optional alias.
    Table {
        /// The (possibly qualified) table name.
        name: ObjectName,
        /// The optional alias.
        alias: Option<TableAlias>,
    },
    /// A derived table: `[LATERAL] (subquery) [AS alias]`.
    Derived {
        /// Whether `LATERAL` preceded the subquery.
        lateral: bool,
        /// The subquery.
        subquery: Box<Query>,
        /// The optional alias.
        alias: Option<TableAlias>,
    },
    /// A parenthesized join, used to control join associativity.
    NestedJoin(Box<TableReference>),
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias } => {
                write!(f, "{}", name)?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", alias)?;
                }
                Ok(())
            }
            Self::Derived {
                lateral,
                subquery,
                alias,
            } => {
                if *lateral {
                    write!(f, "LATERAL ")?;
                }
                write!(f, "({})", subquery)?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", alias)?;
                }
                Ok(())
            }
            Self::NestedJoin(table_reference) => write!(f, "({})", table_reference),
        }
    }
}

/// `<name> [(<columns>)]`, the alias bound to a `FROM` item.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableAlias {
    /// The alias name.
    pub name: Ident,
    /// An optional explicit column-name list.
    pub columns: Vec<Ident>,
}

impl fmt::Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        Ok(())
    }
}

/// One join chained onto a `FROM` item.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Join {
    /// The join kind, e.g. `INNER JOIN`, `LEFT OUTER JOIN`, `CROSS JOIN`.
    pub join: JoinOperator,
    /// The right-hand side being joined in.
    pub relation: TableFactor,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.join {
            JoinOperator::Cross => write!(f, "CROSS JOIN {}", self.relation),
            JoinOperator::Inner(spec) => write!(f, "JOIN {} {}", self.relation, spec),
            JoinOperator::LeftOuter(spec) => write!(f, "LEFT JOIN {} {}", self.relation, spec),
            JoinOperator::RightOuter(spec) => write!(f, "RIGHT JOIN {} {}", self.relation, spec),
            JoinOperator::FullOuter(spec) => write!(f, "FULL JOIN {} {}", self.relation, spec),
        }
    }
}

/// The join kind. The nine dialect-visible join spellings (`join`, `cross
/// join`, `inner join`, `left [outer] join`, `right [outer] join`, `full
/// [outer] join`) reduce to these five shapes, since `JOIN`/`INNER JOIN`
/// and `LEFT JOIN`/`LEFT OUTER JOIN` are parse-level synonyms.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinOperator {
    /// `CROSS JOIN`, no join condition.
    Cross,
    /// `[INNER] JOIN ... ON/USING ...`
    Inner(JoinSpec),
    /// `LEFT [OUTER] JOIN ... ON/USING ...`
    LeftOuter(JoinSpec),
    /// `RIGHT [OUTER] JOIN ... ON/USING ...`
    RightOuter(JoinSpec),
    /// `FULL [OUTER] JOIN ... ON/USING ...`
    FullOuter(JoinSpec),
}

/// The `ON`/`USING` condition of a non-cross join.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinSpec {
    /// `ON <expr>`
    On(Box<Expr>),
    /// `USING (<columns>)`
    Using(Vec<Ident>),
}

impl fmt::Display for JoinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On(expr) => write!(f, "ON {}", expr),
            Self::Using(columns) => write!(f, "USING ({})", display_comma_separated(columns)),
        }
    }
}

/// `WHERE <expr>`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Where {
    /// The filter expression.
    pub expr: Expr,
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHERE {}", self.expr)
    }
}

/// `GROUP BY <grouping_element> [, ...]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupBy {
    /// The grouping elements, in source order.
    pub list: Vec<GroupingElement>,
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GROUP BY {}", display_comma_separated(&self.list))
    }
}

/// One element of a `GROUP BY` list.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupingElement {
    /// A plain grouping expression.
    Expr(Expr),
    /// `ROLLUP (<expr>, ...)`
    Rollup(Vec<Expr>),
    /// `CUBE (<expr>, ...)`
    Cube(Vec<Expr>),
}

impl fmt::Display for GroupingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{}", expr),
            Self::Rollup(exprs) => write!(f, "ROLLUP ({})", display_comma_separated(exprs)),
            Self::Cube(exprs) => write!(f, "CUBE ({})", display_comma_separated(exprs)),
        }
    }
}

/// `HAVING <expr>`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Having {
    /// The filter expression, evaluated after grouping.
    pub expr: Expr,
}

impl fmt::Display for Having {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HAVING {}", self.expr)
    }
}

/// `WINDOW <name> AS (...) [, ...]`, named window definitions referenced by
/// `OVER <name>` in the projection.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Window {
    /// The named window definitions, in source order.
    pub list: Vec<WindowDef>,
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WINDOW {}", display_comma_separated(&self.list))
    }
}

/// `<name> AS (<window spec>)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowDef {
    /// The window's name.
    pub name: Ident,
    /// The window's body.
    pub window_spec: WindowSpec,
}

impl fmt::Display for WindowDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.name, self.window_spec)
    }
}
