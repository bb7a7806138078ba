#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    expression::query::Query,
    types::{Ident, ObjectName},
    utils::display_comma_separated,
    Expr,
};

/// `SELECT ...`, a thin wrapper binding a query to the statement grammar.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectStmt(pub Box<Query>);

impl fmt::Display for SelectStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `INSERT INTO table [(columns)] {VALUES ... | query}`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsertStmt {
    /// The target table.
    pub table: ObjectName,
    /// The explicit column list, if given.
    pub columns: Vec<Ident>,
    /// The source of the inserted rows: a `VALUES` list or any other query.
    pub source: Option<Box<Query>>,
}

impl fmt::Display for InsertStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {} ", self.table)?;
        if !self.columns.is_empty() {
            write!(f, "({}) ", display_comma_separated(&self.columns))?;
        }
        if let Some(source) = &self.source {
            write!(f, "{}", source)
        } else {
            write!(f, "DEFAULT VALUES")
        }
    }
}

/// `UPDATE table SET col = expr [, ...] [WHERE expr]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateStmt {
    /// The target table.
    pub table: ObjectName,
    /// The `SET` assignments.
    pub assignments: Vec<Assignment>,
    /// The optional `WHERE` filter.
    pub selection: Option<Expr>,
}

impl fmt::Display for UpdateStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UPDATE {} SET {}",
            self.table,
            display_comma_separated(&self.assignments)
        )?;
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        Ok(())
    }
}

/// One `col = expr` assignment of an `UPDATE`'s `SET` clause.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    /// The assigned column.
    pub target: Ident,
    /// The assigned value.
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

/// `DELETE FROM table [WHERE expr]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeleteStmt {
    /// The target table.
    pub table: ObjectName,
    /// The optional `WHERE` filter.
    pub selection: Option<Expr>,
}

impl fmt::Display for DeleteStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        Ok(())
    }
}
