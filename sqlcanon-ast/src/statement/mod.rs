//! The statement grammar: `SELECT`/`INSERT`/`UPDATE`/`DELETE` and the
//! `CREATE TABLE`/`VIEW`/`INDEX` data-definition forms built from the
//! expression grammar.

mod ddl;
mod dml;

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::{
    ddl::{
        ColumnConstraint, ColumnConstraintDef, ColumnDef, CreateIndexStmt, CreateTableStmt,
        CreateViewStmt, IndexColumn, LikeClause, ReferentialAction, ReferentialMatchType,
        TableConstraint, TableConstraintDef, ViewCheckOption,
    },
    dml::{Assignment, DeleteStmt, InsertStmt, SelectStmt, UpdateStmt},
};

/// A top-level SQL statement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stmt {
    /// `SELECT ...`
    Select(SelectStmt),
    /// `INSERT INTO ...`
    Insert(InsertStmt),
    /// `UPDATE ...`
    Update(UpdateStmt),
    /// `DELETE FROM ...`
    Delete(DeleteStmt),
    /// `CREATE TABLE ...`
    CreateTable(CreateTableStmt),
    /// `CREATE VIEW ...`
    CreateView(CreateViewStmt),
    /// `CREATE INDEX ...`
    CreateIndex(CreateIndexStmt),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(stmt) => write!(f, "{}", stmt),
            Self::Insert(stmt) => write!(f, "{}", stmt),
            Self::Update(stmt) => write!(f, "{}", stmt),
            Self::Delete(stmt) => write!(f, "{}", stmt),
            Self::CreateTable(stmt) => write!(f, "{}", stmt),
            Self::CreateView(stmt) => write!(f, "{}", stmt),
            Self::CreateIndex(stmt) => write!(f, "{}", stmt),
        }
    }
}
