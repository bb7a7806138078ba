#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    expression::query::Query,
    types::{DataType, Ident, ObjectName},
    utils::{display_comma_separated, display_constraint_name},
    Expr,
};

/// `CREATE [TEMPORARY] TABLE [IF NOT EXISTS] name (...)`, or a `LIKE`/`AS
/// query` form.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateTableStmt {
    /// Whether `TEMPORARY`/`TEMP` was specified.
    pub temporary: bool,
    /// Whether `IF NOT EXISTS` was specified.
    pub if_not_exists: bool,
    /// The new table's name.
    pub name: ObjectName,
    /// The column definitions; empty when `like` or `query` supplies the shape.
    pub columns: Vec<ColumnDef>,
    /// Table-level constraints.
    pub constraints: Vec<TableConstraintDef>,
    /// `LIKE other_table`, copying its column definitions.
    pub like: Option<LikeClause>,
    /// `AS query`, populating the table from a query.
    pub query: Option<Box<Query>>,
}

impl fmt::Display for CreateTableStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE ")?;
        if self.temporary {
            write!(f, "TEMPORARY ")?;
        }
        write!(f, "TABLE ")?;
        if self.if_not_exists {
            write!(f, "IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;

        if let Some(like) = &self.like {
            return write!(f, " {}", like);
        }

        if !self.columns.is_empty() || !self.constraints.is_empty() {
            write!(f, " (")?;
            write!(f, "{}", display_comma_separated(&self.columns))?;
            if !self.columns.is_empty() && !self.constraints.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "{}", display_comma_separated(&self.constraints))?;
            write!(f, ")")?;
        }

        if let Some(query) = &self.query {
            write!(f, " AS {}", query)?;
        }
        Ok(())
    }
}

/// `LIKE other_table`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LikeClause {
    /// The table whose column definitions are copied.
    pub table: ObjectName,
}

impl fmt::Display for LikeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIKE {}", self.table)
    }
}

/// One column definition of a `CREATE TABLE`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnDef {
    /// The column name.
    pub name: Ident,
    /// The column's declared type.
    pub data_type: DataType,
    /// Column-level constraints, in source order.
    pub constraints: Vec<ColumnConstraintDef>,
    /// `DEFAULT expr`, if given.
    pub default: Option<Expr>,
    /// `COLLATE name`, if given.
    pub collation: Option<ObjectName>,
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if let Some(collation) = &self.collation {
            write!(f, " COLLATE {}", collation)?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {}", default)?;
        }
        for constraint in &self.constraints {
            write!(f, " {}", constraint)?;
        }
        Ok(())
    }
}

/// A named or anonymous column constraint.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnConstraintDef {
    /// The `CONSTRAINT <name>` label, if given.
    pub name: Option<Ident>,
    /// The constraint itself.
    pub constraint: ColumnConstraint,
}

impl fmt::Display for ColumnConstraintDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", display_constraint_name(&self.name), self.constraint)
    }
}

/// A single-column constraint attached inline to a `ColumnDef`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColumnConstraint {
    /// `NULL`
    Null,
    /// `NOT NULL`
    NotNull,
    /// `UNIQUE` or, when `is_primary`, `PRIMARY KEY`.
    Unique {
        /// Whether this is `PRIMARY KEY` rather than plain `UNIQUE`.
        is_primary: bool,
    },
    /// `REFERENCES table (columns) [MATCH ...] [ON DELETE ...] [ON UPDATE ...]`
    References {
        /// The referenced table.
        table: ObjectName,
        /// The referenced columns; empty means "the referenced table's
        /// primary key".
        referred_columns: Vec<Ident>,
        /// The `MATCH` clause, if given.
        match_type: Option<ReferentialMatchType>,
        /// The `ON DELETE` action, if given.
        on_delete: Option<ReferentialAction>,
        /// The `ON UPDATE` action, if given.
        on_update: Option<ReferentialAction>,
    },
    /// `CHECK (expr)`
    Check(Box<Expr>),
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::NotNull => write!(f, "NOT NULL"),
            Self::Unique { is_primary } => {
                write!(f, "{}", if *is_primary { "PRIMARY KEY" } else { "UNIQUE" })
            }
            Self::References {
                table,
                referred_columns,
                match_type,
                on_delete,
                on_update,
            } => {
                write!(f, "REFERENCES {}", table)?;
                if !referred_columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(referred_columns))?;
                }
                if let Some(match_type) = match_type {
                    write!(f, " MATCH {}", match_type)?;
                }
                if let Some(on_delete) = on_delete {
                    write!(f, " ON DELETE {}", on_delete)?;
                }
                if let Some(on_update) = on_update {
                    write!(f, " ON UPDATE {}", on_update)?;
                }
                Ok(())
            }
            Self::Check(expr) => write!(f, "CHECK ({})", expr),
        }
    }
}

/// A named or anonymous table-level constraint.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableConstraintDef {
    /// The `CONSTRAINT <name>` label, if given.
    pub name: Option<Ident>,
    /// The constraint itself.
    pub constraint: TableConstraint,
}

impl fmt::Display for TableConstraintDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", display_constraint_name(&self.name), self.constraint)
    }
}

/// A multi-column constraint attached to the table as a whole.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TableConstraint {
    /// `UNIQUE (columns)` or, when `is_primary`, `PRIMARY KEY (columns)`.
    Unique {
        /// The constrained columns.
        columns: Vec<Ident>,
        /// Whether this is `PRIMARY KEY` rather than plain `UNIQUE`.
        is_primary: bool,
    },
    /// `FOREIGN KEY (columns) REFERENCES table (referred_columns)`
    ForeignKey {
        /// The local columns.
        columns: Vec<Ident>,
        /// The referenced table.
        foreign_table: ObjectName,
        /// The referenced columns.
        referred_columns: Vec<Ident>,
    },
    /// `CHECK (expr)`
    Check(Box<Expr>),
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique { columns, is_primary } => write!(
                f,
                "{} ({})",
                if *is_primary { "PRIMARY KEY" } else { "UNIQUE" },
                display_comma_separated(columns)
            ),
            Self::ForeignKey {
                columns,
                foreign_table,
                referred_columns,
            } => write!(
                f,
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                display_comma_separated(columns),
                foreign_table,
                display_comma_separated(referred_columns)
            ),
            Self::Check(expr) => write!(f, "CHECK ({})", expr),
        }
    }
}

/// The `MATCH` clause of a `REFERENCES` constraint.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferentialMatchType {
    /// `MATCH FULL`
    Full,
    /// `MATCH PARTIAL`
    Partial,
    /// `MATCH SIMPLE`
    Simple,
}

impl fmt::Display for ReferentialMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::Simple => "SIMPLE",
        })
    }
}

/// The action following `ON DELETE`/`ON UPDATE` in a `REFERENCES` constraint.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferentialAction {
    /// `RESTRICT`
    Restrict,
    /// `CASCADE`
    Cascade,
    /// `SET NULL`
    SetNull,
    /// `NO ACTION`
    NoAction,
    /// `SET DEFAULT`
    SetDefault,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        })
    }
}

/// `CREATE [OR REPLACE] [RECURSIVE] VIEW name [(columns)] AS query [WITH
/// [CASCADED|LOCAL] CHECK OPTION]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateViewStmt {
    /// Whether `OR REPLACE` was specified.
    pub or_replace: bool,
    /// Whether `RECURSIVE` was specified.
    pub recursive: bool,
    /// The new view's name.
    pub name: ObjectName,
    /// An explicit column-name list, if given.
    pub columns: Vec<Ident>,
    /// The view's defining query.
    pub query: Box<Query>,
    /// The `WITH ... CHECK OPTION` clause, if given.
    pub check_option: Option<ViewCheckOption>,
}

impl fmt::Display for CreateViewStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE ")?;
        if self.or_replace {
            write!(f, "OR REPLACE ")?;
        }
        if self.recursive {
            write!(f, "RECURSIVE ")?;
        }
        write!(f, "VIEW {}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.columns))?;
        }
        write!(f, " AS {}", self.query)?;
        if let Some(check_option) = &self.check_option {
            write!(f, " WITH {} CHECK OPTION", check_option)?;
        }
        Ok(())
    }
}

/// The strictness of a view's `WITH CHECK OPTION` clause.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViewCheckOption {
    /// `CASCADED` (the default when `WITH CHECK OPTION` has no qualifier).
    Cascaded,
    /// `LOCAL`
    Local,
}

impl fmt::Display for ViewCheckOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cascaded => "CASCADED",
            Self::Local => "LOCAL",
        })
    }
}

/// `CREATE [UNIQUE] INDEX [IF NOT EXISTS] name ON table (columns)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateIndexStmt {
    /// Whether `UNIQUE` was specified.
    pub unique: bool,
    /// Whether `IF NOT EXISTS` was specified.
    pub if_not_exists: bool,
    /// The new index's name, absent for dialects that allow an anonymous index.
    pub index: Option<ObjectName>,
    /// The indexed table.
    pub table: ObjectName,
    /// The indexed columns, with optional per-column ordering.
    pub columns: Vec<IndexColumn>,
}

impl fmt::Display for CreateIndexStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE ")?;
        if self.unique {
            write!(f, "UNIQUE ")?;
        }
        write!(f, "INDEX ")?;
        if self.if_not_exists {
            write!(f, "IF NOT EXISTS ")?;
        }
        if let Some(index) = &self.index {
            write!(f, "{} ", index)?;
        }
        write!(
            f,
            "ON {} ({})",
            self.table,
            display_comma_separated(&self.columns)
        )
    }
}

/// One column of a `CREATE INDEX` column list.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexColumn {
    /// The indexed column.
    pub column: Ident,
    /// `Some(true)` for `ASC`, `Some(false)` for `DESC`, `None` for the default.
    pub asc: Option<bool>,
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        match self.asc {
            Some(true) => write!(f, " ASC"),
            Some(false) => write!(f, " DESC"),
            None => Ok(()),
        }
    }
}
