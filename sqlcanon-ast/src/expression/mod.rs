//! The expression grammar: operator precedence, function calls, `CASE`,
//! `CAST`, subqueries and the other primaries of §4.2.

mod function;
mod operator;
mod query;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::{
    function::{Function, FunctionArg, WindowFrame, WindowFrameBound, WindowFrameUnits, WindowSpec},
    operator::{BinaryOperator, UnaryOperator},
    query::*,
};
use self::query::Query;
use crate::{
    types::{DataType, DateTimeField, Ident, Literal, ObjectName},
    utils::{display_comma_separated, display_separated},
};

/// A SQL value expression.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single-part identifier: a column or alias reference.
    Ident(Ident),
    /// A dotted, multi-part identifier: `a.b.c`.
    CompoundIdent(Vec<Ident>),
    /// The bare `*` wildcard, e.g. in `SELECT *` or `COUNT(*)`.
    Wildcard,
    /// `<table>.*`
    QualifiedWildcard(ObjectName),
    /// A literal value.
    Literal(Literal),
    /// A parenthesized expression, kept distinct from its inner expression
    /// so the formatter can choose not to re-parenthesize it.
    Nested(Box<Expr>),
    /// A parenthesized scalar subquery.
    Subquery(Box<Query>),
    /// `expr COLLATE collation`
    Collate {
        /// The expression being collated.
        expr: Box<Expr>,
        /// The collation name.
        collation: ObjectName,
    },
    /// A unary prefix operator applied to an expression.
    UnaryOp {
        /// The operator.
        op: UnaryOperator,
        /// The operand.
        expr: Box<Expr>,
    },
    /// A binary infix operator applied to two expressions.
    BinaryOp {
        /// The left operand.
        left: Box<Expr>,
        /// The operator.
        op: BinaryOperator,
        /// The right operand.
        right: Box<Expr>,
    },
    /// `expr IS NULL`
    IsNull(Box<Expr>),
    /// `expr IS NOT NULL`
    IsNotNull(Box<Expr>),
    /// `expr IS DISTINCT FROM expr`
    IsDistinctFrom {
        /// The left operand.
        left: Box<Expr>,
        /// The right operand.
        right: Box<Expr>,
    },
    /// `expr IS NOT DISTINCT FROM expr`
    IsNotDistinctFrom {
        /// The left operand.
        left: Box<Expr>,
        /// The right operand.
        right: Box<Expr>,
    },
    /// `expr [NOT] IN (expr, ...)`
    InList {
        /// The probed expression.
        expr: Box<Expr>,
        /// The candidate list.
        list: Vec<Expr>,
        /// Whether `NOT` preceded `IN`.
        negated: bool,
    },
    /// `expr [NOT] IN (subquery)`
    InSubquery {
        /// The probed expression.
        expr: Box<Expr>,
        /// The subquery producing the candidate set.
        subquery: Box<Query>,
        /// Whether `NOT` preceded `IN`.
        negated: bool,
    },
    /// `expr [NOT] BETWEEN low AND high`
    Between {
        /// The probed expression.
        expr: Box<Expr>,
        /// Whether `NOT` preceded `BETWEEN`.
        negated: bool,
        /// The lower bound.
        low: Box<Expr>,
        /// The upper bound.
        high: Box<Expr>,
    },
    /// `EXISTS (subquery)`
    Exists(Box<Query>),
    /// `CAST(expr AS type)` or `expr :: type`
    Cast {
        /// The expression being cast.
        expr: Box<Expr>,
        /// The target type.
        data_type: DataType,
    },
    /// `EXTRACT(field FROM expr)`
    Extract {
        /// The date/time field to extract.
        field: DateTimeField,
        /// The source expression.
        expr: Box<Expr>,
    },
    /// `SUBSTRING(expr [FROM from] [FOR len])`
    Substring {
        /// The source expression.
        expr: Box<Expr>,
        /// The starting position, if given.
        from: Option<Box<Expr>>,
        /// The length, if given.
        for_length: Option<Box<Expr>>,
    },
    /// `TRIM([BOTH|LEADING|TRAILING] [chars FROM] expr)`
    Trim {
        /// The source expression.
        expr: Box<Expr>,
        /// Which side(s) to trim; `None` defaults to `BOTH`.
        trim_where: Option<TrimWhereField>,
        /// The characters to trim, if given; defaults to whitespace.
        trim_what: Option<Box<Expr>>,
    },
    /// `CASE [operand] (WHEN cond THEN result)+ [ELSE else_result] END`
    Case {
        /// The simple-case operand, absent for the searched form.
        operand: Option<Box<Expr>>,
        /// The `WHEN` conditions, parallel to `results`.
        conditions: Vec<Expr>,
        /// The `THEN` results, parallel to `conditions`.
        results: Vec<Expr>,
        /// The `ELSE` result, if given.
        else_result: Option<Box<Expr>>,
    },
    /// A function call, including window-function `OVER (...)` forms.
    Function(Function),
    /// A BigQuery `[expr, ...]` array literal.
    Array(Vec<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(ident) => write!(f, "{}", ident),
            Self::CompoundIdent(parts) => write!(f, "{}", display_separated(parts, ".")),
            Self::Wildcard => write!(f, "*"),
            Self::QualifiedWildcard(name) => write!(f, "{}.*", name),
            Self::Literal(literal) => write!(f, "{}", literal),
            Self::Nested(expr) => write!(f, "({})", expr),
            Self::Subquery(query) => write!(f, "({})", query),
            Self::Collate { expr, collation } => write!(f, "{} COLLATE {}", expr, collation),
            Self::UnaryOp { op, expr } => match op {
                UnaryOperator::Not => write!(f, "NOT {}", expr),
                _ => write!(f, "{}{}", op, expr),
            },
            Self::BinaryOp { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Self::IsNull(expr) => write!(f, "{} IS NULL", expr),
            Self::IsNotNull(expr) => write!(f, "{} IS NOT NULL", expr),
            Self::IsDistinctFrom { left, right } => {
                write!(f, "{} IS DISTINCT FROM {}", left, right)
            }
            Self::IsNotDistinctFrom { left, right } => {
                write!(f, "{} IS NOT DISTINCT FROM {}", left, right)
            }
            Self::InList {
                expr,
                list,
                negated,
            } => {
                write!(f, "{} ", expr)?;
                if *negated {
                    write!(f, "NOT ")?;
                }
                write!(f, "IN ({})", display_comma_separated(list))
            }
            Self::InSubquery {
                expr,
                subquery,
                negated,
            } => {
                write!(f, "{} ", expr)?;
                if *negated {
                    write!(f, "NOT ")?;
                }
                write!(f, "IN ({})", subquery)
            }
            Self::Between {
                expr,
                negated,
                low,
                high,
            } => {
                write!(f, "{} ", expr)?;
                if *negated {
                    write!(f, "NOT ")?;
                }
                write!(f, "BETWEEN {} AND {}", low, high)
            }
            Self::Exists(query) => write!(f, "EXISTS ({})", query),
            Self::Cast { expr, data_type } => write!(f, "CAST({} AS {})", expr, data_type),
            Self::Extract { field, expr } => write!(f, "EXTRACT({} FROM {})", field, expr),
            Self::Substring {
                expr,
                from,
                for_length,
            } => {
                write!(f, "SUBSTRING({}", expr)?;
                if let Some(from) = from {
                    write!(f, " FROM {}", from)?;
                }
                if let Some(for_length) = for_length {
                    write!(f, " FOR {}", for_length)?;
                }
                write!(f, ")")
            }
            Self::Trim {
                expr,
                trim_where,
                trim_what,
            } => {
                write!(f, "TRIM(")?;
                if let Some(trim_where) = trim_where {
                    write!(f, "{} ", trim_where)?;
                }
                if let Some(trim_what) = trim_what {
                    write!(f, "{} FROM ", trim_what)?;
                }
                write!(f, "{})", expr)
            }
            Self::Case {
                operand,
                conditions,
                results,
                else_result,
            } => {
                write!(f, "CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {}", operand)?;
                }
                for (condition, result) in conditions.iter().zip(results) {
                    write!(f, " WHEN {} THEN {}", condition, result)?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {}", else_result)?;
                }
                write!(f, " END")
            }
            Self::Function(function) => write!(f, "{}", function),
            Self::Array(items) => write!(f, "[{}]", display_comma_separated(items)),
        }
    }
}

/// Which side(s) of a string `TRIM` removes characters from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrimWhereField {
    /// `BOTH`
    Both,
    /// `LEADING`
    Leading,
    /// `TRAILING`
    Trailing,
}

impl fmt::Display for TrimWhereField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Both => "BOTH",
            Self::Leading => "LEADING",
            Self::Trailing => "TRAILING",
        })
    }
}
