use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary prefix operator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOperator {
    /// Unary `+`, a no-op kept for round-tripping the source text.
    Plus,
    /// Unary `-` (`neg`).
    Minus,
    /// Bitwise/logical `NOT` (`not`).
    Not,
    /// Unary `~` (`binary_not`).
    BitwiseNot,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
            Self::BitwiseNot => "~",
        })
    }
}

/// A binary infix operator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    /// `||` (`concat`)
    StringConcat,
    /// `*` (`mul`)
    Multiply,
    /// `/` (`div`)
    Divide,
    /// `%` (`mod`)
    Modulo,
    /// `+` (`add`)
    Plus,
    /// `-` (`sub`)
    Minus,
    /// `&` (`binary_and`)
    BitwiseAnd,
    /// `|` (`binary_or`)
    BitwiseOr,
    /// `>=` (`gte`)
    GreaterThanOrEqual,
    /// `<=` (`lte`)
    LessThanOrEqual,
    /// `<` (`lt`)
    LessThan,
    /// `>` (`gt`)
    GreaterThan,
    /// `=` or `==` (`eq`)
    Equal,
    /// `!=` or `<>` (`neq`)
    NotEqual,
    /// `AND` (`and`)
    And,
    /// `OR` (`or`)
    Or,
    /// `LIKE` (`like`)
    Like,
    /// `NOT LIKE` (`not_like`)
    NotLike,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StringConcat => "||",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        })
    }
}
