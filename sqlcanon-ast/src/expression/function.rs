#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    expression::query::{OrderBy, SortSpec},
    types::ObjectName,
    utils::display_comma_separated,
    Expr,
};

/// A function call, e.g. `COUNT(DISTINCT a, b)` or `row_number() OVER (...)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    /// The (possibly qualified) function name.
    pub name: ObjectName,
    /// Whether `DISTINCT` appeared before the argument list.
    pub distinct: bool,
    /// The argument list; empty for `NOW()`.
    pub args: Vec<FunctionArg>,
    /// The `OVER (...)` window specification, if this is a window function call.
    pub over: Option<WindowSpec>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        write!(f, "{})", display_comma_separated(&self.args))?;
        if let Some(over) = &self.over {
            write!(f, " OVER ({})", over)?;
        }
        Ok(())
    }
}

/// A single function-call argument.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionArg {
    /// `name => expr`
    Named {
        /// The argument name.
        name: crate::types::Ident,
        /// The argument value.
        arg: Expr,
    },
    /// A positional argument.
    Unnamed(Expr),
}

impl fmt::Display for FunctionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, arg } => write!(f, "{} => {}", name, arg),
            Self::Unnamed(expr) => write!(f, "{}", expr),
        }
    }
}

/// `PARTITION BY ... ORDER BY ... <window frame>`, the body of `OVER (...)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowSpec {
    /// `PARTITION BY` expressions.
    pub partition_by: Vec<Expr>,
    /// `ORDER BY` items.
    pub order_by: Vec<SortSpec>,
    /// The optional frame clause (`ROWS`/`RANGE`/`GROUPS` between bounds).
    pub window_frame: Option<WindowFrame>,
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut delim = "";
        if !self.partition_by.is_empty() {
            delim = " ";
            write!(
                f,
                "PARTITION BY {}",
                display_comma_separated(&self.partition_by)
            )?;
        }
        if !self.order_by.is_empty() {
            f.write_str(delim)?;
            delim = " ";
            write!(f, "{}", OrderBy { list: self.order_by.clone() })?;
        }
        if let Some(window_frame) = &self.window_frame {
            f.write_str(delim)?;
            if let Some(end_bound) = &window_frame.end_bound {
                write!(
                    f,
                    "{} BETWEEN {} AND {}",
                    window_frame.units, window_frame.start_bound, end_bound
                )?;
            } else {
                write!(f, "{} {}", window_frame.units, window_frame.start_bound)?;
            }
        }
        Ok(())
    }
}

/// The frame clause of a window specification.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowFrame {
    /// `ROWS`, `RANGE` or `GROUPS`.
    pub units: WindowFrameUnits,
    /// The lower frame bound.
    pub start_bound: WindowFrameBound,
    /// The upper frame bound, when a `BETWEEN ... AND ...` form is used.
    pub end_bound: Option<WindowFrameBound>,
}

impl Default for WindowFrame {
    fn default() -> Self {
        Self {
            units: WindowFrameUnits::Range,
            start_bound: WindowFrameBound::Preceding(None),
            end_bound: None,
        }
    }
}

/// The unit a window frame is measured in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowFrameUnits {
    /// `ROWS`
    Rows,
    /// `RANGE`
    Range,
    /// `GROUPS`
    Groups,
}

impl fmt::Display for WindowFrameUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        })
    }
}

/// One endpoint of a window frame.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowFrameBound {
    /// `CURRENT ROW`
    CurrentRow,
    /// `UNBOUNDED PRECEDING` (`None`) or `<n> PRECEDING`
    Preceding(Option<u64>),
    /// `UNBOUNDED FOLLOWING` (`None`) or `<n> FOLLOWING`
    Following(Option<u64>),
}

impl fmt::Display for WindowFrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Preceding(None) => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(Some(n)) => write!(f, "{} PRECEDING", n),
            Self::Following(None) => f.write_str("UNBOUNDED FOLLOWING"),
            Self::Following(Some(n)) => write!(f, "{} FOLLOWING", n),
        }
    }
}
