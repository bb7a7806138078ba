//! # sqlcanon-ast
//!
//! sqlcanon-ast holds the raw, pre-scrub AST types produced by the
//! sqlcanon parser: expressions, statements, and the primitive types
//! (identifiers, literals, data types) they're built from.

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// The expression grammar: operators, function calls, `CASE`/`CAST`,
/// subqueries, and the query/table grammar they embed.
pub mod expression;
/// The statement grammar: DML and DDL statements.
pub mod statement;
/// The primitive types expressions and statements are built from:
/// identifiers, literals, data types.
pub mod types;
mod utils;

pub use self::{expression::*, statement::*, types::*};
