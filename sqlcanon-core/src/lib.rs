//! # sqlcanon-core
//!
//! sqlcanon-core holds the dialect and keyword traits shared by the lexer,
//! parser, scrubber and formatter: the `Dialect` marker type per supported
//! SQL dialect, its lexer/parser configuration, and its reserved-word table.

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod macros;

mod dialect;

/// The common (ANSI-ish) dialect: `"x"` and `` `x` `` are identifiers,
/// `[x]` is an error.
#[cfg(feature = "common")]
pub mod common;
/// The MySQL dialect: `"x"` is a string literal, `` `x` `` is an identifier,
/// `[x]` is an error.
#[cfg(feature = "mysql")]
pub mod mysql;
/// The SQL Server dialect: `"x"` and `[x]` and `` `x` `` are all identifiers.
#[cfg(feature = "sqlserver")]
pub mod sqlserver;
/// The BigQuery dialect: `"x"` is a string literal, `[x]` is an array
/// literal, `` `x` `` is an identifier.
#[cfg(feature = "bigquery")]
pub mod bigquery;

pub use self::dialect::{CustomDialect, Dialect, DialectLexerConf, DialectParserConf, KeywordDef};
