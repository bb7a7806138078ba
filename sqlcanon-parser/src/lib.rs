//! # sqlcanon-parser
//!
//! sqlcanon-parser turns a token stream into the raw `sqlcanon-ast` tree: a
//! Pratt-style operator precedence parser for expressions, and a
//! recursive-descent parser for statements, both generic over the dialect.

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod error;
mod parser;
mod peek;

pub use self::{
    error::{Location, ParserError},
    parser::Parser,
    peek::{multipeek, MultiPeek, PeekIteratorExt},
};
