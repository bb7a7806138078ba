//! # sqlcanon-lexer
//!
//! sqlcanon-lexer converts a SQL source string into a sequence of tokens,
//! parameterized over the dialect's identifier/string-literal quoting rules.

#![deny(missing_docs)]
#![deny(unused_imports)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod error;
mod lexer;
mod tokens;

pub use self::{
    error::{LexerError, Location},
    lexer::Lexer,
    tokens::{Comment, Ident, Token, Whitespace},
};
