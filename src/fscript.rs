//! Main module for the fscript front end
//!
//! - [`token`] and [`lexing`]: source text to a frozen token sequence
//! - [`cursor`]: stateful navigation over that sequence
//! - [`ast`]: nodes, path segments and the path-addressed explorer
//! - [`parsing`]: pluggable grammar rules and the recursive AST builder
//! - [`pipeline`]: everything above wired with the default grammar

pub mod ast;
pub mod config;
pub mod cursor;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod token;

pub use error::{Error, Result};
