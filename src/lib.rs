//! # fscript
//!
//! Front end of the fscript language: a lexer driven by pluggable recognizers,
//! a stateful token cursor, an AST builder driven by pluggable grammar rules and
//! a path-addressed AST explorer.
//!
//! ## Testing
//!
//! Unit tests live next to each module. Integration tests under `tests/` cover
//! the lexer samples, cursor navigation, the explorer over YAML fixtures and the
//! literal grammar, plus property tests for the invariants that hold for any
//! input.

pub mod fscript;

pub use fscript::pipeline::parse_source;
