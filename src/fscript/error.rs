//! Error types for the fscript front end
//!
//! Every stage reports through its own error type so that callers can match on
//! exactly what went wrong:
//!
//! - [`LexError`] - no recognizer supports the remaining input
//! - [`SyntaxError`] - a grammar rule that already claimed the input failed
//! - [`OutOfRange`] - token cursor or AST explorer navigation has no target
//! - [`RegistrationError`] - duplicate or unknown recognizer/builder names
//!
//! [`Error`] wraps all of them (plus configuration and I/O failures) for the
//! pipeline and the binary. "No rule supports the input" is *not* an error:
//! the AST builder simply closes the current scope.

use crate::fscript::token::Position;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Raised when no recognizer supports the remaining input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "LexError at line {}, column {}: unexpected input {:?}",
    .position.line,
    .position.start,
    .text
)]
pub struct LexError {
    /// The offending text, up to the end of its line.
    pub text: String,
    pub position: Position,
}

impl LexError {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// Raised when a committed grammar rule cannot complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "SyntaxError at line {}, column {}{}",
    .position.line,
    .position.start,
    explained(.explanation)
)]
pub struct SyntaxError {
    pub position: Position,
    pub explanation: Option<String>,
}

impl SyntaxError {
    pub fn new(position: Position, explanation: impl Into<String>) -> Self {
        Self {
            position,
            explanation: Some(explanation.into()),
        }
    }

    pub fn at(position: Position) -> Self {
        Self {
            position,
            explanation: None,
        }
    }
}

fn explained(explanation: &Option<String>) -> String {
    match explanation {
        Some(text) => format!(": {}", text),
        None => String::new(),
    }
}

/// Navigation on a token cursor or AST explorer has no target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("OutOfRange: {message}")]
pub struct OutOfRange {
    pub message: String,
}

impl OutOfRange {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Misuse of the recognizer or node builder registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("a {registry} named {name:?} is already registered")]
    Duplicate { registry: &'static str, name: String },
    #[error("no {registry} named {name:?} is registered")]
    Unknown { registry: &'static str, name: String },
}

/// Umbrella error for the pipeline, the configuration loader and the binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Source position of the failure, when the error carries one.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex(err) => Some(err.position),
            Error::Syntax(err) => Some(err.position),
            _ => None,
        }
    }
}

/// Format source code context around an error line (1-based)
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// All lines are numbered for easy reference.
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for (offset, text) in lines[start_line.min(end_line)..end_line].iter().enumerate() {
        let line_num = start_line + offset;
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, text));
    }

    context
}
