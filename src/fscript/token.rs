//! Core token types
//!
//! A [`Token`] is the smallest lexical unit produced by the lexer: a closed
//! [`TokenKind`], a [`TokenValue`] (numeric for INDENT, text otherwise), the raw
//! text it was built from and its [`Position`].
//!
//! ## Positions
//!
//! Lines are 1-based, columns are 0-based and `end` is inclusive. Within one
//! lexing pass two tokens adjacent on the same line satisfy
//! `next.start == prev.end + 1`; a NEWLINE token moves the next token to column
//! 0 of the following line. [`TokenSequence::next_position`] is the single place
//! where this is computed.

pub mod sequence;

pub use sequence::TokenSequence;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Keyword,
    Indent,
    Space,
    Operator,
    Identifier,
    Separator,
    Literal,
    Newline,
    GroupStart,
    GroupEnd,
    BlockStart,
    BlockEnd,
    ArrayStart,
    ArrayEnd,
}

impl TokenKind {
    /// Kinds that carry no meaning for grammar rules.
    pub const BLANK: [TokenKind; 3] = [TokenKind::Space, TokenKind::Indent, TokenKind::Newline];

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Indent => "INDENT",
            TokenKind::Space => "SPACE",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Literal => "LITERAL",
            TokenKind::Newline => "NEWLINE",
            TokenKind::GroupStart => "GROUP_START",
            TokenKind::GroupEnd => "GROUP_END",
            TokenKind::BlockStart => "BLOCK_START",
            TokenKind::BlockEnd => "BLOCK_END",
            TokenKind::ArrayStart => "ARRAY_START",
            TokenKind::ArrayEnd => "ARRAY_END",
        }
    }

    pub fn is_blank(self) -> bool {
        Self::BLANK.contains(&self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token payload: INDENT tokens carry the unit width, everything else its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(f64),
    Text(String),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            TokenValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenValue::Number(number) => Some(*number),
            TokenValue::Text(_) => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Number(number) => write!(f, "{}", number),
            TokenValue::Text(text) => f.write_str(text),
        }
    }
}

/// Line (1-based) and inclusive column span (0-based) of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl Position {
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    /// Whether `column` falls inside `[start, end]` on `line`.
    pub fn contains(&self, line: usize, column: usize) -> bool {
        self.line == line && self.start <= column && column <= self.end
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.start)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub raw: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, raw: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            value,
            raw: raw.into(),
            position,
        }
    }

    /// A token whose value is its own raw text.
    pub fn text(kind: TokenKind, raw: impl Into<String>, position: Position) -> Self {
        let raw = raw.into();
        Self::new(kind, TokenValue::Text(raw.clone()), raw, position)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) at {}", self.kind, self.raw, self.position)
    }
}
