//! Ordered token storage
//!
//! The lexer appends to a [`TokenSequence`] while it runs; once lexing returns
//! the sequence is frozen and shared read-only by token cursors. Tokens are
//! addressable by absolute index or by `(line, column)` containment.

use super::{Position, Token};
use crate::fscript::error::OutOfRange;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn has_index(&self, index: usize) -> bool {
        index < self.tokens.len()
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Position of a token of `length` characters appended after the last one.
    pub fn next_position(&self, length: usize) -> Position {
        let width = length.max(1) - 1;
        match self.last() {
            None => Position::new(1, 0, width),
            Some(previous) if previous.kind == super::TokenKind::Newline => {
                Position::new(previous.position.line + 1, 0, width)
            }
            Some(previous) => {
                let start = previous.position.end + 1;
                Position::new(previous.position.line, start, start + width)
            }
        }
    }

    /// Index of the first token containing `column` on `line`.
    pub fn index_at(&self, line: usize, column: usize) -> Option<usize> {
        self.tokens
            .iter()
            .position(|token| token.position.contains(line, column))
    }

    pub fn has(&self, line: usize, column: usize) -> bool {
        self.index_at(line, column).is_some()
    }

    pub fn at(&self, line: usize, column: usize) -> Result<&Token, OutOfRange> {
        self.index_at(line, column)
            .map(|index| &self.tokens[index])
            .ok_or_else(|| OutOfRange::new(format!("no token at {}:{}", line, column)))
    }

    pub fn find<P>(&self, predicate: P) -> Result<&Token, OutOfRange>
    where
        P: FnMut(&&Token) -> bool,
    {
        self.tokens
            .iter()
            .find(predicate)
            .ok_or_else(|| OutOfRange::new("no token matches the predicate"))
    }

    pub fn filter<P>(&self, mut predicate: P) -> TokenSequence
    where
        P: FnMut(&Token) -> bool,
    {
        let tokens = self
            .tokens
            .iter()
            .filter(|token| predicate(token))
            .cloned()
            .collect();
        Self { tokens }
    }

    /// A copy of the sequence without the token at `(line, column)`.
    pub fn remove(&self, line: usize, column: usize) -> Result<TokenSequence, OutOfRange> {
        let index = self
            .index_at(line, column)
            .ok_or_else(|| OutOfRange::new(format!("no token to remove at {}:{}", line, column)))?;
        let mut tokens = self.tokens.clone();
        tokens.remove(index);
        Ok(Self { tokens })
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self::from_tokens(tokens)
    }
}
