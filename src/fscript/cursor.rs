//! Token cursor: a stateful navigator over a frozen [`TokenSequence`]
//!
//! A [`TokenCursor`] holds an index into a shared sequence plus the indentation
//! depth of the current line. Grammar rules look ahead with
//! [`is_next`](TokenCursor::is_next) / [`peek`](TokenCursor::peek), move with
//! [`next`](TokenCursor::next) / [`previous`](TokenCursor::previous) /
//! [`advance`](TokenCursor::advance), and backtrack through named checkpoints
//! ([`save`](TokenCursor::save), [`load`](TokenCursor::load),
//! [`reset`](TokenCursor::reset)).
//!
//! ## Indentation depth
//!
//! Landing on INDENT going forward increments the depth, going backward
//! decrements it, and landing on NEWLINE in either direction resets it to 0.
//!
//! ## Consumption
//!
//! Rules leave the cursor on the last token they consumed. A fresh cursor sits
//! on token 0 without having consumed it; the cursor is *pending* until its
//! first move, so [`peek`](TokenCursor::peek) and
//! [`advance`](TokenCursor::advance) start at the current token rather than
//! after it.

use crate::fscript::error::OutOfRange;
use crate::fscript::token::{Position, Token, TokenKind, TokenSequence};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Checkpoint {
    index: usize,
    indent_depth: usize,
    pending: bool,
}

#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Rc<TokenSequence>,
    index: usize,
    indent_depth: usize,
    pending: bool,
    history: Vec<(String, Checkpoint)>,
}

impl TokenCursor {
    pub fn new(tokens: impl Into<Rc<TokenSequence>>) -> Self {
        Self {
            tokens: tokens.into(),
            index: 0,
            indent_depth: 0,
            pending: true,
            history: Vec::new(),
        }
    }

    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn indent_depth(&self) -> usize {
        self.indent_depth
    }

    /// Whether the current token is still waiting to be consumed.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn current(&self) -> Result<&Token, OutOfRange> {
        self.tokens
            .get(self.index)
            .ok_or_else(|| OutOfRange::new("the token sequence is empty"))
    }

    /// Position of the current token, or the start of input when there is none.
    pub fn position(&self) -> Position {
        self.current().map(|t| t.position).unwrap_or_default()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.current().map(|t| t.kind == kind).unwrap_or(false)
    }

    fn ahead(&self) -> &[Token] {
        self.tokens.as_slice().get(self.index + 1..).unwrap_or(&[])
    }

    fn behind(&self) -> &[Token] {
        let slice = self.tokens.as_slice();
        &slice[..self.index.min(slice.len())]
    }

    /// Whether a token exists ahead: the immediate neighbour when `filter` is
    /// empty, otherwise the nearest one whose kind is in `filter`.
    pub fn has_next(&self, filter: &[TokenKind]) -> bool {
        let mut ahead = self.ahead().iter();
        if filter.is_empty() {
            ahead.next().is_some()
        } else {
            ahead.any(|t| filter.contains(&t.kind))
        }
    }

    pub fn has_previous(&self, filter: &[TokenKind]) -> bool {
        let mut behind = self.behind().iter().rev();
        if filter.is_empty() {
            behind.next().is_some()
        } else {
            behind.any(|t| filter.contains(&t.kind))
        }
    }

    /// Whether the first following token not in `excluded` has kind `target`.
    pub fn is_next(&self, target: TokenKind, excluded: &[TokenKind]) -> bool {
        self.ahead()
            .iter()
            .find(|t| !excluded.contains(&t.kind))
            .map_or(false, |t| t.kind == target)
    }

    pub fn is_previous(&self, target: TokenKind, excluded: &[TokenKind]) -> bool {
        self.behind()
            .iter()
            .rev()
            .find(|t| !excluded.contains(&t.kind))
            .map_or(false, |t| t.kind == target)
    }

    /// Move forward until landing on a token whose kind is in `filter`
    /// (exactly one step when `filter` is empty).
    pub fn next(&mut self, filter: &[TokenKind]) -> Result<&Token, OutOfRange> {
        if !self.has_next(filter) {
            return Err(OutOfRange::new(format!(
                "no next {} after {}",
                describe(filter),
                self.position()
            )));
        }
        loop {
            self.step_forward();
            if filter.is_empty() || filter.contains(&self.tokens.as_slice()[self.index].kind) {
                break;
            }
        }
        self.current()
    }

    pub fn previous(&mut self, filter: &[TokenKind]) -> Result<&Token, OutOfRange> {
        if !self.has_previous(filter) {
            return Err(OutOfRange::new(format!(
                "no previous {} before {}",
                describe(filter),
                self.position()
            )));
        }
        loop {
            self.step_backward();
            if filter.is_empty() || filter.contains(&self.tokens.as_slice()[self.index].kind) {
                break;
            }
        }
        self.current()
    }

    fn step_forward(&mut self) {
        self.index += 1;
        self.pending = false;
        match self.tokens.as_slice()[self.index].kind {
            TokenKind::Indent => self.indent_depth += 1,
            TokenKind::Newline => self.indent_depth = 0,
            _ => {}
        }
    }

    fn step_backward(&mut self) {
        self.index -= 1;
        self.pending = false;
        match self.tokens.as_slice()[self.index].kind {
            TokenKind::Indent => self.indent_depth = self.indent_depth.saturating_sub(1),
            TokenKind::Newline => self.indent_depth = 0,
            _ => {}
        }
    }

    /// Whether every token from the current one to the end is blank.
    pub fn is_empty(&self) -> bool {
        self.tokens
            .as_slice()
            .get(self.index..)
            .unwrap_or(&[])
            .iter()
            .all(|t| t.kind.is_blank())
    }

    /// Whether nothing meaningful is left to consume.
    pub fn is_exhausted(&self) -> bool {
        self.peek(&TokenKind::BLANK).is_none()
    }

    fn peek_index(&self, excluded: &[TokenKind]) -> Option<usize> {
        let start = if self.pending { self.index } else { self.index + 1 };
        self.tokens
            .as_slice()
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, t)| !excluded.contains(&t.kind))
            .map(|(index, _)| index)
    }

    /// The next unconsumed token not in `excluded`.
    pub fn peek(&self, excluded: &[TokenKind]) -> Option<&Token> {
        self.peek_index(excluded).and_then(|index| self.tokens.get(index))
    }

    /// Consume the next unconsumed token not in `excluded`, which must have
    /// kind `kind`. The cursor is unchanged on failure.
    pub fn advance(&mut self, kind: TokenKind, excluded: &[TokenKind]) -> Result<&Token, OutOfRange> {
        let target = self
            .peek_index(excluded)
            .filter(|&index| self.tokens.as_slice()[index].kind == kind)
            .ok_or_else(|| {
                OutOfRange::new(format!("expected {} after {}", kind, self.position()))
            })?;
        if target == self.index {
            self.pending = false;
        }
        while self.index < target {
            self.step_forward();
        }
        self.current()
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            index: self.index,
            indent_depth: self.indent_depth,
            pending: self.pending,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.index = checkpoint.index;
        self.indent_depth = checkpoint.indent_depth;
        self.pending = checkpoint.pending;
    }

    /// Save the current position under `name`, overwriting an earlier save.
    pub fn save(&mut self, name: &str) -> &mut Self {
        let checkpoint = self.checkpoint();
        match self.history.iter_mut().find(|(saved, _)| saved == name) {
            Some((_, slot)) => *slot = checkpoint,
            None => self.history.push((name.to_string(), checkpoint)),
        }
        self
    }

    pub fn load(&mut self, name: &str) -> Result<&mut Self, OutOfRange> {
        let checkpoint = self
            .history
            .iter()
            .find(|(saved, _)| saved == name)
            .map(|(_, checkpoint)| *checkpoint)
            .ok_or_else(|| OutOfRange::new(format!("no checkpoint named {:?}", name)))?;
        self.restore(checkpoint);
        Ok(self)
    }

    /// Restore the first checkpoint saved since construction or the last
    /// reset, then forget all checkpoints.
    pub fn reset(&mut self) -> &mut Self {
        if let Some((_, checkpoint)) = self.history.first() {
            let checkpoint = *checkpoint;
            self.restore(checkpoint);
        }
        self.history.clear();
        self
    }
}

fn describe(filter: &[TokenKind]) -> String {
    if filter.is_empty() {
        "token".to_string()
    } else {
        filter
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
