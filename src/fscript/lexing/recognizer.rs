//! The recognizer interface
//!
//! A recognizer claims, extracts and removes exactly one token from the start of
//! the remaining input. The [`Lexer`](super::Lexer) asks every registered
//! recognizer in priority order whether it [`supports`](Recognizer::supports)
//! the input; the first one that does builds the token and consumes its text.
//!
//! Most recognizers are a single anchored regular expression mapped onto a
//! [`TokenKind`]; [`PatternRecognizer`] covers that case. Recognizers that
//! depend on what was lexed before (INDENT) or that normalize their text
//! (NEWLINE) implement the trait directly.

use crate::fscript::error::LexError;
use crate::fscript::token::{Token, TokenKind, TokenSequence};
use once_cell::sync::Lazy;
use regex::Regex;

pub trait Recognizer {
    /// Unique name within a lexer.
    fn name(&self) -> &str;

    /// Whether this recognizer claims the start of `input`.
    fn supports(&self, input: &str, tokens: &TokenSequence) -> bool;

    /// Build the token for the start of `input`, positioned after `tokens`.
    fn recognize(&self, input: &str, tokens: &TokenSequence) -> Result<Token, LexError>;

    /// The remainder of `input` once the recognized text is removed.
    fn consume<'a>(&self, input: &'a str) -> &'a str;
}

/// A recognizer driven by one anchored pattern.
///
/// `classify` maps the matched text to its kind, which lets one pattern emit
/// both halves of a bracket pair.
pub struct PatternRecognizer {
    name: &'static str,
    pattern: &'static Lazy<Regex>,
    classify: fn(&str) -> TokenKind,
}

impl PatternRecognizer {
    pub const fn new(
        name: &'static str,
        pattern: &'static Lazy<Regex>,
        classify: fn(&str) -> TokenKind,
    ) -> Self {
        Self {
            name,
            pattern,
            classify,
        }
    }

    fn matched<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.pattern
            .find(input)
            .filter(|m| m.start() == 0 && !m.as_str().is_empty())
            .filter(|m| !splits_word(m.as_str(), &input[m.end()..]))
            .map(|m| m.as_str())
    }
}

/// Whether a word-like match stops inside a longer identifier, as `def` in `def-x`.
fn splits_word(text: &str, rest: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_alphabetic())
        && rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Recognizer for PatternRecognizer {
    fn name(&self) -> &str {
        self.name
    }

    fn supports(&self, input: &str, _tokens: &TokenSequence) -> bool {
        self.matched(input).is_some()
    }

    fn recognize(&self, input: &str, tokens: &TokenSequence) -> Result<Token, LexError> {
        let text = self
            .matched(input)
            .ok_or_else(|| unexpected(input, tokens))?;
        let position = tokens.next_position(text.chars().count());
        Ok(Token::text((self.classify)(text), text, position))
    }

    fn consume<'a>(&self, input: &'a str) -> &'a str {
        match self.matched(input) {
            Some(text) => &input[text.len()..],
            None => input,
        }
    }
}

/// A [`LexError`] for the start of `input`, reporting the rest of its line.
pub fn unexpected(input: &str, tokens: &TokenSequence) -> LexError {
    let text = input.lines().next().unwrap_or(input);
    LexError::new(text, tokens.next_position(1))
}
