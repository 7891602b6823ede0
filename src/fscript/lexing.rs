//! Lexing: source text to a [`TokenSequence`]
//!
//! The [`Lexer`] is an ordered registry of [`Recognizer`]s. Each step asks the
//! recognizers, in registration order, whether they support the remaining
//! input; the first that does recognizes a token, the token is appended, and
//! the recognizer consumes its text. This repeats until the input is empty.
//!
//! There is no catch-all token: input that no recognizer supports is a
//! [`LexError`] carrying the offending text and its position.
//!
//! ## Usage
//!
//! ```text
//! let lexer = Lexer::with_defaults(&CompilerOptions::default());
//! let tokens = lexer.tokenize("def answer = 42\n")?;
//! ```

pub mod recognizer;
pub mod recognizers;

pub use recognizer::{PatternRecognizer, Recognizer};
use recognizer::unexpected;
pub use recognizers::default_recognizers;

use crate::fscript::config::CompilerOptions;
use crate::fscript::error::{LexError, RegistrationError};
use crate::fscript::token::TokenSequence;
use std::fmt;
use tracing::{debug, trace};

/// Ordered registry of recognizers.
pub struct Lexer {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl Lexer {
    /// A lexer with no recognizers; every non-empty input fails.
    pub fn new() -> Self {
        Self {
            recognizers: Vec::new(),
        }
    }

    /// A lexer with the built-in recognizers in their default priority order.
    pub fn with_defaults(options: &CompilerOptions) -> Self {
        Self {
            recognizers: default_recognizers(options),
        }
    }

    /// Append a recognizer at the lowest priority.
    pub fn register(
        &mut self,
        recognizer: Box<dyn Recognizer>,
    ) -> Result<&mut Self, RegistrationError> {
        if self.has(recognizer.name()) {
            return Err(RegistrationError::Duplicate {
                registry: "recognizer",
                name: recognizer.name().to_string(),
            });
        }
        self.recognizers.push(recognizer);
        Ok(self)
    }

    pub fn has(&self, name: &str) -> bool {
        self.recognizers.iter().any(|r| r.name() == name)
    }

    /// Registered names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    pub fn tokenize(&self, source: &str) -> Result<TokenSequence, LexError> {
        let mut tokens = TokenSequence::new();
        let mut remaining = source;

        while !remaining.is_empty() {
            let recognizer = self
                .recognizers
                .iter()
                .find(|r| r.supports(remaining, &tokens))
                .ok_or_else(|| unexpected(remaining, &tokens))?;

            let token = recognizer.recognize(remaining, &tokens)?;
            let rest = recognizer.consume(remaining);
            if rest.len() >= remaining.len() {
                return Err(unexpected(remaining, &tokens));
            }

            trace!(
                recognizer = recognizer.name(),
                kind = %token.kind,
                position = %token.position,
                "recognized token"
            );
            tokens.push(token);
            remaining = rest;
        }

        debug!(count = tokens.len(), "lexed source");
        Ok(tokens)
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("recognizers", &self.names())
            .finish()
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::with_defaults(&CompilerOptions::default())
    }
}

/// Lex `source` with the built-in recognizers.
pub fn tokenize(source: &str, options: &CompilerOptions) -> Result<TokenSequence, LexError> {
    Lexer::with_defaults(options).tokenize(source)
}
