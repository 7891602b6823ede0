//! The built-in recognizers and their lexicons
//!
//! ## Priority order
//!
//! [`default_recognizers`] returns, in order: NEWLINE, INDENT, SPACE, KEYWORD,
//! SEPARATOR, LITERAL, OPERATOR, IDENTIFIER, GROUP, ARRAY, BLOCK.
//!
//! - NEWLINE comes first so that trailing whitespace on a line collapses into
//!   the line break instead of becoming SPACE.
//! - LITERAL comes before OPERATOR so that `.46` is a number rather than the
//!   `.` operator followed by `46`.
//! - Word-like lexicon entries (keywords, word operators such as `is` or `gte`,
//!   literal keywords such as `yes`) only match on a word boundary, so `index`
//!   stays one identifier instead of `in` + `dex`.
//!
//! Patterns are compiled once, lazily, the way the rest of the crate builds its
//! regular expressions.

use super::recognizer::{unexpected, PatternRecognizer, Recognizer};
use crate::fscript::config::CompilerOptions;
use crate::fscript::error::LexError;
use crate::fscript::token::{Token, TokenKind, TokenSequence, TokenValue};
use once_cell::sync::Lazy;
use regex::Regex;

/// Reserved words, emitted as KEYWORD.
pub const KEYWORDS: &[&str] = &[
    "def", "var", "let", "const", "class", "type", "interface", "if", "else", "for", "while",
    "do", "throw", "new", "async", "await", "yield", "return", "then", "import", "export",
    "from", "as", "in", "with", "function", "and", "or",
];

pub const BOOLEAN_KEYWORDS: &[&str] = &["true", "false", "yes", "no"];

pub const VOIDISH_KEYWORDS: &[&str] = &["null", "undefined", "void", "nothing"];

/// Operators in priority order; longer spellings come before their prefixes.
pub const OPERATORS: &[&str] = &[
    ":", "=>", "+", "->", "-", "*", "/", "...", "..", ".", "<=", "===", "==", "=", "is", "and",
    "or", "not", "!==", "!=", "!", "gte", "lte", "gt", "lt", "eq",
];

/// Literal keywords: every boolean and voidish spelling.
pub fn literal_keywords() -> impl Iterator<Item = &'static str> {
    BOOLEAN_KEYWORDS.iter().chain(VOIDISH_KEYWORDS).copied()
}

/// Join lexicon entries into one alternation, word entries bounded by `\b`.
fn alternation<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .map(|word| {
            let escaped = regex::escape(word);
            if word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                format!(r"{}\b", escaped)
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

static NEWLINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\r\n|\r|\n|[ \t]+(?:\r\n|\r|\n|$))").unwrap());

static SPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]+").unwrap());

static KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{})", alternation(KEYWORDS.iter().copied()))).unwrap()
});

static SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^,").unwrap());

static LITERAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+|"[^"]*"|'[^']*'|`[^`]*`|{})"#,
        alternation(literal_keywords())
    ))
    .unwrap()
});

static OPERATOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{})", alternation(OPERATORS.iter().copied()))).unwrap()
});

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*").unwrap());

static GROUP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[()]").unwrap());

static ARRAY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\[\]]").unwrap());

static BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[{}]").unwrap());

/// The built-in recognizers in priority order.
pub fn default_recognizers(options: &CompilerOptions) -> Vec<Box<dyn Recognizer>> {
    vec![
        Box::new(NewlineRecognizer),
        Box::new(IndentRecognizer::new(options)),
        Box::new(space()),
        Box::new(keyword()),
        Box::new(separator()),
        Box::new(literal()),
        Box::new(operator()),
        Box::new(identifier()),
        Box::new(group()),
        Box::new(array()),
        Box::new(block()),
    ]
}

pub fn space() -> PatternRecognizer {
    PatternRecognizer::new("SPACE", &SPACE_PATTERN, |_| TokenKind::Space)
}

pub fn keyword() -> PatternRecognizer {
    PatternRecognizer::new("KEYWORD", &KEYWORD_PATTERN, |_| TokenKind::Keyword)
}

pub fn separator() -> PatternRecognizer {
    PatternRecognizer::new("SEPARATOR", &SEPARATOR_PATTERN, |_| TokenKind::Separator)
}

pub fn literal() -> PatternRecognizer {
    PatternRecognizer::new("LITERAL", &LITERAL_PATTERN, |_| TokenKind::Literal)
}

pub fn operator() -> PatternRecognizer {
    PatternRecognizer::new("OPERATOR", &OPERATOR_PATTERN, |_| TokenKind::Operator)
}

pub fn identifier() -> PatternRecognizer {
    PatternRecognizer::new("IDENTIFIER", &IDENTIFIER_PATTERN, |_| {
        TokenKind::Identifier
    })
}

pub fn group() -> PatternRecognizer {
    PatternRecognizer::new("GROUP", &GROUP_PATTERN, |text| match text {
        "(" => TokenKind::GroupStart,
        _ => TokenKind::GroupEnd,
    })
}

pub fn array() -> PatternRecognizer {
    PatternRecognizer::new("ARRAY", &ARRAY_PATTERN, |text| match text {
        "[" => TokenKind::ArrayStart,
        _ => TokenKind::ArrayEnd,
    })
}

pub fn block() -> PatternRecognizer {
    PatternRecognizer::new("BLOCK", &BLOCK_PATTERN, |text| match text {
        "{" => TokenKind::BlockStart,
        _ => TokenKind::BlockEnd,
    })
}

/// A line break, or whitespace running to the end of the line.
///
/// Always emits a single `"\n"` of length 1 whatever it consumed.
pub struct NewlineRecognizer;

impl NewlineRecognizer {
    fn matched<'a>(&self, input: &'a str) -> Option<&'a str> {
        NEWLINE_PATTERN.find(input).map(|m| m.as_str())
    }
}

impl Recognizer for NewlineRecognizer {
    fn name(&self) -> &str {
        "NEWLINE"
    }

    fn supports(&self, input: &str, _tokens: &TokenSequence) -> bool {
        self.matched(input).is_some()
    }

    fn recognize(&self, input: &str, tokens: &TokenSequence) -> Result<Token, LexError> {
        if self.matched(input).is_none() {
            return Err(unexpected(input, tokens));
        }
        Ok(Token::text(TokenKind::Newline, "\n", tokens.next_position(1)))
    }

    fn consume<'a>(&self, input: &'a str) -> &'a str {
        match self.matched(input) {
            Some(text) => &input[text.len()..],
            None => input,
        }
    }
}

/// Exactly one indentation unit at the start of a line.
///
/// Nested indentation produces consecutive INDENT tokens; leftover whitespace
/// that doesn't make a whole unit falls through to SPACE.
pub struct IndentRecognizer {
    unit: String,
    width: usize,
}

impl IndentRecognizer {
    pub fn new(options: &CompilerOptions) -> Self {
        Self {
            unit: options.indent_unit(),
            width: options.indent_size,
        }
    }

    fn at_line_start(tokens: &TokenSequence) -> bool {
        match tokens.last() {
            None => true,
            Some(previous) => matches!(previous.kind, TokenKind::Newline | TokenKind::Indent),
        }
    }
}

impl Recognizer for IndentRecognizer {
    fn name(&self) -> &str {
        "INDENT"
    }

    fn supports(&self, input: &str, tokens: &TokenSequence) -> bool {
        !self.unit.is_empty() && input.starts_with(&self.unit) && Self::at_line_start(tokens)
    }

    fn recognize(&self, input: &str, tokens: &TokenSequence) -> Result<Token, LexError> {
        if !self.supports(input, tokens) {
            return Err(unexpected(input, tokens));
        }
        let position = tokens.next_position(self.unit.chars().count());
        Ok(Token::new(
            TokenKind::Indent,
            TokenValue::Number(self.width as f64),
            self.unit.clone(),
            position,
        ))
    }

    fn consume<'a>(&self, input: &'a str) -> &'a str {
        input.strip_prefix(self.unit.as_str()).unwrap_or(input)
    }
}
