//! Literal rules
//!
//! [`LiteralNodeBuilder`] (`LITERAL`) is a composite: it dispatches to the first
//! of its literal rules that supports the next meaningful token.
//!
//! | rule              | node attributes                          |
//! |-------------------|------------------------------------------|
//! | `LITERAL_NUMBER`  | `value`, `kind` (`integer` or `float`)   |
//! | `LITERAL_BOOLEAN` | `value` (`true`/`yes` → true)            |
//! | `LITERAL_STRING`  | `value`, without the surrounding quotes  |
//! | `LITERAL_NULLISH` | `keyword`                                |
//!
//! Literals may sit anywhere after blank tokens: every rule looks past SPACE,
//! INDENT and NEWLINE.

use super::NodeBuilder;
use crate::fscript::ast::{AstExplorer, Node};
use crate::fscript::cursor::TokenCursor;
use crate::fscript::error::{Result, SyntaxError};
use crate::fscript::lexing::recognizers::{BOOLEAN_KEYWORDS, VOIDISH_KEYWORDS};
use crate::fscript::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9.]+").unwrap());

static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d*\.\d+").unwrap());

/// The next meaningful token, when it is a literal.
fn next_literal<'a>(cursor: &'a TokenCursor, skipped: &[TokenKind]) -> Option<&'a Token> {
    cursor
        .peek(skipped)
        .filter(|token| token.kind == TokenKind::Literal)
}

fn consume_literal<'a>(cursor: &'a mut TokenCursor, skipped: &[TokenKind]) -> Result<&'a Token> {
    Ok(cursor.advance(TokenKind::Literal, skipped)?)
}

pub struct NumberLiteralBuilder;

impl NumberLiteralBuilder {
    pub const NAME: &'static str = "LITERAL_NUMBER";

    pub fn is_number(text: &str) -> bool {
        NUMBER.is_match(text)
    }

    pub fn is_float(text: &str) -> bool {
        FLOAT.is_match(text)
    }
}

impl NodeBuilder for NumberLiteralBuilder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports(&self, cursor: &TokenCursor, _ast: &AstExplorer) -> bool {
        next_literal(cursor, &TokenKind::BLANK).map_or(false, |t| Self::is_number(&t.raw))
    }

    fn build(&self, cursor: &mut TokenCursor, _ast: &AstExplorer) -> Result<Node> {
        let token = consume_literal(cursor, &TokenKind::BLANK)?;
        let text = token.raw.as_str();
        let position = token.position;
        let invalid = || SyntaxError::new(position, format!("invalid number literal {:?}", text));

        let node = Node::new(Self::NAME);
        if Self::is_float(text) {
            let value: f64 = text.parse().map_err(|_| invalid())?;
            Ok(node.with_attribute("value", value).with_attribute("kind", "float"))
        } else {
            let node = match text.parse::<i64>() {
                Ok(value) => node.with_attribute("value", value),
                // Wider than i64: keep the magnitude as a float.
                Err(_) => node.with_attribute("value", text.parse::<f64>().map_err(|_| invalid())?),
            };
            Ok(node.with_attribute("kind", "integer"))
        }
    }
}

pub struct BooleanLiteralBuilder;

impl BooleanLiteralBuilder {
    pub const NAME: &'static str = "LITERAL_BOOLEAN";

    pub fn is_boolean(text: &str) -> bool {
        BOOLEAN_KEYWORDS.contains(&text)
    }
}

impl NodeBuilder for BooleanLiteralBuilder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports(&self, cursor: &TokenCursor, _ast: &AstExplorer) -> bool {
        next_literal(cursor, &TokenKind::BLANK).map_or(false, |t| Self::is_boolean(&t.raw))
    }

    fn build(&self, cursor: &mut TokenCursor, _ast: &AstExplorer) -> Result<Node> {
        let token = consume_literal(cursor, &TokenKind::BLANK)?;
        let value = matches!(token.raw.as_str(), "true" | "yes");
        Ok(Node::new(Self::NAME).with_attribute("value", value))
    }
}

pub struct StringLiteralBuilder;

impl StringLiteralBuilder {
    pub const NAME: &'static str = "LITERAL_STRING";

    /// Text between matching quotes, if `text` is a quoted string.
    pub fn unquote(text: &str) -> Option<&str> {
        ['"', '\'', '`'].iter().find_map(|&quote| {
            text.strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
    }
}

impl NodeBuilder for StringLiteralBuilder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports(&self, cursor: &TokenCursor, _ast: &AstExplorer) -> bool {
        next_literal(cursor, &TokenKind::BLANK).map_or(false, |t| Self::unquote(&t.raw).is_some())
    }

    fn build(&self, cursor: &mut TokenCursor, _ast: &AstExplorer) -> Result<Node> {
        let token = consume_literal(cursor, &TokenKind::BLANK)?;
        let value = Self::unquote(&token.raw)
            .ok_or_else(|| SyntaxError::new(token.position, "unterminated string literal"))?;
        Ok(Node::new(Self::NAME).with_attribute("value", value))
    }
}

pub struct NullishLiteralBuilder;

impl NullishLiteralBuilder {
    pub const NAME: &'static str = "LITERAL_NULLISH";

    pub fn is_nullish(text: &str) -> bool {
        VOIDISH_KEYWORDS.contains(&text)
    }
}

impl NodeBuilder for NullishLiteralBuilder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports(&self, cursor: &TokenCursor, _ast: &AstExplorer) -> bool {
        next_literal(cursor, &TokenKind::BLANK).map_or(false, |t| Self::is_nullish(&t.raw))
    }

    fn build(&self, cursor: &mut TokenCursor, _ast: &AstExplorer) -> Result<Node> {
        let token = consume_literal(cursor, &TokenKind::BLANK)?;
        Ok(Node::new(Self::NAME).with_attribute("keyword", token.raw.as_str()))
    }
}

/// Dispatches to the first literal rule that supports the cursor.
pub struct LiteralNodeBuilder {
    rules: Vec<Box<dyn NodeBuilder>>,
}

impl LiteralNodeBuilder {
    pub const NAME: &'static str = "LITERAL";

    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(NumberLiteralBuilder),
                Box::new(BooleanLiteralBuilder),
                Box::new(StringLiteralBuilder),
                Box::new(NullishLiteralBuilder),
            ],
        }
    }

    fn select(&self, cursor: &TokenCursor, ast: &AstExplorer) -> Option<&dyn NodeBuilder> {
        self.rules
            .iter()
            .find(|rule| rule.supports(cursor, ast))
            .map(|rule| rule.as_ref())
    }
}

impl Default for LiteralNodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBuilder for LiteralNodeBuilder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports(&self, cursor: &TokenCursor, ast: &AstExplorer) -> bool {
        self.select(cursor, ast).is_some()
    }

    fn build(&self, cursor: &mut TokenCursor, ast: &AstExplorer) -> Result<Node> {
        match self.select(cursor, ast) {
            Some(rule) => rule.build(cursor, ast),
            None => Err(SyntaxError::new(cursor.position(), "unable to parse this literal").into()),
        }
    }
}
