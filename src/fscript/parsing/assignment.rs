//! Assignment rule
//!
//! ```text
//! def answer = 42
//! let ratio : Number = .5
//! ```
//!
//! `ASSIGNMENT` consumes the keyword, the identifier, an optional `: Type`
//! annotation and the `=` operator. Its child grammar is `ASSIGNMENT_VALUE`, a
//! literal rule that only applies inside an `ASSIGNMENT` node and on the same
//! line as the `=`.

use super::literals::LiteralNodeBuilder;
use super::NodeBuilder;
use crate::fscript::ast::{AstExplorer, Node};
use crate::fscript::cursor::TokenCursor;
use crate::fscript::error::{Result, SyntaxError};
use crate::fscript::token::{Token, TokenKind};

/// Keywords that introduce an assignment.
pub const ASSIGNMENT_KEYWORDS: &[&str] = &["def", "let", "const", "var"];

const INLINE: [TokenKind; 1] = [TokenKind::Space];

fn is_operator(token: Option<&Token>, operator: &str) -> bool {
    token.map_or(false, |t| t.kind == TokenKind::Operator && t.raw == operator)
}

pub struct AssignmentNodeBuilder;

impl AssignmentNodeBuilder {
    pub const NAME: &'static str = "ASSIGNMENT";
}

impl NodeBuilder for AssignmentNodeBuilder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports(&self, cursor: &TokenCursor, _ast: &AstExplorer) -> bool {
        cursor.peek(&TokenKind::BLANK).map_or(false, |t| {
            t.kind == TokenKind::Keyword && ASSIGNMENT_KEYWORDS.contains(&t.raw.as_str())
        })
    }

    fn build(&self, cursor: &mut TokenCursor, ast: &AstExplorer) -> Result<Node> {
        let keyword = cursor
            .advance(TokenKind::Keyword, &TokenKind::BLANK)?
            .raw
            .clone();

        if cursor.peek(&INLINE).map(|t| t.kind) != Some(TokenKind::Identifier) {
            return Err(SyntaxError::new(
                cursor.position(),
                format!("expected an identifier after « {} »", keyword),
            )
            .into());
        }
        let identifier = cursor.advance(TokenKind::Identifier, &INLINE)?.raw.clone();
        let mut node = Node::new(Self::NAME)
            .with_attribute("keyword", keyword)
            .with_attribute("identifier", identifier.as_str());

        if is_operator(cursor.peek(&INLINE), ":") {
            cursor.advance(TokenKind::Operator, &INLINE)?;
            if cursor.peek(&INLINE).map(|t| t.kind) != Some(TokenKind::Identifier) {
                return Err(SyntaxError::new(
                    cursor.position(),
                    format!("expected a type after « {} : »", identifier),
                )
                .into());
            }
            let type_name = cursor.advance(TokenKind::Identifier, &INLINE)?.raw.clone();
            node = node.with_attribute("type", type_name);
        }

        if !is_operator(cursor.peek(&INLINE), "=") {
            return Err(SyntaxError::new(
                cursor.position(),
                format!("expected « = » after « {} »", identifier),
            )
            .into());
        }
        cursor.advance(TokenKind::Operator, &INLINE)?;

        if !AssignmentValueBuilder::on_same_line(cursor, ast) {
            return Err(SyntaxError::new(
                cursor.position(),
                format!("missing value for « {} »", identifier),
            )
            .into());
        }

        Ok(node)
    }

    fn next(&self, _cursor: &mut TokenCursor, _ast: &AstExplorer) -> Result<Vec<Box<dyn NodeBuilder>>> {
        Ok(vec![Box::new(AssignmentValueBuilder::new())])
    }
}

/// The literal on the right of an assignment.
pub struct AssignmentValueBuilder {
    literal: LiteralNodeBuilder,
}

impl AssignmentValueBuilder {
    pub const NAME: &'static str = "ASSIGNMENT_VALUE";

    pub fn new() -> Self {
        Self {
            literal: LiteralNodeBuilder::new(),
        }
    }

    fn on_same_line(cursor: &TokenCursor, ast: &AstExplorer) -> bool {
        let literal = LiteralNodeBuilder::new();
        cursor
            .peek(&INLINE)
            .map_or(false, |t| t.kind == TokenKind::Literal)
            && literal.supports(cursor, ast)
    }
}

impl Default for AssignmentValueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBuilder for AssignmentValueBuilder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports(&self, cursor: &TokenCursor, ast: &AstExplorer) -> bool {
        ast.node().is(AssignmentNodeBuilder::NAME)
            && ast.is_empty()
            && cursor
                .peek(&INLINE)
                .map_or(false, |t| t.kind == TokenKind::Literal)
            && self.literal.supports(cursor, ast)
    }

    fn build(&self, cursor: &mut TokenCursor, ast: &AstExplorer) -> Result<Node> {
        self.literal.build(cursor, ast)
    }
}
