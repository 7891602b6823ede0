//! Source text to AST in one call
//!
//! Wires the default recognizers, a token cursor, an explorer over a fresh
//! `ROOT` node and the default grammar:
//!
//! 1. `ASSIGNMENT` (with its `ASSIGNMENT_VALUE` child grammar)
//! 2. `LITERAL`
//!
//! Unlike a bare [`AstBuilder`], the pipeline treats meaningful tokens left
//! over after the root scope closes as a [`SyntaxError`]: nothing in the
//! default grammar could read them.

use crate::fscript::ast::{AstExplorer, Node};
use crate::fscript::config::CompilerOptions;
use crate::fscript::cursor::TokenCursor;
use crate::fscript::error::{Result, SyntaxError};
use crate::fscript::lexing::Lexer;
use crate::fscript::parsing::{AssignmentNodeBuilder, AstBuilder, LiteralNodeBuilder, NodeBuilder};
use crate::fscript::token::{TokenKind, TokenSequence};
use tracing::debug;

/// The grammar [`parse_source`] uses, in priority order.
pub fn default_grammar() -> Vec<Box<dyn NodeBuilder>> {
    vec![
        Box::new(AssignmentNodeBuilder),
        Box::new(LiteralNodeBuilder::new()),
    ]
}

/// Lex `source` with the default recognizers.
pub fn lex_source(source: &str, options: &CompilerOptions) -> Result<TokenSequence> {
    Ok(Lexer::with_defaults(options).tokenize(source)?)
}

/// Build the root node for already lexed `tokens`.
pub fn parse_tokens(tokens: TokenSequence, builder: &AstBuilder) -> Result<Node> {
    let mut cursor = TokenCursor::new(tokens);
    let mut explorer = AstExplorer::new(Node::root());
    let nodes = builder.build(&mut cursor, &mut explorer)?;

    if let Some(token) = cursor.peek(&TokenKind::BLANK) {
        return Err(SyntaxError::new(
            token.position,
            format!("unexpected {} « {} »", token.kind, token.raw),
        )
        .into());
    }

    debug!(nodes = nodes.len(), "built ast");
    Ok(Node::root().with_children(nodes))
}

/// Lex and parse `source` with the default grammar.
pub fn parse_source(source: &str, options: &CompilerOptions) -> Result<Node> {
    let tokens = lex_source(source, options)?;
    let builder = AstBuilder::with_builders(default_grammar())?.with_max_depth(options.max_depth);
    parse_tokens(tokens, &builder)
}
