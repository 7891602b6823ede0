//! Parsing: a token cursor to a tree of [`Node`]s
//!
//! A grammar is an ordered list of [`NodeBuilder`]s. The [`AstBuilder`] walks
//! it as a backtracking recursive descent:
//!
//! 1. try the builders in registration order and commit to the first one that
//!    [`supports`](NodeBuilder::supports) the cursor;
//! 2. when none does, return the nodes built so far. This is the normal way a
//!    scope ends, not an error;
//! 3. otherwise [`build`](NodeBuilder::build) the node, ask the builder for its
//!    child grammar with [`next`](NodeBuilder::next), and recurse with a fresh
//!    builder scoped to that grammar;
//! 4. attach the children, append the node and start over at step 1.
//!
//! `supports` only looks ahead (it receives a shared cursor); once a builder is
//! committed any failure inside `build`, `next` or the recursion aborts the
//! whole build as a [`SyntaxError`].
//!
//! While building, the [`AstExplorer`] mirrors the tree: each committed node is
//! added to the explorer's current node and the explorer descends into it for
//! the child grammar, so builders can ask "what am I inside?".

pub mod assignment;
pub mod literals;

pub use assignment::{AssignmentNodeBuilder, AssignmentValueBuilder};
pub use literals::LiteralNodeBuilder;

use crate::fscript::ast::{AstExplorer, Node};
use crate::fscript::cursor::TokenCursor;
use crate::fscript::error::{Error, RegistrationError, Result, SyntaxError};
use std::fmt;
use tracing::{debug, trace};

/// A pluggable grammar rule producing one node and its child grammar.
pub trait NodeBuilder {
    /// Unique name within a registry; usually the type of the node it builds.
    fn name(&self) -> &str;

    /// Whether the rule applies at the cursor. Lookahead only.
    fn supports(&self, cursor: &TokenCursor, ast: &AstExplorer) -> bool;

    /// Consume the rule's tokens, leaving the cursor on the last one, and
    /// return the node without children.
    fn build(&self, cursor: &mut TokenCursor, ast: &AstExplorer) -> Result<Node>;

    /// Grammar for the children of the node just built.
    fn next(&self, _cursor: &mut TokenCursor, _ast: &AstExplorer) -> Result<Vec<Box<dyn NodeBuilder>>> {
        Ok(Vec::new())
    }
}

/// Recursive dispatcher over an ordered list of builders.
pub struct AstBuilder {
    builders: Vec<Box<dyn NodeBuilder>>,
    max_depth: usize,
    depth: usize,
}

impl AstBuilder {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self {
            builders: Vec::new(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    /// Register every builder in order; duplicate names are rejected.
    pub fn with_builders(builders: Vec<Box<dyn NodeBuilder>>) -> std::result::Result<Self, RegistrationError> {
        let mut ast_builder = Self::new();
        for builder in builders {
            ast_builder.register(builder)?;
        }
        Ok(ast_builder)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn register(
        &mut self,
        builder: Box<dyn NodeBuilder>,
    ) -> std::result::Result<&mut Self, RegistrationError> {
        if self.has(builder.name()) {
            return Err(RegistrationError::Duplicate {
                registry: "node builder",
                name: builder.name().to_string(),
            });
        }
        self.builders.push(builder);
        Ok(self)
    }

    pub fn has(&self, name: &str) -> bool {
        self.builders.iter().any(|b| b.name() == name)
    }

    pub fn get(&self, name: &str) -> std::result::Result<&dyn NodeBuilder, RegistrationError> {
        self.builders
            .iter()
            .find(|b| b.name() == name)
            .map(|b| b.as_ref())
            .ok_or_else(|| RegistrationError::Unknown {
                registry: "node builder",
                name: name.to_string(),
            })
    }

    /// The named builders in the order given; every builder when `names` is empty.
    pub fn find(&self, names: &[&str]) -> std::result::Result<Vec<&dyn NodeBuilder>, RegistrationError> {
        if names.is_empty() {
            return Ok(self.builders.iter().map(|b| b.as_ref()).collect());
        }
        names.iter().map(|name| self.get(name)).collect()
    }

    /// Registered names in order.
    pub fn names(&self) -> Vec<&str> {
        self.builders.iter().map(|b| b.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Build the nodes of this scope, mirroring them into `ast`.
    pub fn build(&self, cursor: &mut TokenCursor, ast: &mut AstExplorer) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        while !cursor.is_exhausted() {
            let Some(builder) = self.builders.iter().find(|b| b.supports(&*cursor, &*ast)) else {
                trace!(depth = self.depth, position = %cursor.position(), "no rule applies, closing scope");
                break;
            };
            debug!(
                rule = builder.name(),
                depth = self.depth,
                position = %cursor.position(),
                "rule committed"
            );
            let before = (cursor.index(), cursor.is_pending());
            let node = self.commit(builder.as_ref(), cursor, ast)?;
            if (cursor.index(), cursor.is_pending()) == before {
                return Err(SyntaxError::new(
                    cursor.position(),
                    format!("{} rule made no progress", builder.name()),
                )
                .into());
            }
            nodes.push(node);
        }

        Ok(nodes)
    }

    fn commit(&self, builder: &dyn NodeBuilder, cursor: &mut TokenCursor, ast: &mut AstExplorer) -> Result<Node> {
        let mut node = builder
            .build(cursor, ast)
            .map_err(|err| committed(err, builder.name(), cursor))?;
        let grammar = builder
            .next(cursor, ast)
            .map_err(|err| committed(err, builder.name(), cursor))?;
        let scope = self.scoped(grammar, cursor)?;

        ast.add(node.shallow());
        let index = ast.len() - 1;
        ast.go(&index.to_string())?;
        let children = scope.build(cursor, ast);
        ast.back(1);

        node.children = children?;
        Ok(node)
    }

    fn scoped(&self, builders: Vec<Box<dyn NodeBuilder>>, cursor: &TokenCursor) -> Result<AstBuilder> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(SyntaxError::new(
                cursor.position(),
                format!("grammar nesting exceeds the maximum depth of {}", self.max_depth),
            )
            .into());
        }
        Ok(AstBuilder {
            builders,
            max_depth: self.max_depth,
            depth,
        })
    }
}

/// Navigation failures inside a committed rule are syntax errors.
fn committed(err: Error, rule: &str, cursor: &TokenCursor) -> Error {
    match err {
        Error::OutOfRange(out_of_range) => SyntaxError::new(
            cursor.position(),
            format!("{} rule: {}", rule, out_of_range.message),
        )
        .into(),
        other => other,
    }
}

impl fmt::Debug for AstBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstBuilder")
            .field("builders", &self.names())
            .field("max_depth", &self.max_depth)
            .field("depth", &self.depth)
            .finish()
    }
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}
