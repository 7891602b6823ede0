//! Path-addressed navigation and mutation over an AST
//!
//! The [`AstExplorer`] owns a tree and tracks a current node through its
//! absolute path from the root. The path is kept twice: as the segments the
//! caller used to get there (so [`cursor`](AstExplorer::cursor) prints what
//! was asked for) and as resolved child indices (so the current node is found
//! without re-filtering by type).
//!
//! ## Navigation
//!
//! - [`go`](AstExplorer::go) appends a relative cursor and never commits a
//!   partial walk
//! - [`back`](AstExplorer::back) pops trailing segments and never fails
//! - [`previous`](AstExplorer::previous) climbs to the nearest ancestor of a type
//! - [`next`](AstExplorer::next) descends to the first descendant of a type,
//!   checking all immediate children before descending into any
//!
//! ## Mutation
//!
//! [`add`](AstExplorer::add) appends a child to the current node in place. The
//! tree is never shared, so the new node is visible from the root straight
//! away and the current path stays valid: children are only ever appended.

use super::path::{parse_cursor, parse_path, PathSegment};
use super::Node;
use crate::fscript::error::OutOfRange;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct AstExplorer {
    ast: Node,
    composed: Vec<PathSegment>,
    indices: Vec<usize>,
    history: Vec<(String, String)>,
}

impl AstExplorer {
    pub fn new(ast: Node) -> Self {
        Self {
            ast,
            composed: Vec::new(),
            indices: Vec::new(),
            history: Vec::new(),
        }
    }

    fn resolve(&self, indices: &[usize]) -> &Node {
        indices
            .iter()
            .fold(&self.ast, |node, &index| &node.children[index])
    }

    fn node_mut(&mut self) -> &mut Node {
        let mut node = &mut self.ast;
        for &index in &self.indices {
            node = &mut node.children[index];
        }
        node
    }

    /// Walk `segments` from `node`, collecting absolute child indices.
    fn walk(node: &Node, segments: &[PathSegment]) -> Result<Vec<usize>, OutOfRange> {
        let mut indices = Vec::with_capacity(segments.len());
        let mut current = node;
        for segment in segments {
            let index = segment.resolve(current)?;
            indices.push(index);
            current = &current.children[index];
        }
        Ok(indices)
    }

    /// The current node.
    pub fn node(&self) -> &Node {
        self.resolve(&self.indices)
    }

    pub fn children(&self) -> &[Node] {
        &self.node().children
    }

    /// Number of children of the current node.
    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// Canonical absolute path of the current node; empty at the root.
    pub fn cursor(&self) -> String {
        parse_path(&self.composed)
    }

    pub fn is_root(&self) -> bool {
        self.composed.is_empty()
    }

    pub fn root_node(&self) -> &Node {
        &self.ast
    }

    pub fn into_root(self) -> Node {
        self.ast
    }

    /// Whether every segment of `cursor` resolves from the current node.
    pub fn has(&self, cursor: &str) -> bool {
        Self::walk(self.node(), &parse_cursor(cursor)).is_ok()
    }

    pub fn go(&mut self, cursor: &str) -> Result<&mut Self, OutOfRange> {
        let segments = parse_cursor(cursor);
        let indices = Self::walk(self.node(), &segments).map_err(|_| {
            OutOfRange::new(format!(
                "unable to go to « {} » from « {} »",
                cursor,
                self.cursor()
            ))
        })?;
        self.composed.extend(segments);
        self.indices.extend(indices);
        trace!(cursor = %self.cursor(), "explorer moved");
        Ok(self)
    }

    /// Pop up to `n` trailing segments.
    pub fn back(&mut self, n: usize) -> &mut Self {
        let keep = self.composed.len().saturating_sub(n);
        self.composed.truncate(keep);
        self.indices.truncate(keep);
        self
    }

    pub fn root(&mut self) -> &mut Self {
        self.composed.clear();
        self.indices.clear();
        self
    }

    /// Save the current absolute cursor under `name`, overwriting an earlier save.
    pub fn save(&mut self, name: &str) -> &mut Self {
        let cursor = self.cursor();
        match self.history.iter_mut().find(|(saved, _)| saved == name) {
            Some((_, slot)) => *slot = cursor,
            None => self.history.push((name.to_string(), cursor)),
        }
        self
    }

    pub fn load(&mut self, name: &str) -> Result<&mut Self, OutOfRange> {
        let cursor = self
            .history
            .iter()
            .find(|(saved, _)| saved == name)
            .map(|(_, cursor)| cursor.clone())
            .ok_or_else(|| OutOfRange::new(format!("no checkpoint named {:?}", name)))?;
        self.goto_absolute(&cursor)?;
        Ok(self)
    }

    /// Restore the first checkpoint saved since construction or the last
    /// reset, then forget all checkpoints.
    pub fn reset(&mut self) -> Result<&mut Self, OutOfRange> {
        let first = self.history.first().map(|(_, cursor)| cursor.clone());
        self.history.clear();
        if let Some(cursor) = first {
            self.goto_absolute(&cursor)?;
        }
        Ok(self)
    }

    fn goto_absolute(&mut self, cursor: &str) -> Result<(), OutOfRange> {
        let segments = parse_cursor(cursor);
        let indices = Self::walk(&self.ast, &segments)?;
        self.composed = segments;
        self.indices = indices;
        Ok(())
    }

    /// Path length of the nearest strict ancestor of type `node_type`.
    fn ancestor_depth(&self, node_type: &str) -> Option<usize> {
        (0..self.indices.len())
            .rev()
            .find(|&depth| self.resolve(&self.indices[..depth]).node_type == node_type)
    }

    pub fn has_previous(&self, node_type: &str) -> bool {
        self.ancestor_depth(node_type).is_some()
    }

    /// Climb to the nearest ancestor of type `node_type`.
    pub fn previous(&mut self, node_type: &str) -> Result<&mut Self, OutOfRange> {
        let depth = self.ancestor_depth(node_type).ok_or_else(|| {
            OutOfRange::new(format!(
                "no « {} » above « {} »",
                node_type,
                self.cursor()
            ))
        })?;
        self.composed.truncate(depth);
        self.indices.truncate(depth);
        Ok(self)
    }

    /// Relative indices of the first descendant of type `node_type`.
    fn find_next(node: &Node, node_type: &str) -> Option<Vec<usize>> {
        if let Some(index) = node.children.iter().position(|c| c.node_type == node_type) {
            return Some(vec![index]);
        }
        node.children.iter().enumerate().find_map(|(index, child)| {
            Self::find_next(child, node_type).map(|mut rest| {
                rest.insert(0, index);
                rest
            })
        })
    }

    pub fn has_next(&self, node_type: &str) -> bool {
        Self::find_next(self.node(), node_type).is_some()
    }

    /// Descend to the first descendant of type `node_type`.
    pub fn next(&mut self, node_type: &str) -> Result<&mut Self, OutOfRange> {
        let indices = Self::find_next(self.node(), node_type).ok_or_else(|| {
            OutOfRange::new(format!(
                "no « {} » below « {} »",
                node_type,
                self.cursor()
            ))
        })?;
        self.composed
            .extend(indices.iter().map(|&index| PathSegment::Indexed(index)));
        self.indices.extend(indices);
        Ok(self)
    }

    /// Append `node` to the current node's children.
    pub fn add(&mut self, node: Node) -> &mut Self {
        trace!(node_type = %node.node_type, cursor = %self.cursor(), "explorer add");
        self.node_mut().children.push(node);
        self
    }
}
