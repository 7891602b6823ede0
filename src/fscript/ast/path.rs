//! Path segments and their string form
//!
//! A cursor string is a `.`-separated list of segments:
//!
//! - an **indexed** segment is a bare non-negative integer, the absolute index
//!   of a child (`0`, `5`);
//! - a **named** segment is `type` or `type:n`, the n-th (0-based) child of
//!   exactly that type. `n` defaults to 0 and the canonical form omits `:0`.
//!
//! `parse_path(&parse_cursor(s))` is the canonical spelling of `s`.

use super::Node;
use crate::fscript::error::OutOfRange;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Indexed(usize),
    Named { node_type: String, n: usize },
}

impl PathSegment {
    pub fn named(node_type: impl Into<String>, n: usize) -> Self {
        PathSegment::Named {
            node_type: node_type.into(),
            n,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, PathSegment::Named { .. })
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, PathSegment::Indexed(_))
    }

    /// Absolute index of the child of `node` this segment designates.
    pub fn resolve(&self, node: &Node) -> Result<usize, OutOfRange> {
        if node.children.is_empty() {
            return Err(OutOfRange::new(format!(
                "« {} » has no children to resolve « {} »",
                node.node_type, self
            )));
        }
        let index = match self {
            PathSegment::Indexed(index) => Some(*index).filter(|&i| i < node.children.len()),
            PathSegment::Named { node_type, n } => node
                .children
                .iter()
                .enumerate()
                .filter(|(_, child)| child.node_type == *node_type)
                .nth(*n)
                .map(|(index, _)| index),
        };
        index.ok_or_else(|| {
            OutOfRange::new(format!("« {} » has no child « {} »", node.node_type, self))
        })
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Indexed(index) => write!(f, "{}", index),
            PathSegment::Named { node_type, n: 0 } => f.write_str(node_type),
            PathSegment::Named { node_type, n } => write!(f, "{}:{}", node_type, n),
        }
    }
}

fn parse_segment(component: &str) -> PathSegment {
    if let Ok(index) = component.parse::<usize>() {
        if component.bytes().all(|b| b.is_ascii_digit()) {
            return PathSegment::Indexed(index);
        }
    }
    match component.split_once(':') {
        Some((node_type, n)) => match n.trim().parse::<usize>() {
            Ok(n) => PathSegment::named(node_type.trim(), n),
            Err(_) => PathSegment::named(component, 0),
        },
        None => PathSegment::named(component, 0),
    }
}

/// Split a cursor string into segments; empty components are dropped.
pub fn parse_cursor(cursor: &str) -> Vec<PathSegment> {
    cursor
        .split('.')
        .map(str::trim)
        .filter(|component| !component.is_empty())
        .map(parse_segment)
        .collect()
}

/// Canonical cursor string of `segments`.
pub fn parse_path(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// The child of `node` designated by `segment`.
pub fn get_node_at_path<'a>(node: &'a Node, segment: &PathSegment) -> Result<&'a Node, OutOfRange> {
    segment.resolve(node).map(|index| &node.children[index])
}
