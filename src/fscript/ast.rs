//! AST nodes and the explorer that navigates them
//!
//! A [`Node`] is a typed tree element: a `type` name, ordered children and an
//! open bag of scalar attributes. Trees are acyclic and unshared; nodes carry
//! no parent pointer, so upward navigation goes through the
//! [`AstExplorer`](explorer::AstExplorer) and its absolute path.
//!
//! Nodes serialize with `type`, `children` and the attributes flattened as
//! sibling keys:
//!
//! ```yaml
//! type: LITERAL_NUMBER
//! children: []
//! value: 10
//! kind: integer
//! ```

pub mod explorer;
pub mod path;

pub use explorer::AstExplorer;
pub use path::{parse_cursor, parse_path, PathSegment};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Type of the node at the top of every built tree.
pub const ROOT_TYPE: &str = "ROOT";

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Boolean(value) => write!(f, "{}", value),
            AttributeValue::Integer(value) => write!(f, "{}", value),
            AttributeValue::Float(value) => write!(f, "{}", value),
            AttributeValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Node {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            children: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_TYPE)
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn is(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }

    /// The same node without its children.
    pub fn shallow(&self) -> Node {
        Node {
            node_type: self.node_type.clone(),
            children: Vec::new(),
            attributes: self.attributes.clone(),
        }
    }
}
