//! The raw document node tree: the contract with the external parser.
//!
//! A [`Node`] is an untyped tree of scalars, sequences, and mappings, each
//! carrying the line and column it was parsed from. Builders consume this
//! tree; producing it from bytes is the parser's job and out of scope here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reference::Span;

/// Key under which pointer references appear in a mapping.
pub const REF_KEY: &str = "$ref";

/// One node of the parsed document tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub value: NodeValue,
    pub span: Span,
}

/// The untyped payload of a [`Node`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Node>),
    /// Key/value pairs in document order. Keys are themselves nodes so that
    /// they carry their own source positions.
    Mapping(Vec<(Node, Node)>),
}

impl Node {
    /// Create a node with an explicit source position.
    pub fn new(value: NodeValue, span: Span) -> Self {
        Self { value, span }
    }

    /// Returns `true` if this node is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self.value, NodeValue::Mapping(_))
    }

    /// The string payload, if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            NodeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a mapping child by string key.
    pub fn find(&self, key: &str) -> Option<&Node> {
        match &self.value {
            NodeValue::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Iterate mapping entries whose keys are strings, in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        let entries = match &self.value {
            NodeValue::Mapping(entries) => entries.as_slice(),
            _ => &[],
        };
        entries
            .iter()
            .filter_map(|(k, v)| k.as_str().map(|key| (key, v)))
    }

    /// Returns the pointer reference this mapping holds, if it is one.
    ///
    /// A node is a reference when it is a mapping with a string-valued
    /// `$ref` entry. The returned span is the reference entry's own
    /// position.
    pub fn reference(&self) -> Option<(&str, Span)> {
        let child = self.find(REF_KEY)?;
        child.as_str().map(|r| (r, child.span))
    }

    /// Convert this subtree to an untyped JSON value, dropping provenance.
    ///
    /// Mapping keys that are not strings are skipped. Used for storing
    /// extension payloads and other fields the model keeps untyped.
    pub fn to_json(&self) -> Value {
        match &self.value {
            NodeValue::Null => Value::Null,
            NodeValue::Bool(b) => Value::Bool(*b),
            NodeValue::Integer(i) => Value::from(*i),
            NodeValue::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number)
            }
            NodeValue::String(s) => Value::String(s.clone()),
            NodeValue::Sequence(items) => {
                Value::Array(items.iter().map(Node::to_json).collect())
            }
            NodeValue::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .filter_map(|(k, v)| k.as_str().map(|key| (key.to_string(), v.to_json())))
                    .collect(),
            ),
        }
    }

    /// Build a node tree from a JSON value with zeroed source positions.
    ///
    /// Intended for tests and for callers whose input never had positions
    /// to begin with.
    pub fn from_json(value: &Value) -> Self {
        let span = Span::default();
        let node_value = match value {
            Value::Null => NodeValue::Null,
            Value::Bool(b) => NodeValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    NodeValue::Integer(i)
                } else {
                    NodeValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => NodeValue::String(s.clone()),
            Value::Array(items) => {
                NodeValue::Sequence(items.iter().map(Node::from_json).collect())
            }
            Value::Object(map) => NodeValue::Mapping(
                map.iter()
                    .map(|(k, v)| {
                        (
                            Node::new(NodeValue::String(k.clone()), span),
                            Node::from_json(v),
                        )
                    })
                    .collect(),
            ),
        };
        Node::new(node_value, span)
    }
}
