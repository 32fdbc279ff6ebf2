//! The parameter kind.

use std::sync::Arc;

use oasdelta_index::ReferenceResolver;
use serde_json::Value;

use crate::build::{self, Buildable};
use crate::error::BuildResult;
use crate::extensions::Extensions;
use crate::hash::{ContentHash, HashBuilder};
use crate::node::Node;
use crate::reference::NodeRef;
use crate::v3::schema::Schema;

/// A low-level parameter object.
#[derive(Clone, Debug, Default)]
pub struct Parameter {
    pub name: NodeRef<String>,
    pub location: NodeRef<String>,
    pub description: NodeRef<String>,
    pub required: NodeRef<bool>,
    pub deprecated: NodeRef<bool>,
    pub allow_empty_value: NodeRef<bool>,
    pub style: NodeRef<String>,
    pub explode: NodeRef<bool>,
    pub schema: NodeRef<Arc<Schema>>,
    pub example: NodeRef<Value>,
    pub extensions: Extensions,
}

impl Parameter {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Parameter {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("parameter", node)?;
        Ok(Self {
            name: build::extract_string("name", node)?,
            location: build::extract_string("in", node)?,
            description: build::extract_string("description", node)?,
            required: build::extract_bool("required", node)?,
            deprecated: build::extract_bool("deprecated", node)?,
            allow_empty_value: build::extract_bool("allowEmptyValue", node)?,
            style: build::extract_string("style", node)?,
            explode: build::extract_bool("explode", node)?,
            schema: build::extract_object("schema", node, resolver)?,
            example: build::extract_value("example", node)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Parameter {
    const DOMAIN: &'static str = "oasdelta-parameter-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("name", &self.name);
        builder.scalar("in", &self.location);
        builder.scalar("description", &self.description);
        builder.scalar("required", &self.required);
        builder.scalar("deprecated", &self.deprecated);
        builder.scalar("allowEmptyValue", &self.allow_empty_value);
        builder.scalar("style", &self.style);
        builder.scalar("explode", &self.explode);
        builder.nested("schema", &self.schema);
        builder.scalar("example", &self.example);
        builder.extensions(&self.extensions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasdelta_index::MemoryIndex;
    use serde_json::json;

    #[test]
    fn query_parameter_with_schema() {
        let index = MemoryIndex::new();
        let node = Node::from_json(&json!({
            "name": "limit",
            "in": "query",
            "required": false,
            "schema": {"type": "integer", "format": "int32"}
        }));
        let param = Parameter::build(&node, &index).unwrap();
        assert_eq!(param.name.value().map(String::as_str), Some("limit"));
        assert_eq!(param.required.value(), Some(&false));
        assert!(!param.schema.is_empty());
    }

    #[test]
    fn required_false_differs_from_absent_in_hash() {
        let index = MemoryIndex::new();
        let explicit = Parameter::build(
            &Node::from_json(&json!({"name": "q", "in": "query", "required": false})),
            &index,
        )
        .unwrap();
        let absent = Parameter::build(
            &Node::from_json(&json!({"name": "q", "in": "query"})),
            &index,
        )
        .unwrap();
        assert_ne!(explicit.content_hash(), absent.content_hash());
    }
}
