//! The link kind.

use std::collections::BTreeMap;

use oasdelta_index::ReferenceResolver;
use serde_json::Value;

use crate::build::{self, Buildable};
use crate::error::BuildResult;
use crate::extensions::Extensions;
use crate::hash::{ContentHash, HashBuilder};
use crate::node::Node;
use crate::reference::NodeRef;

/// A low-level link object.
#[derive(Clone, Debug, Default)]
pub struct Link {
    pub operation_ref: NodeRef<String>,
    pub operation_id: NodeRef<String>,
    pub parameters: BTreeMap<String, NodeRef<Value>>,
    pub request_body: NodeRef<Value>,
    pub description: NodeRef<String>,
    pub extensions: Extensions,
}

impl Link {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Link {
    fn build(node: &Node, _resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("link", node)?;
        Ok(Self {
            operation_ref: build::extract_string("operationRef", node)?,
            operation_id: build::extract_string("operationId", node)?,
            parameters: build::extract_value_map("parameters", node)?,
            request_body: build::extract_value("requestBody", node)?,
            description: build::extract_string("description", node)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Link {
    const DOMAIN: &'static str = "oasdelta-link-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("operationRef", &self.operation_ref);
        builder.scalar("operationId", &self.operation_id);
        builder.scalar_map("parameters", &self.parameters);
        builder.scalar("requestBody", &self.request_body);
        builder.scalar("description", &self.description);
        builder.extensions(&self.extensions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasdelta_index::MemoryIndex;
    use serde_json::json;

    #[test]
    fn link_with_runtime_parameters() {
        let index = MemoryIndex::new();
        let node = Node::from_json(&json!({
            "operationId": "getPetById",
            "parameters": {"petId": "$response.body#/id"}
        }));
        let link = Link::build(&node, &index).unwrap();
        assert_eq!(
            link.operation_id.value().map(String::as_str),
            Some("getPetById")
        );
        assert_eq!(
            link.parameters["petId"].value(),
            Some(&json!("$response.body#/id"))
        );
    }
}
