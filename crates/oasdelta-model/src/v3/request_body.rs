//! The request body kind.

use std::collections::BTreeMap;
use std::sync::Arc;

use oasdelta_index::ReferenceResolver;
use serde_json::Value;

use crate::build::{self, Buildable};
use crate::error::BuildResult;
use crate::extensions::Extensions;
use crate::hash::{ContentHash, HashBuilder};
use crate::node::Node;
use crate::reference::NodeRef;
use crate::v3::media_type::MediaType;
use crate::v3::CONTENT_LABEL;

/// A low-level request body object.
#[derive(Clone, Debug, Default)]
pub struct RequestBody {
    pub description: NodeRef<String>,
    pub required: NodeRef<bool>,
    pub content: BTreeMap<String, NodeRef<Arc<MediaType>>>,
    pub extensions: Extensions,
}

impl RequestBody {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for RequestBody {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("requestBody", node)?;
        Ok(Self {
            description: build::extract_string("description", node)?,
            required: build::extract_bool("required", node)?,
            content: build::extract_object_map(CONTENT_LABEL, node, resolver)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for RequestBody {
    const DOMAIN: &'static str = "oasdelta-request-body-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("description", &self.description);
        builder.scalar("required", &self.required);
        builder.nested_map(CONTENT_LABEL, &self.content);
        builder.extensions(&self.extensions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasdelta_index::MemoryIndex;
    use serde_json::json;

    #[test]
    fn json_request_body() {
        let index = MemoryIndex::new();
        let node = Node::from_json(&json!({
            "required": true,
            "content": {
                "application/json": {"schema": {"type": "object"}}
            }
        }));
        let body = RequestBody::build(&node, &index).unwrap();
        assert_eq!(body.required.value(), Some(&true));
        assert!(body.content.contains_key("application/json"));
    }
}
