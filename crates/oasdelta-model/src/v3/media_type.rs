//! The media type kind: one entry of a `content` map.

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

/// A low-level media type object.
#[derive(Clone, Debug, Default)]
pub struct MediaType {
    pub schema: NodeRef<Arc<Schema>>,
    pub example: NodeRef<Value>,
    pub extensions: Extensions,
}

impl MediaType {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for MediaType {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("mediaType", node)?;
        Ok(Self {
            schema: build::extract_object("schema", node, resolver)?,
            example: build::extract_value("example", node)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for MediaType {
    const DOMAIN: &'static str = "oasdelta-media-type-v1";

    fn collect(&self, builder: &mut HashBuilder) {
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
    fn media_type_with_referenced_schema() {
        let index = MemoryIndex::new();
        let pet = Schema::build(
            &Node::from_json(&json!({"type": "object", "title": "Pet"})),
            &index,
        )
        .unwrap();
        index
            .insert("#/components/schemas/Pet", Arc::new(pet))
            .unwrap();

        let node = Node::from_json(&json!({
            "schema": {"$ref": "#/components/schemas/Pet"}
        }));
        let media = MediaType::build(&node, &index).unwrap();
        assert!(media.schema.is_reference());
    }
}
