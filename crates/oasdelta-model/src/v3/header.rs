//! The header kind. Structurally a parameter without `name` and `in`.

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

/// A low-level header object.
#[derive(Clone, Debug, Default)]
pub struct Header {
    pub description: NodeRef<String>,
    pub required: NodeRef<bool>,
    pub deprecated: NodeRef<bool>,
    pub style: NodeRef<String>,
    pub explode: NodeRef<bool>,
    pub schema: NodeRef<Arc<Schema>>,
    pub example: NodeRef<Value>,
    pub extensions: Extensions,
}

impl Header {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Header {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("header", node)?;
        Ok(Self {
            description: build::extract_string("description", node)?,
            required: build::extract_bool("required", node)?,
            deprecated: build::extract_bool("deprecated", node)?,
            style: build::extract_string("style", node)?,
            explode: build::extract_bool("explode", node)?,
            schema: build::extract_object("schema", node, resolver)?,
            example: build::extract_value("example", node)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Header {
    const DOMAIN: &'static str = "oasdelta-header-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("description", &self.description);
        builder.scalar("required", &self.required);
        builder.scalar("deprecated", &self.deprecated);
        builder.scalar("style", &self.style);
        builder.scalar("explode", &self.explode);
        builder.nested("schema", &self.schema);
        builder.scalar("example", &self.example);
        builder.extensions(&self.extensions);
    }
}
