//! The example kind.

use oasdelta_index::ReferenceResolver;
use serde_json::Value;

use crate::build::{self, Buildable};
use crate::error::BuildResult;
use crate::extensions::Extensions;
use crate::hash::{ContentHash, HashBuilder};
use crate::node::Node;
use crate::reference::NodeRef;

/// A low-level example object.
#[derive(Clone, Debug, Default)]
pub struct Example {
    pub summary: NodeRef<String>,
    pub description: NodeRef<String>,
    pub value: NodeRef<Value>,
    pub external_value: NodeRef<String>,
    pub extensions: Extensions,
}

impl Example {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Example {
    fn build(node: &Node, _resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("example", node)?;
        Ok(Self {
            summary: build::extract_string("summary", node)?,
            description: build::extract_string("description", node)?,
            value: build::extract_value("value", node)?,
            external_value: build::extract_string("externalValue", node)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Example {
    const DOMAIN: &'static str = "oasdelta-example-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("summary", &self.summary);
        builder.scalar("description", &self.description);
        builder.scalar("value", &self.value);
        builder.scalar("externalValue", &self.external_value);
        builder.extensions(&self.extensions);
    }
}
