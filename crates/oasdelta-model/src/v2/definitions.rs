//! The flat definitions container of the older document format.
//!
//! The older format keeps four independent top-level maps instead of one
//! nested components object: `definitions` (schemas), `parameters`,
//! `responses`, and `securityDefinitions`. The entry kinds are shared
//! with the newer format.

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
use crate::v2::{DEFINITIONS_LABEL, SECURITY_DEFINITIONS_LABEL};
use crate::v3::{Parameter, Response, Schema, SecurityScheme, PARAMETERS_LABEL, RESPONSES_LABEL};

/// The flat reusable-definitions maps of an older-format document.
#[derive(Clone, Debug, Default)]
pub struct Definitions {
    pub schemas: BTreeMap<String, NodeRef<Arc<Schema>>>,
    pub parameters: BTreeMap<String, NodeRef<Arc<Parameter>>>,
    pub responses: BTreeMap<String, NodeRef<Arc<Response>>>,
    pub security_definitions: BTreeMap<String, NodeRef<Arc<SecurityScheme>>>,
    pub extensions: Extensions,
}

impl Definitions {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Definitions {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("definitions", node)?;
        Ok(Self {
            schemas: build::extract_object_map(DEFINITIONS_LABEL, node, resolver)?,
            parameters: build::extract_object_map(PARAMETERS_LABEL, node, resolver)?,
            responses: build::extract_object_map(RESPONSES_LABEL, node, resolver)?,
            security_definitions: build::extract_object_map(
                SECURITY_DEFINITIONS_LABEL,
                node,
                resolver,
            )?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Definitions {
    const DOMAIN: &'static str = "oasdelta-definitions-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.nested_map(DEFINITIONS_LABEL, &self.schemas);
        builder.nested_map(PARAMETERS_LABEL, &self.parameters);
        builder.nested_map(RESPONSES_LABEL, &self.responses);
        builder.nested_map(SECURITY_DEFINITIONS_LABEL, &self.security_definitions);
        builder.extensions(&self.extensions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasdelta_index::MemoryIndex;
    use serde_json::json;

    #[test]
    fn builds_flat_maps_from_document_root() {
        let index = MemoryIndex::new();
        let node = Node::from_json(&json!({
            "definitions": {"Pet": {"type": "object"}},
            "parameters": {"limit": {"name": "limit", "in": "query"}},
            "responses": {"NotFound": {"description": "missing"}},
            "securityDefinitions": {"key": {"type": "apiKey", "in": "header", "name": "k"}}
        }));
        let defs = Definitions::build(&node, &index).unwrap();
        assert_eq!(defs.schemas.len(), 1);
        assert_eq!(defs.parameters.len(), 1);
        assert_eq!(defs.responses.len(), 1);
        assert_eq!(defs.security_definitions.len(), 1);
    }
}
