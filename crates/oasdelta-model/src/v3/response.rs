//! The response kind.

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
use crate::v3::header::Header;
use crate::v3::link::Link;
use crate::v3::media_type::MediaType;
use crate::v3::{CONTENT_LABEL, HEADERS_LABEL, LINKS_LABEL};

/// A low-level response object.
#[derive(Clone, Debug, Default)]
pub struct Response {
    pub description: NodeRef<String>,
    pub headers: BTreeMap<String, NodeRef<Arc<Header>>>,
    pub content: BTreeMap<String, NodeRef<Arc<MediaType>>>,
    pub links: BTreeMap<String, NodeRef<Arc<Link>>>,
    pub extensions: Extensions,
}

impl Response {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Response {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("response", node)?;
        Ok(Self {
            description: build::extract_string("description", node)?,
            headers: build::extract_object_map(HEADERS_LABEL, node, resolver)?,
            content: build::extract_object_map(CONTENT_LABEL, node, resolver)?,
            links: build::extract_object_map(LINKS_LABEL, node, resolver)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Response {
    const DOMAIN: &'static str = "oasdelta-response-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("description", &self.description);
        builder.nested_map(HEADERS_LABEL, &self.headers);
        builder.nested_map(CONTENT_LABEL, &self.content);
        builder.nested_map(LINKS_LABEL, &self.links);
        builder.extensions(&self.extensions);
    }
}
