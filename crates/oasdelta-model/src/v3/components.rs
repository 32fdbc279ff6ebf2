//! The reusable components container: nine keyed sub-collections plus
//! extensions.

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
use crate::v3::{
    Callback, Example, Header, Link, Parameter, RequestBody, Response, Schema, SecurityScheme,
    CALLBACKS_LABEL, EXAMPLES_LABEL, HEADERS_LABEL, LINKS_LABEL, PARAMETERS_LABEL,
    REQUEST_BODIES_LABEL, RESPONSES_LABEL, SCHEMAS_LABEL, SECURITY_SCHEMES_LABEL,
};

/// The components container of one document version.
#[derive(Clone, Debug, Default)]
pub struct Components {
    pub schemas: BTreeMap<String, NodeRef<Arc<Schema>>>,
    pub responses: BTreeMap<String, NodeRef<Arc<Response>>>,
    pub parameters: BTreeMap<String, NodeRef<Arc<Parameter>>>,
    pub examples: BTreeMap<String, NodeRef<Arc<Example>>>,
    pub request_bodies: BTreeMap<String, NodeRef<Arc<RequestBody>>>,
    pub headers: BTreeMap<String, NodeRef<Arc<Header>>>,
    pub security_schemes: BTreeMap<String, NodeRef<Arc<SecurityScheme>>>,
    pub links: BTreeMap<String, NodeRef<Arc<Link>>>,
    pub callbacks: BTreeMap<String, NodeRef<Arc<Callback>>>,
    pub extensions: Extensions,
}

impl Components {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Components {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("components", node)?;
        Ok(Self {
            schemas: build::extract_object_map(SCHEMAS_LABEL, node, resolver)?,
            responses: build::extract_object_map(RESPONSES_LABEL, node, resolver)?,
            parameters: build::extract_object_map(PARAMETERS_LABEL, node, resolver)?,
            examples: build::extract_object_map(EXAMPLES_LABEL, node, resolver)?,
            request_bodies: build::extract_object_map(REQUEST_BODIES_LABEL, node, resolver)?,
            headers: build::extract_object_map(HEADERS_LABEL, node, resolver)?,
            security_schemes: build::extract_object_map(SECURITY_SCHEMES_LABEL, node, resolver)?,
            links: build::extract_object_map(LINKS_LABEL, node, resolver)?,
            callbacks: build::extract_object_map(CALLBACKS_LABEL, node, resolver)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Components {
    const DOMAIN: &'static str = "oasdelta-components-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.nested_map(SCHEMAS_LABEL, &self.schemas);
        builder.nested_map(RESPONSES_LABEL, &self.responses);
        builder.nested_map(PARAMETERS_LABEL, &self.parameters);
        builder.nested_map(EXAMPLES_LABEL, &self.examples);
        builder.nested_map(REQUEST_BODIES_LABEL, &self.request_bodies);
        builder.nested_map(HEADERS_LABEL, &self.headers);
        builder.nested_map(SECURITY_SCHEMES_LABEL, &self.security_schemes);
        builder.nested_map(LINKS_LABEL, &self.links);
        builder.nested_map(CALLBACKS_LABEL, &self.callbacks);
        builder.extensions(&self.extensions);
    }
}
