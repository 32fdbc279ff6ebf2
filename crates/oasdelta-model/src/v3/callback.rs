//! The callback kind.
//!
//! A callback maps runtime expressions (e.g.
//! `{$request.body#/callbackUrl}`) to out-of-band request descriptions.
//! The expression payloads are kept untyped; every non-extension key is an
//! expression.

use std::collections::BTreeMap;

use oasdelta_index::ReferenceResolver;
use serde_json::Value;

use crate::build::{self, Buildable};
use crate::error::BuildResult;
use crate::extensions::{Extensions, EXTENSION_PREFIX};
use crate::hash::{ContentHash, HashBuilder};
use crate::node::Node;
use crate::reference::NodeRef;

/// A low-level callback object.
#[derive(Clone, Debug, Default)]
pub struct Callback {
    pub expressions: BTreeMap<String, NodeRef<Value>>,
    pub extensions: Extensions,
}

impl Callback {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Callback {
    fn build(node: &Node, _resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("callback", node)?;
        let mut expressions = BTreeMap::new();
        for (key, child) in node.entries() {
            if !key.starts_with(EXTENSION_PREFIX) {
                expressions.insert(key.to_string(), NodeRef::new(child.to_json(), child.span));
            }
        }
        Ok(Self {
            expressions,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Callback {
    const DOMAIN: &'static str = "oasdelta-callback-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar_map("expressions", &self.expressions);
        builder.extensions(&self.extensions);
    }
}
