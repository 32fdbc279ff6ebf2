//! Vendor extension maps.
//!
//! Any mapping key beginning with `x-` is an extension: an untyped
//! vendor/custom field carried alongside the typed ones. Storage is a
//! `BTreeMap`, so every full-map operation (hashing, diffing) iterates in
//! lexicographic key order by construction.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::node::Node;
use crate::reference::NodeRef;

/// The reserved key prefix for vendor extensions.
pub const EXTENSION_PREFIX: &str = "x-";

/// The extension entries of one object, keyed by full extension name.
///
/// Keys are unique within one object; a repeated key in the source keeps
/// the first occurrence.
#[derive(Clone, Debug, Default)]
pub struct Extensions {
    entries: BTreeMap<String, NodeRef<Value>>,
}

impl Extensions {
    /// Collect all extension entries from a mapping node.
    pub fn extract(node: &Node) -> Self {
        let mut entries = BTreeMap::new();
        for (key, child) in node.entries() {
            if key.starts_with(EXTENSION_PREFIX) && !entries.contains_key(key) {
                entries.insert(key.to_string(), NodeRef::new(child.to_json(), child.span));
            }
        }
        Self { entries }
    }

    /// Look up an extension by its full key (e.g. `x-internal-id`).
    pub fn find(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.entries.get(key)
    }

    /// Iterate entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &NodeRef<Value>)> {
        self.entries.iter()
    }

    /// Number of extension entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the object carries no extensions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
