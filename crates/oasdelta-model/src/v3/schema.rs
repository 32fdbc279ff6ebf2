//! The schema kind.
//!
//! Schemas nest into themselves through `properties` and `items`, and the
//! source format permits self-referential and mutually-referential
//! definitions. Those cycles never recurse here: a `$ref` resolves to the
//! shared already-built instance, and hashing represents references by
//! their reference string rather than their target's digest.

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

/// A low-level schema object.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    pub schema_type: NodeRef<String>,
    pub format: NodeRef<String>,
    pub title: NodeRef<String>,
    pub description: NodeRef<String>,
    pub default: NodeRef<Value>,
    pub nullable: NodeRef<bool>,
    pub deprecated: NodeRef<bool>,
    pub minimum: NodeRef<f64>,
    pub maximum: NodeRef<f64>,
    pub min_length: NodeRef<i64>,
    pub max_length: NodeRef<i64>,
    pub required: NodeRef<Vec<String>>,
    pub enum_values: NodeRef<Vec<Value>>,
    pub properties: BTreeMap<String, NodeRef<Arc<Schema>>>,
    pub items: NodeRef<Arc<Schema>>,
    pub extensions: Extensions,
}

impl Schema {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for Schema {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("schema", node)?;
        Ok(Self {
            schema_type: build::extract_string("type", node)?,
            format: build::extract_string("format", node)?,
            title: build::extract_string("title", node)?,
            description: build::extract_string("description", node)?,
            default: build::extract_value("default", node)?,
            nullable: build::extract_bool("nullable", node)?,
            deprecated: build::extract_bool("deprecated", node)?,
            minimum: build::extract_number("minimum", node)?,
            maximum: build::extract_number("maximum", node)?,
            min_length: build::extract_integer("minLength", node)?,
            max_length: build::extract_integer("maxLength", node)?,
            required: build::extract_string_list("required", node)?,
            enum_values: build::extract_value_list("enum", node)?,
            properties: build::extract_object_map("properties", node, resolver)?,
            items: build::extract_object("items", node, resolver)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for Schema {
    const DOMAIN: &'static str = "oasdelta-schema-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("type", &self.schema_type);
        builder.scalar("format", &self.format);
        builder.scalar("title", &self.title);
        builder.scalar("description", &self.description);
        builder.scalar("default", &self.default);
        builder.scalar("nullable", &self.nullable);
        builder.scalar("deprecated", &self.deprecated);
        builder.scalar("minimum", &self.minimum);
        builder.scalar("maximum", &self.maximum);
        builder.scalar("minLength", &self.min_length);
        builder.scalar("maxLength", &self.max_length);
        builder.list("required", &self.required);
        builder.list("enum", &self.enum_values);
        builder.nested_map("properties", &self.properties);
        builder.nested("items", &self.items);
        builder.extensions(&self.extensions);
    }
}
