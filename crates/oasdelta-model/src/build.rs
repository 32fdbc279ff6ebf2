//! Object construction from raw nodes.
//!
//! Each domain kind implements [`Buildable`]; the free extraction helpers
//! here do the per-field work. Nested objects reached through a `$ref` are
//! resolved to the already-built target via the index, never rebuilt: that
//! is what gives two referencing sites one shared instance and what keeps
//! self-referential structures from recursing forever.

use std::collections::BTreeMap;
use std::sync::Arc;

use oasdelta_index::ReferenceResolver;
use serde_json::Value;
use tracing::trace;

use crate::error::{BuildError, BuildResult};
use crate::node::Node;
use crate::reference::NodeRef;

/// A domain kind that can be built from a raw document node.
pub trait Buildable: Sized {
    /// Build a fully populated object from `node`, resolving any pointer
    /// references through `resolver`. A malformed node fails the whole
    /// subtree; no partial object is returned.
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self>;
}

/// Require `node` to be a mapping; every kind's builder starts here.
pub fn require_mapping(what: &str, node: &Node) -> BuildResult<()> {
    if node.is_mapping() {
        Ok(())
    } else {
        Err(BuildError::NotAMapping {
            field: what.to_string(),
            span: node.span,
        })
    }
}

/// Extract an optional string field.
pub fn extract_string(key: &str, node: &Node) -> BuildResult<NodeRef<String>> {
    match node.find(key) {
        None => Ok(NodeRef::empty()),
        Some(child) => match child.as_str() {
            Some(s) => Ok(NodeRef::new(s.to_string(), child.span)),
            None => Err(invalid(key, "a string", child)),
        },
    }
}

/// Extract an optional boolean field.
pub fn extract_bool(key: &str, node: &Node) -> BuildResult<NodeRef<bool>> {
    match node.find(key) {
        None => Ok(NodeRef::empty()),
        Some(child) => match child.value {
            crate::node::NodeValue::Bool(b) => Ok(NodeRef::new(b, child.span)),
            _ => Err(invalid(key, "a boolean", child)),
        },
    }
}

/// Extract an optional integer field.
pub fn extract_integer(key: &str, node: &Node) -> BuildResult<NodeRef<i64>> {
    match node.find(key) {
        None => Ok(NodeRef::empty()),
        Some(child) => match child.value {
            crate::node::NodeValue::Integer(i) => Ok(NodeRef::new(i, child.span)),
            _ => Err(invalid(key, "an integer", child)),
        },
    }
}

/// Extract an optional numeric field; integer values widen losslessly
/// within the i64 range documents use in practice.
pub fn extract_number(key: &str, node: &Node) -> BuildResult<NodeRef<f64>> {
    match node.find(key) {
        None => Ok(NodeRef::empty()),
        Some(child) => match child.value {
            crate::node::NodeValue::Float(f) => Ok(NodeRef::new(f, child.span)),
            crate::node::NodeValue::Integer(i) => Ok(NodeRef::new(i as f64, child.span)),
            _ => Err(invalid(key, "a number", child)),
        },
    }
}

/// Extract an optional field kept as untyped JSON (e.g. example payloads).
pub fn extract_value(key: &str, node: &Node) -> BuildResult<NodeRef<Value>> {
    Ok(match node.find(key) {
        None => NodeRef::empty(),
        Some(child) => NodeRef::new(child.to_json(), child.span),
    })
}

/// Extract an optional sequence-of-strings field.
pub fn extract_string_list(key: &str, node: &Node) -> BuildResult<NodeRef<Vec<String>>> {
    match node.find(key) {
        None => Ok(NodeRef::empty()),
        Some(child) => match &child.value {
            crate::node::NodeValue::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) => out.push(s.to_string()),
                        None => return Err(invalid(key, "a sequence of strings", item)),
                    }
                }
                Ok(NodeRef::new(out, child.span))
            }
            _ => Err(invalid(key, "a sequence of strings", child)),
        },
    }
}

/// Extract an optional sequence field kept as untyped JSON items.
pub fn extract_value_list(key: &str, node: &Node) -> BuildResult<NodeRef<Vec<Value>>> {
    match node.find(key) {
        None => Ok(NodeRef::empty()),
        Some(child) => match &child.value {
            crate::node::NodeValue::Sequence(items) => Ok(NodeRef::new(
                items.iter().map(Node::to_json).collect(),
                child.span,
            )),
            _ => Err(invalid(key, "a sequence", child)),
        },
    }
}

/// Extract a mapping of string values (e.g. OAuth scopes).
pub fn extract_string_map(
    key: &str,
    node: &Node,
) -> BuildResult<BTreeMap<String, NodeRef<String>>> {
    let mut out = BTreeMap::new();
    if let Some(child) = node.find(key) {
        if !child.is_mapping() {
            return Err(invalid(key, "a mapping", child));
        }
        for (entry_key, entry) in child.entries() {
            match entry.as_str() {
                Some(s) => {
                    out.insert(entry_key.to_string(), NodeRef::new(s.to_string(), entry.span));
                }
                None => return Err(invalid(entry_key, "a string", entry)),
            }
        }
    }
    Ok(out)
}

/// Extract a mapping of untyped values (e.g. link parameters).
pub fn extract_value_map(key: &str, node: &Node) -> BuildResult<BTreeMap<String, NodeRef<Value>>> {
    let mut out = BTreeMap::new();
    if let Some(child) = node.find(key) {
        if !child.is_mapping() {
            return Err(invalid(key, "a mapping", child));
        }
        for (entry_key, entry) in child.entries() {
            out.insert(entry_key.to_string(), NodeRef::new(entry.to_json(), entry.span));
        }
    }
    Ok(out)
}

/// Build a nested object from `node` itself, resolving a `$ref` if present.
///
/// Resolution consults the index only: a hit is the shared, already-built
/// instance; a miss is a hard error. A reference never triggers a build.
pub fn build_object<T>(
    node: &Node,
    resolver: &dyn ReferenceResolver,
) -> BuildResult<NodeRef<Arc<T>>>
where
    T: Buildable + Send + Sync + 'static,
{
    if let Some((reference, span)) = node.reference() {
        let target =
            resolver
                .resolve(reference)
                .ok_or_else(|| BuildError::UnresolvedReference {
                    reference: reference.to_string(),
                    span,
                })?;
        let target = target
            .downcast::<T>()
            .map_err(|_| BuildError::ReferenceKindMismatch {
                reference: reference.to_string(),
                expected: std::any::type_name::<T>(),
                span,
            })?;
        trace!(reference = %reference, "resolved shared instance");
        return Ok(NodeRef::resolved(target, span, reference));
    }
    let built = T::build(node, resolver)?;
    Ok(NodeRef::new(Arc::new(built), node.span))
}

/// Extract an optional nested-object field by key.
pub fn extract_object<T>(
    key: &str,
    node: &Node,
    resolver: &dyn ReferenceResolver,
) -> BuildResult<NodeRef<Arc<T>>>
where
    T: Buildable + Send + Sync + 'static,
{
    match node.find(key) {
        None => Ok(NodeRef::empty()),
        Some(child) => build_object(child, resolver),
    }
}

/// Extract a keyed collection of nested objects (e.g. `components.schemas`).
pub fn extract_object_map<T>(
    key: &str,
    node: &Node,
    resolver: &dyn ReferenceResolver,
) -> BuildResult<BTreeMap<String, NodeRef<Arc<T>>>>
where
    T: Buildable + Send + Sync + 'static,
{
    let mut out = BTreeMap::new();
    if let Some(child) = node.find(key) {
        if !child.is_mapping() {
            return Err(invalid(key, "a mapping", child));
        }
        for (entry_key, entry) in child.entries() {
            out.insert(entry_key.to_string(), build_object(entry, resolver)?);
        }
    }
    Ok(out)
}

fn invalid(field: &str, expected: &'static str, node: &Node) -> BuildError {
    BuildError::InvalidField {
        field: field.to_string(),
        expected,
        span: node.span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasdelta_index::MemoryIndex;
    use serde_json::json;

    use crate::v3::Schema;

    #[test]
    fn missing_scalar_is_empty_not_error() {
        let node = Node::from_json(&json!({"type": "apiKey"}));
        let field = extract_string("description", &node).unwrap();
        assert!(field.is_empty());
    }

    #[test]
    fn wrong_scalar_type_is_an_error() {
        let node = Node::from_json(&json!({"required": "yes"}));
        let err = extract_bool("required", &node).unwrap_err();
        assert!(matches!(err, BuildError::InvalidField { field, .. } if field == "required"));
    }

    #[test]
    fn unresolved_reference_fails_with_position() {
        let index = MemoryIndex::new();
        let node = Node::from_json(&json!({"$ref": "#/components/schemas/Missing"}));
        let err = build_object::<Schema>(&node, &index).unwrap_err();
        assert!(matches!(err, BuildError::UnresolvedReference { reference, .. }
            if reference == "#/components/schemas/Missing"));
    }

    #[test]
    fn reference_to_wrong_kind_fails() {
        let index = MemoryIndex::new();
        index
            .insert("#/components/schemas/Pet", Arc::new("not a schema".to_string()))
            .unwrap();
        let node = Node::from_json(&json!({"$ref": "#/components/schemas/Pet"}));
        let err = build_object::<Schema>(&node, &index).unwrap_err();
        assert!(matches!(err, BuildError::ReferenceKindMismatch { .. }));
    }

    #[test]
    fn two_sites_share_one_resolved_instance() {
        let index = MemoryIndex::new();
        let pet_node = Node::from_json(&json!({"type": "object", "title": "Pet"}));
        let pet: Arc<Schema> = Arc::new(Schema::build(&pet_node, &index).unwrap());
        index
            .insert("#/components/schemas/Pet", Arc::clone(&pet))
            .unwrap();

        let site = Node::from_json(&json!({"$ref": "#/components/schemas/Pet"}));
        let a = build_object::<Schema>(&site, &index).unwrap();
        let b = build_object::<Schema>(&site, &index).unwrap();

        assert!(a.is_reference());
        assert!(Arc::ptr_eq(a.value().unwrap(), b.value().unwrap()));
        assert!(Arc::ptr_eq(a.value().unwrap(), &pet));
    }

    #[test]
    fn string_map_extraction() {
        let node = Node::from_json(&json!({
            "scopes": {"read:pets": "read pets", "write:pets": "write pets"}
        }));
        let scopes = extract_string_map("scopes", &node).unwrap();
        assert_eq!(scopes.len(), 2);
        assert_eq!(
            scopes["read:pets"].value().map(String::as_str),
            Some("read pets")
        );
    }
}
