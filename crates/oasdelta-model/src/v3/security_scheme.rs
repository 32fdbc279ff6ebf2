//! The security scheme kind.
//!
//! Describes how operations are secured: HTTP authentication, an API key
//! (header, query, or cookie), mutual TLS, the OAuth2 flows, or OpenID
//! Connect discovery.

use oasdelta_index::ReferenceResolver;
use serde_json::Value;

use crate::build::{self, Buildable};
use crate::error::BuildResult;
use crate::extensions::Extensions;
use crate::hash::{ContentHash, HashBuilder};
use crate::node::Node;
use crate::reference::NodeRef;
use crate::v3::oauth_flows::OAuthFlows;
use crate::v3::FLOWS_LABEL;

/// A low-level security scheme object.
#[derive(Clone, Debug, Default)]
pub struct SecurityScheme {
    pub scheme_type: NodeRef<String>,
    pub description: NodeRef<String>,
    pub name: NodeRef<String>,
    pub location: NodeRef<String>,
    pub scheme: NodeRef<String>,
    pub bearer_format: NodeRef<String>,
    pub flows: NodeRef<std::sync::Arc<OAuthFlows>>,
    pub open_id_connect_url: NodeRef<String>,
    pub extensions: Extensions,
}

impl SecurityScheme {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for SecurityScheme {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("securityScheme", node)?;
        Ok(Self {
            scheme_type: build::extract_string("type", node)?,
            description: build::extract_string("description", node)?,
            name: build::extract_string("name", node)?,
            location: build::extract_string("in", node)?,
            scheme: build::extract_string("scheme", node)?,
            bearer_format: build::extract_string("bearerFormat", node)?,
            flows: build::extract_object(FLOWS_LABEL, node, resolver)?,
            open_id_connect_url: build::extract_string("openIdConnectUrl", node)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for SecurityScheme {
    const DOMAIN: &'static str = "oasdelta-security-scheme-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("type", &self.scheme_type);
        builder.scalar("description", &self.description);
        builder.scalar("name", &self.name);
        builder.scalar("in", &self.location);
        builder.scalar("scheme", &self.scheme);
        builder.scalar("bearerFormat", &self.bearer_format);
        builder.nested(FLOWS_LABEL, &self.flows);
        builder.scalar("openIdConnectUrl", &self.open_id_connect_url);
        builder.extensions(&self.extensions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasdelta_index::MemoryIndex;
    use serde_json::json;

    fn build_scheme(value: &serde_json::Value) -> SecurityScheme {
        let index = MemoryIndex::new();
        SecurityScheme::build(&Node::from_json(value), &index).unwrap()
    }

    #[test]
    fn api_key_scheme_fields() {
        let scheme = build_scheme(&json!({
            "type": "apiKey",
            "in": "header",
            "name": "X-API-KEY"
        }));
        assert_eq!(scheme.scheme_type.value().map(String::as_str), Some("apiKey"));
        assert_eq!(scheme.location.value().map(String::as_str), Some("header"));
        assert_eq!(scheme.name.value().map(String::as_str), Some("X-API-KEY"));
        assert!(scheme.flows.is_empty());
        assert!(scheme.description.is_empty());
    }

    #[test]
    fn oauth2_scheme_builds_nested_flows() {
        let scheme = build_scheme(&json!({
            "type": "oauth2",
            "flows": {
                "implicit": {
                    "authorizationUrl": "https://auth.example.com/authorize",
                    "scopes": {"read:pets": "read pets"}
                }
            }
        }));
        let flows = scheme.flows.value().unwrap();
        assert!(!flows.implicit.is_empty());
        assert!(flows.password.is_empty());
    }

    #[test]
    fn extensions_are_collected() {
        let scheme = build_scheme(&json!({
            "type": "http",
            "scheme": "basic",
            "x-internal-id": "sec-1"
        }));
        assert_eq!(
            scheme.find_extension("x-internal-id").unwrap().value(),
            Some(&json!("sec-1"))
        );
        assert!(scheme.find_extension("x-missing").is_none());
    }

    #[test]
    fn hash_changes_when_location_changes() {
        let header = build_scheme(&json!({"type": "apiKey", "in": "header", "name": "k"}));
        let query = build_scheme(&json!({"type": "apiKey", "in": "query", "name": "k"}));
        assert_ne!(header.content_hash(), query.content_hash());
    }

    #[test]
    fn hash_equal_for_identical_content() {
        let a = build_scheme(&json!({"type": "http", "scheme": "bearer"}));
        let b = build_scheme(&json!({"type": "http", "scheme": "bearer"}));
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn non_mapping_node_is_a_build_error() {
        let index = MemoryIndex::new();
        let err = SecurityScheme::build(&Node::from_json(&json!("oops")), &index).unwrap_err();
        assert!(matches!(err, crate::error::BuildError::NotAMapping { .. }));
    }
}
