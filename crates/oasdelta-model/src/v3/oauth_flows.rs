//! The OAuth flows container and the individual flow kind.

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

/// The set of OAuth2 flows a security scheme supports.
#[derive(Clone, Debug, Default)]
pub struct OAuthFlows {
    pub implicit: NodeRef<Arc<OAuthFlow>>,
    pub password: NodeRef<Arc<OAuthFlow>>,
    pub client_credentials: NodeRef<Arc<OAuthFlow>>,
    pub authorization_code: NodeRef<Arc<OAuthFlow>>,
    pub extensions: Extensions,
}

impl OAuthFlows {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for OAuthFlows {
    fn build(node: &Node, resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("flows", node)?;
        Ok(Self {
            implicit: build::extract_object("implicit", node, resolver)?,
            password: build::extract_object("password", node, resolver)?,
            client_credentials: build::extract_object("clientCredentials", node, resolver)?,
            authorization_code: build::extract_object("authorizationCode", node, resolver)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for OAuthFlows {
    const DOMAIN: &'static str = "oasdelta-oauth-flows-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.nested("implicit", &self.implicit);
        builder.nested("password", &self.password);
        builder.nested("clientCredentials", &self.client_credentials);
        builder.nested("authorizationCode", &self.authorization_code);
        builder.extensions(&self.extensions);
    }
}

/// One OAuth2 flow: its endpoints and available scopes.
#[derive(Clone, Debug, Default)]
pub struct OAuthFlow {
    pub authorization_url: NodeRef<String>,
    pub token_url: NodeRef<String>,
    pub refresh_url: NodeRef<String>,
    pub scopes: BTreeMap<String, NodeRef<String>>,
    pub extensions: Extensions,
}

impl OAuthFlow {
    /// Locate an extension by its full key.
    pub fn find_extension(&self, key: &str) -> Option<&NodeRef<Value>> {
        self.extensions.find(key)
    }
}

impl Buildable for OAuthFlow {
    fn build(node: &Node, _resolver: &dyn ReferenceResolver) -> BuildResult<Self> {
        build::require_mapping("flow", node)?;
        Ok(Self {
            authorization_url: build::extract_string("authorizationUrl", node)?,
            token_url: build::extract_string("tokenUrl", node)?,
            refresh_url: build::extract_string("refreshUrl", node)?,
            scopes: build::extract_string_map("scopes", node)?,
            extensions: Extensions::extract(node),
        })
    }
}

impl ContentHash for OAuthFlow {
    const DOMAIN: &'static str = "oasdelta-oauth-flow-v1";

    fn collect(&self, builder: &mut HashBuilder) {
        builder.scalar("authorizationUrl", &self.authorization_url);
        builder.scalar("tokenUrl", &self.token_url);
        builder.scalar("refreshUrl", &self.refresh_url);
        builder.scalar_map("scopes", &self.scopes);
        builder.extensions(&self.extensions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasdelta_index::MemoryIndex;
    use serde_json::json;

    #[test]
    fn builds_all_four_flow_kinds() {
        let index = MemoryIndex::new();
        let node = Node::from_json(&json!({
            "implicit": {"authorizationUrl": "https://a", "scopes": {}},
            "password": {"tokenUrl": "https://t", "scopes": {}},
            "clientCredentials": {"tokenUrl": "https://t", "scopes": {}},
            "authorizationCode": {
                "authorizationUrl": "https://a",
                "tokenUrl": "https://t",
                "scopes": {"admin": "full access"}
            }
        }));
        let flows = OAuthFlows::build(&node, &index).unwrap();
        assert!(!flows.implicit.is_empty());
        assert!(!flows.password.is_empty());
        assert!(!flows.client_credentials.is_empty());
        let code = flows.authorization_code.value().unwrap();
        assert_eq!(code.scopes["admin"].value().map(String::as_str), Some("full access"));
    }

    #[test]
    fn scope_change_changes_flow_hash() {
        let index = MemoryIndex::new();
        let a = OAuthFlow::build(
            &Node::from_json(&json!({"tokenUrl": "https://t", "scopes": {"read": "r"}})),
            &index,
        )
        .unwrap();
        let b = OAuthFlow::build(
            &Node::from_json(&json!({"tokenUrl": "https://t", "scopes": {"read": "r", "write": "w"}})),
            &index,
        )
        .unwrap();
        assert_ne!(a.content_hash(), b.content_hash());
    }
}
