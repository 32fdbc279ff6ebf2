//! Domain kinds of the current document format.
//!
//! One file per kind. Every kind carries `NodeRef`-wrapped fields, an
//! extension map, a [`crate::Buildable`] impl, and a [`crate::ContentHash`]
//! impl whose field order matches the struct's declaration order.

pub mod callback;
pub mod components;
pub mod example;
pub mod header;
pub mod link;
pub mod media_type;
pub mod oauth_flows;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security_scheme;

pub use callback::Callback;
pub use components::Components;
pub use example::Example;
pub use header::Header;
pub use link::Link;
pub use media_type::MediaType;
pub use oauth_flows::{OAuthFlow, OAuthFlows};
pub use parameter::Parameter;
pub use request_body::RequestBody;
pub use response::Response;
pub use schema::Schema;
pub use security_scheme::SecurityScheme;

/// Field labels, as they appear in source documents and in change logs.
pub const SCHEMAS_LABEL: &str = "schemas";
pub const RESPONSES_LABEL: &str = "responses";
pub const PARAMETERS_LABEL: &str = "parameters";
pub const EXAMPLES_LABEL: &str = "examples";
pub const REQUEST_BODIES_LABEL: &str = "requestBodies";
pub const HEADERS_LABEL: &str = "headers";
pub const SECURITY_SCHEMES_LABEL: &str = "securitySchemes";
pub const LINKS_LABEL: &str = "links";
pub const CALLBACKS_LABEL: &str = "callbacks";
pub const FLOWS_LABEL: &str = "flows";
pub const CONTENT_LABEL: &str = "content";
