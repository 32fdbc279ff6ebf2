//! Per-kind comparators and their change-set types.
//!
//! Every comparator follows the same contract: check content hashes first
//! and return `None` when they match, otherwise walk the kind's fields and
//! return `None` unless at least one change was detected. An absent
//! change-set always means "no difference".

pub mod callback;
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

pub use callback::{compare_callbacks, CallbackChanges};
pub use example::{compare_examples, ExampleChanges};
pub use header::{compare_headers, HeaderChanges};
pub use link::{compare_links, LinkChanges};
pub use media_type::{compare_media_types, MediaTypeChanges};
pub use oauth_flows::{compare_oauth_flow, compare_oauth_flows, OAuthFlowChanges, OAuthFlowsChanges};
pub use parameter::{compare_parameters, ParameterChanges};
pub use request_body::{compare_request_bodies, RequestBodyChanges};
pub use response::{compare_responses, ResponseChanges};
pub use schema::{compare_schemas, SchemaChanges};
pub use security_scheme::{compare_security_schemes, SecuritySchemeChanges};
