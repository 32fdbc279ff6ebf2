//! OAuth flows comparison.

use oasdelta_model::v3::{OAuthFlow, OAuthFlows};
use oasdelta_model::ContentHash;

use crate::change::{option_totals, ChangeTotals, PropertyChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::property::{check_nested, check_scalar, check_value_map};

/// Detected differences between two flow containers.
#[derive(Clone, Debug, Default)]
pub struct OAuthFlowsChanges {
    pub changes: PropertyChanges,
    pub implicit: Option<OAuthFlowChanges>,
    pub password: Option<OAuthFlowChanges>,
    pub client_credentials: Option<OAuthFlowChanges>,
    pub authorization_code: Option<OAuthFlowChanges>,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for OAuthFlowsChanges {
    fn total_changes(&self) -> usize {
        [
            option_totals(&self.implicit).0,
            option_totals(&self.password).0,
            option_totals(&self.client_credentials).0,
            option_totals(&self.authorization_code).0,
            option_totals(&self.extensions).0,
        ]
        .iter()
        .sum::<usize>()
            + self.changes.total_changes()
    }

    fn total_breaking_changes(&self) -> usize {
        [
            option_totals(&self.implicit).1,
            option_totals(&self.password).1,
            option_totals(&self.client_credentials).1,
            option_totals(&self.authorization_code).1,
            option_totals(&self.extensions).1,
        ]
        .iter()
        .sum::<usize>()
            + self.changes.total_breaking_changes()
    }
}

/// Compare two flow containers. Returns `None` when they do not differ.
pub fn compare_oauth_flows(l: &OAuthFlows, r: &OAuthFlows) -> Option<OAuthFlowsChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    let implicit = check_nested("implicit", &l.implicit, &r.implicit, true, &mut changes, compare_oauth_flow);
    let password = check_nested("password", &l.password, &r.password, true, &mut changes, compare_oauth_flow);
    let client_credentials = check_nested(
        "clientCredentials",
        &l.client_credentials,
        &r.client_credentials,
        true,
        &mut changes,
        compare_oauth_flow,
    );
    let authorization_code = check_nested(
        "authorizationCode",
        &l.authorization_code,
        &r.authorization_code,
        true,
        &mut changes,
        compare_oauth_flow,
    );
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = OAuthFlowsChanges {
        changes: PropertyChanges::new(changes),
        implicit,
        password,
        client_credentials,
        authorization_code,
        extensions,
    };
    (result.total_changes() > 0).then_some(result)
}

/// Detected differences between two individual flows.
#[derive(Clone, Debug, Default)]
pub struct OAuthFlowChanges {
    pub changes: PropertyChanges,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for OAuthFlowChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes() + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes() + option_totals(&self.extensions).1
    }
}

/// Compare two individual flows. Endpoint moves and scope withdrawals are
/// breaking; scope description edits are not.
pub fn compare_oauth_flow(l: &OAuthFlow, r: &OAuthFlow) -> Option<OAuthFlowChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_scalar("authorizationUrl", &l.authorization_url, &r.authorization_url, true, &mut changes);
    check_scalar("tokenUrl", &l.token_url, &r.token_url, true, &mut changes);
    check_scalar("refreshUrl", &l.refresh_url, &r.refresh_url, false, &mut changes);
    check_value_map("scopes", &l.scopes, &r.scopes, true, false, &mut changes);
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = OAuthFlowChanges {
        changes: PropertyChanges::new(changes),
        extensions,
    };
    (result.total_changes() > 0).then_some(result)
}
