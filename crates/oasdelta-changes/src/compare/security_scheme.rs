//! Security scheme comparison.

use oasdelta_model::v3::{SecurityScheme, FLOWS_LABEL};
use oasdelta_model::ContentHash;

use crate::change::{option_totals, ChangeTotals, PropertyChanges};
use crate::compare::oauth_flows::{compare_oauth_flows, OAuthFlowsChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::property::{check_nested, check_scalar};

/// Detected differences between two security schemes.
#[derive(Clone, Debug, Default)]
pub struct SecuritySchemeChanges {
    pub changes: PropertyChanges,
    pub flows: Option<OAuthFlowsChanges>,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for SecuritySchemeChanges {
    fn total_changes(&self) -> usize {
        let (flows, _) = option_totals(&self.flows);
        let (ext, _) = option_totals(&self.extensions);
        self.changes.total_changes() + flows + ext
    }

    fn total_breaking_changes(&self) -> usize {
        let (_, flows) = option_totals(&self.flows);
        let (_, ext) = option_totals(&self.extensions);
        self.changes.total_breaking_changes() + flows + ext
    }
}

/// Compare two security schemes. Returns `None` when they do not differ.
///
/// Moving or renaming the credential (`type`, `name`, `in`, `scheme`)
/// invalidates existing clients and is breaking; documentation fields are
/// not.
pub fn compare_security_schemes(l: &SecurityScheme, r: &SecurityScheme) -> Option<SecuritySchemeChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_scalar("type", &l.scheme_type, &r.scheme_type, true, &mut changes);
    check_scalar("description", &l.description, &r.description, false, &mut changes);
    check_scalar("name", &l.name, &r.name, true, &mut changes);
    check_scalar("in", &l.location, &r.location, true, &mut changes);
    check_scalar("scheme", &l.scheme, &r.scheme, true, &mut changes);
    check_scalar("bearerFormat", &l.bearer_format, &r.bearer_format, false, &mut changes);
    let flows = check_nested(
        FLOWS_LABEL,
        &l.flows,
        &r.flows,
        true,
        &mut changes,
        compare_oauth_flows,
    );
    check_scalar(
        "openIdConnectUrl",
        &l.open_id_connect_url,
        &r.open_id_connect_url,
        true,
        &mut changes,
    );
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = SecuritySchemeChanges {
        changes: PropertyChanges::new(changes),
        flows,
        extensions,
    };
    (result.total_changes() > 0).then_some(result)
}
