//! Request body comparison.

use std::collections::BTreeMap;

use oasdelta_model::v3::{RequestBody, CONTENT_LABEL};
use oasdelta_model::ContentHash;

use crate::change::{map_totals, option_totals, ChangeTotals, PropertyChanges};
use crate::compare::media_type::{compare_media_types, MediaTypeChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::map_diff::diff_object_map;
use crate::property::{check_required_flag, check_scalar};

/// Detected differences between two request bodies.
#[derive(Clone, Debug, Default)]
pub struct RequestBodyChanges {
    pub changes: PropertyChanges,
    pub content: BTreeMap<String, MediaTypeChanges>,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for RequestBodyChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes()
            + map_totals(&self.content).0
            + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes()
            + map_totals(&self.content).1
            + option_totals(&self.extensions).1
    }
}

/// Compare two request bodies. Returns `None` when they do not differ.
pub fn compare_request_bodies(l: &RequestBody, r: &RequestBody) -> Option<RequestBodyChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_scalar("description", &l.description, &r.description, false, &mut changes);
    check_required_flag(&l.required, &r.required, &mut changes);
    let content = diff_object_map(
        &l.content,
        &r.content,
        CONTENT_LABEL,
        &mut changes,
        compare_media_types,
    );
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = RequestBodyChanges {
        changes: PropertyChanges::new(changes),
        content,
        extensions,
    };
    (result.total_changes() > 0).then_some(result)
}
