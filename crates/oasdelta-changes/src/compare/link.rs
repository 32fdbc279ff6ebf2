//! Link comparison.

use oasdelta_model::v3::Link;
use oasdelta_model::ContentHash;

use crate::change::{option_totals, ChangeTotals, PropertyChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::property::{check_scalar, check_value_map};

/// Detected differences between two links.
#[derive(Clone, Debug, Default)]
pub struct LinkChanges {
    pub changes: PropertyChanges,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for LinkChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes() + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes() + option_totals(&self.extensions).1
    }
}

/// Compare two links. Returns `None` when they do not differ.
///
/// Everything a consumer dereferences at runtime (`operationRef`,
/// `operationId`, `parameters`, `requestBody`) is breaking when it moves.
pub fn compare_links(l: &Link, r: &Link) -> Option<LinkChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_scalar("operationRef", &l.operation_ref, &r.operation_ref, true, &mut changes);
    check_scalar("operationId", &l.operation_id, &r.operation_id, true, &mut changes);
    check_value_map("parameters", &l.parameters, &r.parameters, true, true, &mut changes);
    check_scalar("requestBody", &l.request_body, &r.request_body, true, &mut changes);
    check_scalar("description", &l.description, &r.description, false, &mut changes);
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = LinkChanges {
        changes: PropertyChanges::new(changes),
        extensions,
    };
    (result.total_changes() > 0).then_some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeKind;
    use oasdelta_index::MemoryIndex;
    use oasdelta_model::{Buildable, Node};
    use serde_json::json;

    fn link(value: &serde_json::Value) -> Link {
        let index = MemoryIndex::new();
        Link::build(&Node::from_json(value), &index).unwrap()
    }

    #[test]
    fn retargeted_operation_is_breaking() {
        let l = link(&json!({"operationId": "getPetById"}));
        let r = link(&json!({"operationId": "fetchPet"}));
        let diff = compare_links(&l, &r).unwrap();
        assert_eq!(diff.total_breaking_changes(), 1);
        assert_eq!(diff.changes.changes[0].property, "operationId");
    }

    #[test]
    fn rewired_runtime_parameter_is_breaking() {
        let l = link(&json!({
            "operationId": "getPetById",
            "parameters": {"petId": "$response.body#/id"}
        }));
        let r = link(&json!({
            "operationId": "getPetById",
            "parameters": {"petId": "$response.body#/petId"}
        }));
        let diff = compare_links(&l, &r).unwrap();
        assert_eq!(diff.total_changes(), 1);
        assert_eq!(diff.changes.changes[0].property, "parameters.petId");
        assert_eq!(diff.changes.changes[0].kind, ChangeKind::Modified);
        assert!(diff.changes.changes[0].breaking);
    }
}
