//! Callback comparison.
//!
//! Expression keys are opaque runtime templates; any change to one, in
//! either direction except pure addition, alters where or how the producer
//! calls back.

use oasdelta_model::v3::Callback;
use oasdelta_model::ContentHash;

use crate::change::{option_totals, ChangeTotals, PropertyChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::property::check_value_map;

/// Detected differences between two callbacks.
#[derive(Clone, Debug, Default)]
pub struct CallbackChanges {
    pub changes: PropertyChanges,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for CallbackChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes() + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes() + option_totals(&self.extensions).1
    }
}

/// Compare two callbacks. Returns `None` when they do not differ.
pub fn compare_callbacks(l: &Callback, r: &Callback) -> Option<CallbackChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_value_map("", &l.expressions, &r.expressions, true, true, &mut changes);
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = CallbackChanges {
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

    fn callback(value: &serde_json::Value) -> Callback {
        let index = MemoryIndex::new();
        Callback::build(&Node::from_json(value), &index).unwrap()
    }

    #[test]
    fn reworked_expression_body_is_breaking() {
        let l = callback(&json!({
            "{$request.body#/callbackUrl}": {"post": {"description": "webhook"}}
        }));
        let r = callback(&json!({
            "{$request.body#/callbackUrl}": {"put": {"description": "webhook"}}
        }));
        let diff = compare_callbacks(&l, &r).unwrap();
        assert_eq!(diff.total_changes(), 1);
        assert_eq!(diff.changes.changes[0].property, "{$request.body#/callbackUrl}");
        assert!(diff.changes.changes[0].breaking);
    }

    #[test]
    fn new_expression_is_not_breaking() {
        let l = callback(&json!({
            "{$request.body#/callbackUrl}": {"post": {}}
        }));
        let r = callback(&json!({
            "{$request.body#/callbackUrl}": {"post": {}},
            "{$request.body#/failureUrl}": {"post": {}}
        }));
        let diff = compare_callbacks(&l, &r).unwrap();
        assert_eq!(diff.total_changes(), 1);
        assert_eq!(diff.changes.changes[0].kind, ChangeKind::Added);
        assert!(!diff.changes.changes[0].breaking);
    }
}
