//! Diffing of vendor extension maps.
//!
//! Extension entries are vendor metadata, not contract surface, so every
//! extension change is classified non-breaking in both directions. Records
//! come out in lexicographic key order.

use oasdelta_model::Extensions;
use serde::{Deserialize, Serialize};

use crate::change::{Change, ChangeTotals, PropertyChanges};

/// Detected differences between two extension maps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionChanges {
    pub changes: PropertyChanges,
}

impl ChangeTotals for ExtensionChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes()
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes()
    }
}

/// Compare two extension maps. Returns `None` when they do not differ.
pub fn compare_extensions(l: &Extensions, r: &Extensions) -> Option<ExtensionChanges> {
    let mut changes = Vec::new();

    for (key, left) in l.iter() {
        match r.find(key) {
            None => {
                if let Some(before) = left.value() {
                    changes.push(Change::removed(key, before.clone(), false, left.span()));
                }
            }
            Some(right) => {
                if let (Some(before), Some(after)) = (left.value(), right.value()) {
                    if before != after {
                        changes.push(Change::modified(
                            key,
                            before.clone(),
                            after.clone(),
                            false,
                            right.span(),
                        ));
                    }
                }
            }
        }
    }
    for (key, right) in r.iter() {
        if l.find(key).is_none() {
            if let Some(after) = right.value() {
                changes.push(Change::added(key, after.clone(), false, right.span()));
            }
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(ExtensionChanges {
            changes: PropertyChanges::new(changes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeKind;
    use oasdelta_model::Node;
    use serde_json::json;

    fn extensions(value: &serde_json::Value) -> Extensions {
        Extensions::extract(&Node::from_json(value))
    }

    #[test]
    fn identical_extensions_are_no_difference() {
        let l = extensions(&json!({"x-owner": "team-a"}));
        let r = extensions(&json!({"x-owner": "team-a"}));
        assert!(compare_extensions(&l, &r).is_none());
    }

    #[test]
    fn added_extension_is_nonbreaking() {
        let l = extensions(&json!({}));
        let r = extensions(&json!({"x-internal-id": "abc-123"}));
        let diff = compare_extensions(&l, &r).unwrap();
        assert_eq!(diff.total_changes(), 1);
        assert_eq!(diff.total_breaking_changes(), 0);
        assert_eq!(diff.changes.changes[0].kind, ChangeKind::Added);
        assert_eq!(diff.changes.changes[0].property, "x-internal-id");
    }

    #[test]
    fn removed_extension_is_also_nonbreaking() {
        let l = extensions(&json!({"x-internal-id": "abc-123"}));
        let r = extensions(&json!({}));
        let diff = compare_extensions(&l, &r).unwrap();
        assert_eq!(diff.changes.changes[0].kind, ChangeKind::Removed);
        assert!(!diff.changes.changes[0].breaking);
    }

    #[test]
    fn modified_extension_value() {
        let l = extensions(&json!({"x-audit": {"level": 1}}));
        let r = extensions(&json!({"x-audit": {"level": 2}}));
        let diff = compare_extensions(&l, &r).unwrap();
        assert_eq!(diff.changes.changes[0].kind, ChangeKind::Modified);
        assert_eq!(diff.changes.changes[0].before, Some(json!({"level": 1})));
        assert_eq!(diff.changes.changes[0].after, Some(json!({"level": 2})));
    }

    #[test]
    fn records_follow_key_order() {
        let l = extensions(&json!({"x-b": 1, "x-a": 1}));
        let r = extensions(&json!({"x-c": 1}));
        let diff = compare_extensions(&l, &r).unwrap();
        let props: Vec<&str> = diff
            .changes
            .changes
            .iter()
            .map(|c| c.property.as_str())
            .collect();
        assert_eq!(props, vec!["x-a", "x-b", "x-c"]);
    }
}
