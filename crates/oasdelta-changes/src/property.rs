//! Property-level comparison helpers shared by every comparator.
//!
//! Each helper takes the property's breaking classification from the
//! caller: narrowing or removing contract surface is breaking, widening or
//! adding optional surface is not, and each kind's comparator knows which
//! of its fields is which. Absent fields are compared by presence first;
//! an absent field and a zero-valued field never compare equal.

use std::collections::BTreeMap;
use std::sync::Arc;

use oasdelta_model::{ContentHash, NodeRef, Span};
use serde_json::Value;

use crate::change::Change;

/// Anchor a change on the right side's position when it has one.
fn context_span<T>(l: &NodeRef<T>, r: &NodeRef<T>) -> Span {
    if r.is_empty() {
        l.span()
    } else {
        r.span()
    }
}

/// Compare one scalar property and append at most one change record.
///
/// `breaking` classifies removals and modifications; additions are
/// recorded as non-breaking (new optional surface).
pub fn check_scalar<T>(
    property: &str,
    l: &NodeRef<T>,
    r: &NodeRef<T>,
    breaking: bool,
    changes: &mut Vec<Change>,
) where
    T: PartialEq + Clone + Into<Value>,
{
    let span = context_span(l, r);
    match (l.value(), r.value()) {
        (None, None) => {}
        (None, Some(after)) => {
            changes.push(Change::added(property, after.clone(), false, span));
        }
        (Some(before), None) => {
            changes.push(Change::removed(property, before.clone(), breaking, span));
        }
        (Some(before), Some(after)) => {
            if before != after {
                changes.push(Change::modified(
                    property,
                    before.clone(),
                    after.clone(),
                    breaking,
                    span,
                ));
            }
        }
    }
}

/// Compare one constraint-valued scalar property (bounds, length limits).
///
/// A constraint appearing or changing narrows the contract and is
/// breaking; a constraint disappearing widens it and is not.
pub fn check_narrowing_scalar<T>(
    property: &str,
    l: &NodeRef<T>,
    r: &NodeRef<T>,
    changes: &mut Vec<Change>,
) where
    T: PartialEq + Clone + Into<Value>,
{
    let span = context_span(l, r);
    match (l.value(), r.value()) {
        (None, None) => {}
        (None, Some(after)) => {
            changes.push(Change::added(property, after.clone(), true, span));
        }
        (Some(before), None) => {
            changes.push(Change::removed(property, before.clone(), false, span));
        }
        (Some(before), Some(after)) => {
            if before != after {
                changes.push(Change::modified(
                    property,
                    before.clone(),
                    after.clone(),
                    true,
                    span,
                ));
            }
        }
    }
}

/// Compare a `required` flag. Requirement switching on (appearing as or
/// flipping to `true`) narrows the contract; switching off or
/// disappearing widens it.
pub fn check_required_flag(l: &NodeRef<bool>, r: &NodeRef<bool>, changes: &mut Vec<Change>) {
    let span = context_span(l, r);
    match (l.value(), r.value()) {
        (None, None) => {}
        (None, Some(after)) => {
            changes.push(Change::added("required", *after, *after, span));
        }
        (Some(before), None) => {
            changes.push(Change::removed("required", *before, false, span));
        }
        (Some(before), Some(after)) => {
            if before != after {
                changes.push(Change::modified("required", *before, *after, *after, span));
            }
        }
    }
}

/// Compare one nested-object property, recursing only when needed.
///
/// When both sides were reached through pointer references the reference
/// strings are compared instead of the targets: the targets' own changes
/// are reported at their defining site, and not recursing is what bounds
/// comparison of cyclic graphs. Otherwise equal content hashes
/// short-circuit, and only genuinely differing objects reach `compare`.
///
/// Added and removed records carry the object's reference string when it
/// was reached through one, and a null payload otherwise.
pub fn check_nested<T, C, F>(
    property: &str,
    l: &NodeRef<Arc<T>>,
    r: &NodeRef<Arc<T>>,
    breaking: bool,
    changes: &mut Vec<Change>,
    compare: F,
) -> Option<C>
where
    T: ContentHash,
    F: FnOnce(&T, &T) -> Option<C>,
{
    let span = context_span(l, r);
    match (l.value(), r.value()) {
        (None, None) => None,
        (None, Some(_)) => {
            let after = r.reference().map_or(Value::Null, Value::from);
            changes.push(Change::added(property, after, false, span));
            None
        }
        (Some(_), None) => {
            let before = l.reference().map_or(Value::Null, Value::from);
            changes.push(Change::removed(property, before, breaking, span));
            None
        }
        (Some(left), Some(right)) => {
            if let (Some(lref), Some(rref)) = (l.reference(), r.reference()) {
                if lref != rref {
                    changes.push(Change::modified(property, lref, rref, breaking, span));
                }
                return None;
            }
            if left.content_hash() == right.content_hash() {
                return None;
            }
            compare(left, right)
        }
    }
}

/// Compare two keyed scalar-value maps (scopes, link parameters, callback
/// expressions), one change record per differing key.
///
/// Records are emitted in lexicographic key order. The property name is
/// `prefix.key`, or the bare key when `prefix` is empty.
pub fn check_value_map<T>(
    prefix: &str,
    l: &BTreeMap<String, NodeRef<T>>,
    r: &BTreeMap<String, NodeRef<T>>,
    removal_breaking: bool,
    modified_breaking: bool,
    changes: &mut Vec<Change>,
) where
    T: PartialEq + Clone + Into<Value>,
{
    let name = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };

    for (key, left) in l {
        match r.get(key) {
            None => {
                if let Some(before) = left.value() {
                    changes.push(Change::removed(
                        name(key),
                        before.clone(),
                        removal_breaking,
                        left.span(),
                    ));
                }
            }
            Some(right) => {
                if let (Some(before), Some(after)) = (left.value(), right.value()) {
                    if before != after {
                        changes.push(Change::modified(
                            name(key),
                            before.clone(),
                            after.clone(),
                            modified_breaking,
                            right.span(),
                        ));
                    }
                }
            }
        }
    }
    for (key, right) in r {
        if !l.contains_key(key) {
            if let Some(after) = right.value() {
                changes.push(Change::added(name(key), after.clone(), false, right.span()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeKind;

    fn populated(s: &str) -> NodeRef<String> {
        NodeRef::new(s.to_string(), Span::default())
    }

    #[test]
    fn equal_scalars_emit_nothing() {
        let mut changes = Vec::new();
        check_scalar("in", &populated("header"), &populated("header"), true, &mut changes);
        assert!(changes.is_empty());
    }

    #[test]
    fn modified_scalar_carries_breaking_flag() {
        let mut changes = Vec::new();
        check_scalar("in", &populated("header"), &populated("query"), true, &mut changes);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Modified);
        assert!(changes[0].breaking);
        assert_eq!(changes[0].before, Some("header".into()));
        assert_eq!(changes[0].after, Some("query".into()));
    }

    #[test]
    fn added_scalar_is_never_breaking() {
        let mut changes = Vec::new();
        check_scalar("description", &NodeRef::empty(), &populated("docs"), true, &mut changes);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Added);
        assert!(!changes[0].breaking);
    }

    #[test]
    fn removed_scalar_takes_breaking_from_caller() {
        let mut changes = Vec::new();
        check_scalar("name", &populated("X-API-KEY"), &NodeRef::empty(), true, &mut changes);
        assert_eq!(changes[0].kind, ChangeKind::Removed);
        assert!(changes[0].breaking);
    }

    #[test]
    fn both_absent_emits_nothing() {
        let mut changes = Vec::new();
        let empty: NodeRef<String> = NodeRef::empty();
        check_scalar("scheme", &empty, &NodeRef::empty(), true, &mut changes);
        assert!(changes.is_empty());
    }

    #[test]
    fn appearing_constraint_is_breaking_disappearing_is_not() {
        let mut changes = Vec::new();
        check_narrowing_scalar("maximum", &NodeRef::empty(), &NodeRef::new(100i64, Span::default()), &mut changes);
        check_narrowing_scalar("minLength", &NodeRef::new(1i64, Span::default()), &NodeRef::empty(), &mut changes);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, ChangeKind::Added);
        assert!(changes[0].breaking);
        assert_eq!(changes[1].kind, ChangeKind::Removed);
        assert!(!changes[1].breaking);
    }

    #[test]
    fn required_flag_breaks_only_when_it_switches_on() {
        let on = NodeRef::new(true, Span::default());
        let off = NodeRef::new(false, Span::default());

        let mut appeared_on = Vec::new();
        check_required_flag(&NodeRef::empty(), &on, &mut appeared_on);
        assert!(appeared_on[0].breaking);

        let mut appeared_off = Vec::new();
        check_required_flag(&NodeRef::empty(), &off, &mut appeared_off);
        assert!(!appeared_off[0].breaking);

        let mut switched_off = Vec::new();
        check_required_flag(&on, &off, &mut switched_off);
        assert_eq!(switched_off[0].kind, ChangeKind::Modified);
        assert!(!switched_off[0].breaking);

        let mut dropped = Vec::new();
        check_required_flag(&on, &NodeRef::empty(), &mut dropped);
        assert_eq!(dropped[0].kind, ChangeKind::Removed);
        assert!(!dropped[0].breaking);
    }

    #[test]
    fn value_map_records_in_key_order() {
        let mut changes = Vec::new();
        let left: BTreeMap<String, NodeRef<String>> = [
            ("write".to_string(), populated("w")),
            ("admin".to_string(), populated("a")),
        ]
        .into();
        let right: BTreeMap<String, NodeRef<String>> =
            [("read".to_string(), populated("r"))].into();
        check_value_map("scopes", &left, &right, true, false, &mut changes);

        let props: Vec<&str> = changes.iter().map(|c| c.property.as_str()).collect();
        assert_eq!(props, vec!["scopes.admin", "scopes.write", "scopes.read"]);
        assert!(changes[0].breaking && changes[1].breaking);
        assert!(!changes[2].breaking);
    }
}
