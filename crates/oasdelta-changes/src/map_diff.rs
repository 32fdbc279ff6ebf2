//! Generic diff over two string-keyed collections of same-kind objects.
//!
//! Detects added, removed, and common keys; recurses into common keys only
//! when their content hashes differ. Input and output maps are `BTreeMap`s,
//! so summary records and results always come out in lexicographic key
//! order and repeated runs over the same inputs produce identical logs.

use std::collections::BTreeMap;
use std::sync::Arc;

use oasdelta_model::{ContentHash, NodeRef};

use crate::change::Change;

/// Diff two keyed collections of `T`, recursing with `compare`.
///
/// Keys present only in `left` emit one `Removed` record (breaking: a
/// consumer relying on that key loses it); keys present only in `right`
/// emit one `Added` record (non-breaking: new optional capability). Keys
/// present in both are compared only when their hashes differ, and only
/// keys with detected differences appear in the returned map. `label`
/// names the collection in the summary records.
pub fn diff_object_map<T, C, F>(
    left: &BTreeMap<String, NodeRef<Arc<T>>>,
    right: &BTreeMap<String, NodeRef<Arc<T>>>,
    label: &str,
    changes: &mut Vec<Change>,
    compare: F,
) -> BTreeMap<String, C>
where
    T: ContentHash,
    F: Fn(&T, &T) -> Option<C>,
{
    let mut results = BTreeMap::new();

    for (key, l) in left {
        match right.get(key) {
            None => {
                changes.push(Change::removed(label, key.as_str(), true, l.span()));
            }
            Some(r) => {
                let (Some(lv), Some(rv)) = (l.value(), r.value()) else {
                    continue;
                };
                // Entries that are both references are compared by pointer
                // string; their targets diff at their defining site.
                if let (Some(lref), Some(rref)) = (l.reference(), r.reference()) {
                    if lref != rref {
                        changes.push(Change::modified(label, lref, rref, true, r.span()));
                    }
                    continue;
                }
                if lv.content_hash() == rv.content_hash() {
                    continue;
                }
                if let Some(result) = compare(lv, rv) {
                    results.insert(key.clone(), result);
                }
            }
        }
    }

    for (key, r) in right {
        if !left.contains_key(key) {
            changes.push(Change::added(label, key.as_str(), false, r.span()));
        }
    }

    results
}
