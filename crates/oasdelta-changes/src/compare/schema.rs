//! Schema comparison.
//!
//! Recursive over `properties` and `items`. Reference-valued fields are
//! compared by reference string (see `property::check_nested`), which is
//! what keeps comparison of self-referential schemas finite.

use std::collections::{BTreeMap, BTreeSet};

use oasdelta_model::v3::Schema;
use oasdelta_model::{ContentHash, NodeRef};
use serde_json::Value;

use crate::change::{map_totals, option_totals, Change, ChangeTotals, PropertyChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::map_diff::diff_object_map;
use crate::property::{check_narrowing_scalar, check_nested, check_scalar};

/// Detected differences between two schemas.
#[derive(Clone, Debug, Default)]
pub struct SchemaChanges {
    pub changes: PropertyChanges,
    pub properties: BTreeMap<String, SchemaChanges>,
    pub items: Option<Box<SchemaChanges>>,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for SchemaChanges {
    fn total_changes(&self) -> usize {
        let (props, _) = map_totals(&self.properties);
        let items = self.items.as_ref().map_or(0, |i| i.total_changes());
        let (ext, _) = option_totals(&self.extensions);
        self.changes.total_changes() + props + items + ext
    }

    fn total_breaking_changes(&self) -> usize {
        let (_, props) = map_totals(&self.properties);
        let items = self.items.as_ref().map_or(0, |i| i.total_breaking_changes());
        let (_, ext) = option_totals(&self.extensions);
        self.changes.total_breaking_changes() + props + items + ext
    }
}

/// Compare two schemas. Returns `None` when they do not differ.
///
/// Narrowing is breaking: a new `required` entry or a withdrawn `enum`
/// value constrains existing consumers, while the reverse widens the
/// contract and does not.
pub fn compare_schemas(l: &Schema, r: &Schema) -> Option<SchemaChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_scalar("type", &l.schema_type, &r.schema_type, true, &mut changes);
    check_scalar("format", &l.format, &r.format, true, &mut changes);
    check_scalar("title", &l.title, &r.title, false, &mut changes);
    check_scalar("description", &l.description, &r.description, false, &mut changes);
    check_scalar("default", &l.default, &r.default, true, &mut changes);
    check_scalar("nullable", &l.nullable, &r.nullable, true, &mut changes);
    check_scalar("deprecated", &l.deprecated, &r.deprecated, false, &mut changes);
    check_narrowing_scalar("minimum", &l.minimum, &r.minimum, &mut changes);
    check_narrowing_scalar("maximum", &l.maximum, &r.maximum, &mut changes);
    check_narrowing_scalar("minLength", &l.min_length, &r.min_length, &mut changes);
    check_narrowing_scalar("maxLength", &l.max_length, &r.max_length, &mut changes);
    check_required(&l.required, &r.required, &mut changes);
    check_enum(&l.enum_values, &r.enum_values, &mut changes);
    let properties = diff_object_map(
        &l.properties,
        &r.properties,
        "properties",
        &mut changes,
        compare_schemas,
    );
    let items = check_nested("items", &l.items, &r.items, true, &mut changes, compare_schemas)
        .map(Box::new);
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = SchemaChanges {
        changes: PropertyChanges::new(changes),
        properties,
        items,
        extensions,
    };
    (result.total_changes() > 0).then_some(result)
}

// Requiring a new field narrows the contract; releasing one widens it.
fn check_required(l: &NodeRef<Vec<String>>, r: &NodeRef<Vec<String>>, changes: &mut Vec<Change>) {
    let left: BTreeSet<&String> = l.value().into_iter().flatten().collect();
    let right: BTreeSet<&String> = r.value().into_iter().flatten().collect();
    let span = if r.is_empty() { l.span() } else { r.span() };

    for entry in left.difference(&right) {
        changes.push(Change::removed("required", entry.as_str(), false, span));
    }
    for entry in right.difference(&left) {
        changes.push(Change::added("required", entry.as_str(), true, span));
    }
}

// Withdrawing an enum value narrows the contract; adding one widens it.
fn check_enum(l: &NodeRef<Vec<Value>>, r: &NodeRef<Vec<Value>>, changes: &mut Vec<Change>) {
    let left: Vec<&Value> = l.value().into_iter().flatten().collect();
    let right: Vec<&Value> = r.value().into_iter().flatten().collect();
    let span = if r.is_empty() { l.span() } else { r.span() };

    for value in &left {
        if !right.contains(value) {
            changes.push(Change::removed("enum", (*value).clone(), true, span));
        }
    }
    for value in &right {
        if !left.contains(value) {
            changes.push(Change::added("enum", (*value).clone(), false, span));
        }
    }
}
