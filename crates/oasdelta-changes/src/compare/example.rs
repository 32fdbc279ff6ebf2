//! Example comparison. Examples are documentation; nothing here is
//! breaking.

use oasdelta_model::v3::Example;
use oasdelta_model::ContentHash;

use crate::change::{option_totals, ChangeTotals, PropertyChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::property::check_scalar;

/// Detected differences between two examples.
#[derive(Clone, Debug, Default)]
pub struct ExampleChanges {
    pub changes: PropertyChanges,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for ExampleChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes() + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes() + option_totals(&self.extensions).1
    }
}

/// Compare two examples. Returns `None` when they do not differ.
pub fn compare_examples(l: &Example, r: &Example) -> Option<ExampleChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_scalar("summary", &l.summary, &r.summary, false, &mut changes);
    check_scalar("description", &l.description, &r.description, false, &mut changes);
    check_scalar("value", &l.value, &r.value, false, &mut changes);
    check_scalar("externalValue", &l.external_value, &r.external_value, false, &mut changes);
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = ExampleChanges {
        changes: PropertyChanges::new(changes),
        extensions,
    };
    (result.total_changes() > 0).then_some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasdelta_index::MemoryIndex;
    use oasdelta_model::{Buildable, Node};
    use serde_json::json;

    fn example(value: &serde_json::Value) -> Example {
        let index = MemoryIndex::new();
        Example::build(&Node::from_json(value), &index).unwrap()
    }

    #[test]
    fn payload_change_is_detected_but_nonbreaking() {
        let l = example(&json!({"value": {"id": 1}}));
        let r = example(&json!({"value": {"id": 2}}));
        let diff = compare_examples(&l, &r).unwrap();
        assert_eq!(diff.total_changes(), 1);
        assert_eq!(diff.total_breaking_changes(), 0);
    }
}
