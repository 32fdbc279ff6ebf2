//! Media type comparison.

use oasdelta_model::v3::MediaType;
use oasdelta_model::ContentHash;

use crate::change::{option_totals, ChangeTotals, PropertyChanges};
use crate::compare::schema::{compare_schemas, SchemaChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::property::{check_nested, check_scalar};

/// Detected differences between two media types.
#[derive(Clone, Debug, Default)]
pub struct MediaTypeChanges {
    pub changes: PropertyChanges,
    pub schema: Option<SchemaChanges>,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for MediaTypeChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes()
            + option_totals(&self.schema).0
            + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes()
            + option_totals(&self.schema).1
            + option_totals(&self.extensions).1
    }
}

/// Compare two media types. Returns `None` when they do not differ.
pub fn compare_media_types(l: &MediaType, r: &MediaType) -> Option<MediaTypeChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    let schema = check_nested("schema", &l.schema, &r.schema, true, &mut changes, compare_schemas);
    check_scalar("example", &l.example, &r.example, false, &mut changes);
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = MediaTypeChanges {
        changes: PropertyChanges::new(changes),
        schema,
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

    fn media(value: &serde_json::Value) -> MediaType {
        let index = MemoryIndex::new();
        MediaType::build(&Node::from_json(value), &index).unwrap()
    }

    #[test]
    fn schema_swap_is_breaking() {
        let l = media(&json!({"schema": {"type": "object"}}));
        let r = media(&json!({"schema": {"type": "array", "items": {"type": "object"}}}));
        let diff = compare_media_types(&l, &r).unwrap();
        assert!(diff.total_breaking_changes() >= 1);
    }
}
