//! Response comparison.

use std::collections::BTreeMap;

use oasdelta_model::v3::{Response, CONTENT_LABEL, HEADERS_LABEL, LINKS_LABEL};
use oasdelta_model::ContentHash;

use crate::change::{map_totals, option_totals, ChangeTotals, PropertyChanges};
use crate::compare::header::{compare_headers, HeaderChanges};
use crate::compare::link::{compare_links, LinkChanges};
use crate::compare::media_type::{compare_media_types, MediaTypeChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::map_diff::diff_object_map;
use crate::property::check_scalar;

/// Detected differences between two responses.
#[derive(Clone, Debug, Default)]
pub struct ResponseChanges {
    pub changes: PropertyChanges,
    pub headers: BTreeMap<String, HeaderChanges>,
    pub content: BTreeMap<String, MediaTypeChanges>,
    pub links: BTreeMap<String, LinkChanges>,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for ResponseChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes()
            + map_totals(&self.headers).0
            + map_totals(&self.content).0
            + map_totals(&self.links).0
            + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes()
            + map_totals(&self.headers).1
            + map_totals(&self.content).1
            + map_totals(&self.links).1
            + option_totals(&self.extensions).1
    }
}

/// Compare two responses. Returns `None` when they do not differ.
pub fn compare_responses(l: &Response, r: &Response) -> Option<ResponseChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_scalar("description", &l.description, &r.description, false, &mut changes);
    let headers = diff_object_map(&l.headers, &r.headers, HEADERS_LABEL, &mut changes, compare_headers);
    let content =
        diff_object_map(&l.content, &r.content, CONTENT_LABEL, &mut changes, compare_media_types);
    let links = diff_object_map(&l.links, &r.links, LINKS_LABEL, &mut changes, compare_links);
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = ResponseChanges {
        changes: PropertyChanges::new(changes),
        headers,
        content,
        links,
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

    fn response(value: &serde_json::Value) -> Response {
        let index = MemoryIndex::new();
        Response::build(&Node::from_json(value), &index).unwrap()
    }

    #[test]
    fn description_edit_is_the_only_nonbreaking_change() {
        let l = response(&json!({"description": "ok"}));
        let r = response(&json!({"description": "success"}));
        let diff = compare_responses(&l, &r).unwrap();
        assert_eq!(diff.total_changes(), 1);
        assert_eq!(diff.total_breaking_changes(), 0);
    }

    #[test]
    fn dropped_header_is_breaking_new_header_is_not() {
        let l = response(&json!({
            "description": "ok",
            "headers": {"X-Rate-Limit": {"schema": {"type": "integer"}}}
        }));
        let r = response(&json!({
            "description": "ok",
            "headers": {"X-Request-Id": {"schema": {"type": "string"}}}
        }));
        let diff = compare_responses(&l, &r).unwrap();

        assert_eq!(diff.total_changes(), 2);
        assert_eq!(diff.total_breaking_changes(), 1);
        let removed =
            diff.changes.changes.iter().find(|c| c.kind == ChangeKind::Removed).unwrap();
        assert_eq!(removed.property, HEADERS_LABEL);
        assert!(removed.breaking);
    }

    #[test]
    fn nested_content_change_is_attributed_to_its_media_type() {
        let l = response(&json!({
            "description": "ok",
            "content": {"application/json": {"schema": {"type": "object"}}}
        }));
        let r = response(&json!({
            "description": "ok",
            "content": {"application/json": {"schema": {"type": "array"}}}
        }));
        let diff = compare_responses(&l, &r).unwrap();
        assert!(diff.content.contains_key("application/json"));
        assert_eq!(diff.total_breaking_changes(), 1);
    }
}
