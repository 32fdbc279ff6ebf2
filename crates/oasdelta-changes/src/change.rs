//! The change record and change log types.

use oasdelta_model::Span;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened to a property or key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Modified => "modified",
        };
        write!(f, "{s}")
    }
}

/// One atomic detected difference. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// The property or collection label the change applies to.
    pub property: String,
    pub kind: ChangeKind,
    /// The prior value, absent for additions.
    pub before: Option<Value>,
    /// The new value, absent for removals.
    pub after: Option<Value>,
    /// Whether this difference can invalidate a consumer of the prior
    /// version.
    pub breaking: bool,
    /// Where in the source document the change is anchored.
    pub span: Span,
}

impl Change {
    /// A value that appeared on the right side only.
    pub fn added(
        property: impl Into<String>,
        after: impl Into<Value>,
        breaking: bool,
        span: Span,
    ) -> Self {
        Self {
            property: property.into(),
            kind: ChangeKind::Added,
            before: None,
            after: Some(after.into()),
            breaking,
            span,
        }
    }

    /// A value that disappeared from the left side.
    pub fn removed(
        property: impl Into<String>,
        before: impl Into<Value>,
        breaking: bool,
        span: Span,
    ) -> Self {
        Self {
            property: property.into(),
            kind: ChangeKind::Removed,
            before: Some(before.into()),
            after: None,
            breaking,
            span,
        }
    }

    /// A value present on both sides with different content.
    pub fn modified(
        property: impl Into<String>,
        before: impl Into<Value>,
        after: impl Into<Value>,
        breaking: bool,
        span: Span,
    ) -> Self {
        Self {
            property: property.into(),
            kind: ChangeKind::Modified,
            before: Some(before.into()),
            after: Some(after.into()),
            breaking,
            span,
        }
    }
}

/// The ordered change log of one object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyChanges {
    pub changes: Vec<Change>,
}

impl PropertyChanges {
    /// Wrap a collected change log.
    pub fn new(changes: Vec<Change>) -> Self {
        Self { changes }
    }

    /// Returns `true` if no changes were recorded.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl ChangeTotals for PropertyChanges {
    fn total_changes(&self) -> usize {
        self.changes.len()
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.iter().filter(|c| c.breaking).count()
    }
}

/// Recursive totals over a change-set node and all reachable children.
///
/// The tree is read-only after construction and typically read once per
/// report, so totals are recomputed on demand rather than cached. An
/// absent node always counts as zero.
pub trait ChangeTotals {
    /// Own change log length plus the totals of every child.
    fn total_changes(&self) -> usize;

    /// Breaking subset of [`Self::total_changes`].
    fn total_breaking_changes(&self) -> usize;
}

/// Sum totals over an optional child change-set.
pub(crate) fn option_totals<C: ChangeTotals>(child: &Option<C>) -> (usize, usize) {
    child.as_ref().map_or((0, 0), |c| {
        (c.total_changes(), c.total_breaking_changes())
    })
}

/// Sum totals over a keyed map of child change-sets.
pub(crate) fn map_totals<C: ChangeTotals>(
    map: &std::collections::BTreeMap<String, C>,
) -> (usize, usize) {
    map.values().fold((0, 0), |(total, breaking), c| {
        (
            total + c.total_changes(),
            breaking + c.total_breaking_changes(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaking_count_never_exceeds_total() {
        let log = PropertyChanges::new(vec![
            Change::removed("schemas", "Error", true, Span::default()),
            Change::added("schemas", "Order", false, Span::default()),
            Change::modified("in", "header", "query", true, Span::new(4, 3)),
        ]);
        assert_eq!(log.total_changes(), 3);
        assert_eq!(log.total_breaking_changes(), 2);
        assert!(log.total_breaking_changes() <= log.total_changes());
    }

    #[test]
    fn constructors_fill_the_right_sides() {
        let added = Change::added("x-internal-id", "abc", false, Span::default());
        assert_eq!(added.kind, ChangeKind::Added);
        assert!(added.before.is_none());
        assert!(added.after.is_some());

        let removed = Change::removed("name", "X-API-KEY", true, Span::default());
        assert_eq!(removed.kind, ChangeKind::Removed);
        assert!(removed.before.is_some());
        assert!(removed.after.is_none());
    }

    #[test]
    fn change_serializes_for_report_consumers() {
        let change = Change::modified("in", "header", "query", true, Span::new(12, 7));
        let json = serde_json::to_string(&change).unwrap();
        let parsed: Change = serde_json::from_str(&json).unwrap();
        assert_eq!(change, parsed);
    }
}
