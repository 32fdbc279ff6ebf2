//! The [`NodeRef`] provenance wrapper and [`Span`] source position.
//!
//! A `NodeRef<T>` binds a value to the place in the source document it was
//! extracted from, plus the reference string when the value was reached
//! through a resolved pointer. An absent field is represented by an empty
//! `NodeRef`, which is distinct from a field explicitly set to the type's
//! zero value; all downstream code (hashing, diffing, comparators) branches
//! on [`NodeRef::is_empty`] before touching the value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in the source document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    /// Create a span from a line and column.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A value bound to its source provenance.
///
/// Immutable after construction. `value` is `None` iff the field was never
/// populated; `reference` is set iff the value was reached by resolving a
/// pointer reference (in which case the wrapped value is shared with every
/// other site that resolved the same pointer).
#[derive(Clone, Debug)]
pub struct NodeRef<T> {
    value: Option<T>,
    span: Span,
    reference: Option<String>,
}

impl<T> NodeRef<T> {
    /// Wrap a value extracted directly from the document.
    pub fn new(value: T, span: Span) -> Self {
        Self {
            value: Some(value),
            span,
            reference: None,
        }
    }

    /// Wrap a value that was reached through a resolved pointer reference.
    pub fn resolved(value: T, span: Span, reference: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            span,
            reference: Some(reference.into()),
        }
    }

    /// An empty wrapper: the field was never populated.
    pub const fn empty() -> Self {
        Self {
            value: None,
            span: Span::new(0, 0),
            reference: None,
        }
    }

    /// Returns `true` iff the value was never populated.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Returns `true` iff the value came from resolving a pointer reference.
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// The wrapped value, or `None` when the field is absent.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Where the value (or the reference to it) appears in the source.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The reference string this value was resolved through, if any.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl<T: PartialEq> NodeRef<T> {
    /// Compare wrapped values only: two empty wrappers are equal, an empty
    /// and a populated wrapper are not. Spans and reference flags are
    /// provenance, not content, and never participate.
    pub fn value_eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Default for NodeRef<T> {
    fn default() -> Self {
        Self::empty()
    }
}
