//! Error types for object construction.

use crate::reference::Span;

/// Errors that can occur while building a domain object from a raw node.
///
/// Every variant carries the offending source position. A build error is
/// fatal to its subtree: no partial object is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The node for an object-valued field was not a mapping.
    #[error("expected a mapping for `{field}` at {span}")]
    NotAMapping { field: String, span: Span },

    /// A scalar field held a value of the wrong type.
    #[error("field `{field}` expected {expected} at {span}")]
    InvalidField {
        field: String,
        expected: &'static str,
        span: Span,
    },

    /// A pointer reference had no target in the index.
    #[error("unresolved reference `{reference}` at {span}")]
    UnresolvedReference { reference: String, span: Span },

    /// A pointer reference resolved to an object of a different kind.
    #[error("reference `{reference}` resolved to the wrong kind (expected {expected}) at {span}")]
    ReferenceKindMismatch {
        reference: String,
        expected: &'static str,
        span: Span,
    },
}

/// Convenience alias for build results.
pub type BuildResult<T> = Result<T, BuildError>;
