//! Error types for the index crate.

/// Errors that can occur while maintaining the reference index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A reference string was already registered with a different target.
    #[error("reference already indexed: {0}")]
    DuplicateReference(String),

    /// The underlying lock was poisoned by a panicking writer.
    #[error("index lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
