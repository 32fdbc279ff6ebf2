//! Error types for the diff engine.
//!
//! Comparators themselves are total functions over two built graphs; the
//! errors here come from the orchestration boundary.

/// Errors that can occur while driving a top-level comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// The two containers come from different document formats.
    #[error("cannot compare components across document formats: left is {left}, right is {right}")]
    FormatMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// A comparison worker panicked; the failure was caught and delivered
    /// through the result channel instead of stalling the fan-in.
    #[error("comparison worker for {field} panicked: {message}")]
    WorkerPanicked {
        field: &'static str,
        message: String,
    },

    /// The result channel closed before every dispatched worker reported.
    #[error("comparison result channel closed before all workers reported")]
    ResultChannelClosed,
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
