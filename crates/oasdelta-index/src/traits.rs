//! The [`ReferenceResolver`] trait defining the resolution interface.
//!
//! Builders only ever *consume* this capability; constructing the index
//! (walking a document, deciding which definitions are shared) is the
//! responsibility of whoever parses the source document.

use std::any::Any;
use std::sync::Arc;

/// Resolution capability for pointer-style references.
///
/// Implementations must be thread-safe (`Send + Sync`). `resolve` returns
/// the already-built target for a reference string, or `None` when the
/// reference is unknown. Targets are type-erased because the index holds
/// objects of many kinds; callers downcast to the kind they expect and
/// treat a failed downcast as a kind mismatch, never as "no change".
pub trait ReferenceResolver: Send + Sync {
    /// Resolve a reference string (e.g. `#/components/schemas/Pet`) to the
    /// already-built target object.
    ///
    /// Returns `None` if nothing has been indexed under that reference.
    /// Resolution never builds: a hit is always an existing instance, so
    /// two sites resolving the same reference share one `Arc`.
    fn resolve(&self, reference: &str) -> Option<Arc<dyn Any + Send + Sync>>;

    /// Returns `true` if the reference is known to this index.
    fn contains(&self, reference: &str) -> bool {
        self.resolve(reference).is_some()
    }
}
