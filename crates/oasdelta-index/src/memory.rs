//! In-memory reference index.
//!
//! [`MemoryIndex`] stores built objects in a `HashMap` protected by a
//! `RwLock`. It implements [`ReferenceResolver`] and is the index used by
//! tests and by any caller that builds a document graph in one process.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::error::{IndexError, IndexResult};
use crate::traits::ReferenceResolver;

/// An in-memory implementation of [`ReferenceResolver`].
///
/// Objects are keyed by their full reference string. Inserting the same
/// reference twice is rejected: reference identity is the whole point of
/// the index, so a second target for the same pointer is always a caller
/// bug.
#[derive(Default)]
pub struct MemoryIndex {
    objects: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl MemoryIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built object under its reference string.
    pub fn insert<T: Send + Sync + 'static>(
        &self,
        reference: impl Into<String>,
        object: Arc<T>,
    ) -> IndexResult<()> {
        let reference = reference.into();
        let mut objects = self
            .objects
            .write()
            .map_err(|e| IndexError::LockPoisoned(e.to_string()))?;
        if objects.contains_key(&reference) {
            return Err(IndexError::DuplicateReference(reference));
        }
        trace!(reference = %reference, "indexed object");
        objects.insert(reference, object);
        Ok(())
    }

    /// Resolve and downcast to a concrete kind in one step.
    ///
    /// Returns `None` both for unknown references and for references whose
    /// target is of a different kind; builders that need to distinguish the
    /// two cases use [`ReferenceResolver::resolve`] directly.
    pub fn resolve_as<T: Send + Sync + 'static>(&self, reference: &str) -> Option<Arc<T>> {
        self.resolve(reference)
            .and_then(|obj| obj.downcast::<T>().ok())
    }

    /// Number of indexed objects.
    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MemoryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryIndex")
            .field("objects", &self.len())
            .finish()
    }
}

impl ReferenceResolver for MemoryIndex {
    fn resolve(&self, reference: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        let objects = self.objects.read().ok()?;
        let hit = objects.get(reference).cloned();
        trace!(reference = %reference, found = hit.is_some(), "resolve");
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Dummy(u32);

    #[test]
    fn resolve_unknown_reference_is_none() {
        let index = MemoryIndex::new();
        assert!(index.resolve("#/components/schemas/Pet").is_none());
        assert!(!index.contains("#/components/schemas/Pet"));
    }

    #[test]
    fn insert_then_resolve_shares_one_instance() {
        let index = MemoryIndex::new();
        let pet = Arc::new(Dummy(1));
        index
            .insert("#/components/schemas/Pet", Arc::clone(&pet))
            .unwrap();

        let a = index.resolve_as::<Dummy>("#/components/schemas/Pet").unwrap();
        let b = index.resolve_as::<Dummy>("#/components/schemas/Pet").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &pet));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let index = MemoryIndex::new();
        index.insert("#/x", Arc::new(Dummy(1))).unwrap();
        let err = index.insert("#/x", Arc::new(Dummy(2))).unwrap_err();
        assert!(matches!(err, IndexError::DuplicateReference(_)));
    }

    #[test]
    fn downcast_to_wrong_kind_is_none() {
        let index = MemoryIndex::new();
        index.insert("#/x", Arc::new(Dummy(1))).unwrap();
        assert!(index.resolve_as::<String>("#/x").is_none());
        // The reference itself is still known.
        assert!(index.contains("#/x"));
    }
}
