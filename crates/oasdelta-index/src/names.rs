//! Reference-string helpers.
//!
//! Local references follow the JSON-pointer-ish layout
//! `#/components/schemas/Pet` (or `#/definitions/Pet` in the older
//! format). These helpers classify and dissect them without imposing any
//! policy on what an index chooses to store.

/// Returns `true` if the reference points inside the same document.
pub fn is_local(reference: &str) -> bool {
    reference.starts_with('#')
}

/// The last path segment of a reference: the component's own name.
///
/// Returns `None` for empty references or references ending in `/`.
pub fn component_name(reference: &str) -> Option<&str> {
    reference
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && *s != "#")
}
