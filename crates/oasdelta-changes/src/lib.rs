//! Structural diff engine for oasdelta.
//!
//! Compares two built document graphs and produces a navigable change tree:
//! a log of atomic [`Change`] records per object, nested child change-sets
//! mirroring the document's own nesting, and recursive totals with
//! breaking-change counts. Comparators return `None` when two objects do
//! not differ; an absent change-set always means "no difference".
//!
//! # Key Types
//!
//! - [`Change`] / [`ChangeKind`] / [`PropertyChanges`] -- The change log
//! - [`ChangeTotals`] -- Recursive totals over any change-set node
//! - [`diff_object_map`] -- Generic keyed-collection differ
//! - [`compare_components`] / [`VersionedComponents`] -- Concurrent top-level driver
//! - [`compare`] -- The per-kind comparators

pub mod change;
pub mod compare;
pub mod components;
pub mod error;
pub mod extensions;
pub mod map_diff;
pub mod property;

pub use change::{Change, ChangeKind, ChangeTotals, PropertyChanges};
pub use components::{compare_components, ComponentsChanges, VersionedComponents};
pub use error::{CompareError, CompareResult};
pub use extensions::{compare_extensions, ExtensionChanges};
pub use map_diff::diff_object_map;
