//! Low-level object model for API description documents.
//!
//! Every piece of data in the model is wrapped in a [`NodeRef`], which
//! records where in the source document the value came from, whether it was
//! reached through a resolved pointer reference, and whether it was present
//! at all (absent is distinct from zero-valued). Objects are built from a
//! generic [`Node`] tree by the [`Buildable`] trait, resolving `$ref`
//! pointers through an `oasdelta-index` resolver so that every referencing
//! site shares one instance.
//!
//! # Key Types
//!
//! - [`NodeRef`] / [`Span`] -- Provenance wrapper and source position
//! - [`Node`] / [`NodeValue`] -- The raw document tree contract
//! - [`Extensions`] -- Vendor extension map (`x-` keys)
//! - [`ContentHash`] / [`ObjectHash`] / [`HashBuilder`] -- Deterministic content digests
//! - [`Buildable`] -- Node-to-object construction with reference resolution
//! - [`v3`] / [`v2`] -- The domain kinds of each document format

pub mod build;
pub mod error;
pub mod extensions;
pub mod hash;
pub mod node;
pub mod reference;
pub mod v2;
pub mod v3;

pub use build::Buildable;
pub use error::{BuildError, BuildResult};
pub use extensions::{Extensions, EXTENSION_PREFIX};
pub use hash::{ContentHash, HashBuilder, ObjectHash};
pub use node::{Node, NodeValue};
pub use reference::{NodeRef, Span};
