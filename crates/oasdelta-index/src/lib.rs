//! Reference index for oasdelta.
//!
//! A parsed document may point at shared definitions through pointer-style
//! references (`$ref`). Builders in `oasdelta-model` resolve those pointers
//! through the [`ReferenceResolver`] trait so that every referencing site
//! shares one built instance, and so that a reference never triggers a
//! fresh build (which is what keeps self-referential schemas finite).
//!
//! # Key Types
//!
//! - [`ReferenceResolver`] -- The resolution capability consumed by builders
//! - [`MemoryIndex`] -- In-memory resolver keyed by reference string
//! - [`names`] -- Reference-string helpers

pub mod error;
pub mod memory;
pub mod names;
pub mod traits;

pub use error::{IndexError, IndexResult};
pub use memory::MemoryIndex;
pub use traits::ReferenceResolver;
