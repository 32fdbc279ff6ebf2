//! Domain containers of the older, flat document format.

pub mod definitions;

pub use definitions::Definitions;

/// Field labels of the older format.
pub const DEFINITIONS_LABEL: &str = "definitions";
pub const SECURITY_DEFINITIONS_LABEL: &str = "securityDefinitions";
