//! lsxtool Core Library
//!
//! Read-only resolution of the operator catalog (providers, capabilities,
//! server types and per-service host layouts) into the flat structures the
//! command-line front end uses to drive prompts and file writes.

pub mod catalog;
pub mod paths;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Catalog location
    pub use crate::paths::{CatalogBase, resolve_base_dir};

    // Loading
    pub use crate::catalog::{CatalogError, LoadOutcome, Provider};

    // Resolved shapes
    pub use crate::types::{
        CapabilityId, CapabilityKey, ProviderCapabilityTemplate, ServerType, ServerTypeCatalog,
        ServerTypesShape, ServiceId,
    };
}
