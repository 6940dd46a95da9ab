//! Catalog resolution engine
//!
//! Loads the layered YAML catalog under `<base>/catalog/` and resolves it
//! into flat structures:
//! - capability ids (declared registry, or directory scan)
//! - normalized server types (mapping or legacy sequence shape)
//! - expanded capability keys (`servers` -> `servers_<type>`)
//! - service availability and configuration roots
//! - provider capability templates
//!
//! Every query re-reads the disk and never fails: missing or malformed
//! files resolve to an empty/default value after being logged.

pub mod error;
pub mod keys;
pub mod registry;
pub mod server_types;
pub mod services;
pub mod store;
pub mod template;
mod yaml;

pub use error::{CatalogError, LoadOutcome};
pub use keys::{
    capability_label, load_all_provider_capability_keys, load_configurable_server_capability_ids,
};
pub use registry::{load_capability_ids, load_capability_ids_from_registry};
pub use server_types::{load_server_type_catalog, load_server_types_from_capability};
pub use services::{get_service_config_path, load_server_service_ids};
pub use store::{
    Provider, get_catalog_dir, load_capability_content, load_capability_content_outcome,
    load_catalog_providers, provider_ids, read_yaml_document,
};
pub use template::load_capability_template_from_servers;
