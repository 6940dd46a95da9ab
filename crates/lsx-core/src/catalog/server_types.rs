//! Server-type normalization.
//!
//! `server_types` may be declared in two shapes:
//!
//! ```yaml
//! server_types:            # mapping, keyed by type id
//!   web:
//!     label: Web
//!     services: [nginx, apache]
//!     targets: [host, docker]
//!     environments: [dev, prod]
//! ```
//!
//! ```yaml
//! server_types:            # legacy sequence of records
//!   - id: web
//!     default_services: [nginx]
//!     targets: [host]
//! ```
//!
//! Both are turned into a [`ServerTypeCatalog`] here, once. Consumers branch
//! on [`ServerTypesShape`] only where the two formats are meant to behave
//! differently.

use std::path::Path;

use serde_yaml_ng::{Mapping, Value};

use crate::paths::CatalogBase;
use crate::types::{SERVERS_CAPABILITY, ServerType, ServerTypeCatalog, ServerTypesShape};

use super::error::{CatalogError, LoadOutcome};
use super::store::load_capability_content_outcome;
use super::yaml::{get_set, is_truthy, scalar_to_string, string_list};

/// Normalized `server_types` of a capability (usually `servers`).
pub fn load_server_type_catalog(base: &CatalogBase, capability_id: &str) -> ServerTypeCatalog {
    let path = base.capability_path(capability_id);
    load_capability_content_outcome(base, capability_id)
        .and_then(|content| normalize_server_types(&content, &path))
        .unwrap_or(ServerTypeCatalog::empty())
}

/// Server types declared by a capability, in declaration order.
///
/// Pass `None` for the `servers` capability.
pub fn load_server_types_from_capability(
    base: &CatalogBase,
    capability_id: Option<&str>,
) -> Vec<ServerType> {
    load_server_type_catalog(base, capability_id.unwrap_or(SERVERS_CAPABILITY)).types
}

pub(crate) fn normalize_server_types(
    content: &Mapping,
    path: &Path,
) -> LoadOutcome<ServerTypeCatalog> {
    let default_environments = string_list(content.get("default_environments"));

    let (shape, types) = match content.get("server_types") {
        None | Some(Value::Null) => return LoadOutcome::Loaded(ServerTypeCatalog::empty()),
        Some(Value::Mapping(entries)) => (ServerTypesShape::Mapping, from_mapping(entries)),
        Some(Value::Sequence(records)) => (ServerTypesShape::Sequence, from_sequence(records)),
        Some(_) => {
            return LoadOutcome::Malformed(CatalogError::UnexpectedShape {
                path: path.to_path_buf(),
                key: "server_types".to_string(),
                expected: "a mapping or a sequence",
            });
        }
    };

    LoadOutcome::Loaded(ServerTypeCatalog {
        shape: Some(shape),
        types,
        default_environments,
    })
}

fn from_mapping(entries: &Mapping) -> Vec<ServerType> {
    entries
        .iter()
        .filter_map(|(key, fields)| {
            let id = scalar_to_string(key)?;
            let mut server_type = ServerType::new(id);
            server_type.declared_empty = !is_truthy(fields);

            match fields {
                Value::Mapping(_) => {
                    if let Some(label) = fields.get("label").and_then(scalar_to_string) {
                        server_type.label = label;
                    }
                    server_type.services = string_list(fields.get("services"));
                    server_type.targets = string_list(fields.get("targets"));
                    server_type.environments = string_list(fields.get("environments"));
                }
                _ if server_type.declared_empty => {}
                other => {
                    tracing::warn!(
                        server_type = %server_type.id,
                        value = ?other,
                        "server type fields are not a mapping, using defaults"
                    );
                }
            }
            Some(server_type)
        })
        .collect()
}

fn from_sequence(records: &[Value]) -> Vec<ServerType> {
    records
        .iter()
        .filter_map(|record| {
            let Some(id) = get_set(record, "id").and_then(scalar_to_string) else {
                tracing::debug!(record = ?record, "skipping server type record without an id");
                return None;
            };

            let label = record
                .get("label")
                .and_then(scalar_to_string)
                .unwrap_or_else(|| id.clone());
            let services = match get_set(record, "default_services") {
                Some(declared) => string_list(Some(declared)),
                None => string_list(record.get("services")),
            };

            Some(ServerType {
                id,
                label,
                services,
                targets: string_list(record.get("targets")),
                environments: string_list(record.get("environments")),
                declared_empty: false,
            })
        })
        .collect()
}
