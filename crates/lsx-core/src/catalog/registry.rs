//! Capability registry: declared capability ids with directory fallback.

use serde_yaml_ng::Value;

use crate::paths::CatalogBase;
use crate::types::CapabilityId;

use super::error::{CatalogError, LoadOutcome};
use super::store::{list_yaml_stems, read_yaml_mapping};
use super::yaml::scalar_to_string;

/// Capability ids from `catalog/capabilities/*.yaml` stems, sorted.
pub fn load_capability_ids(base: &CatalogBase) -> Vec<CapabilityId> {
    list_yaml_stems(&base.capabilities_dir())
}

/// Capability ids from the declared registry (`catalog/capabilities.yaml`),
/// in declaration order.
///
/// Falls back to [`load_capability_ids`] when the registry is missing,
/// malformed, or declares no usable ids.
pub fn load_capability_ids_from_registry(base: &CatalogBase) -> Vec<CapabilityId> {
    let declared = registry_outcome(base).unwrap_or_default();
    if !declared.is_empty() {
        return declared;
    }

    tracing::debug!(
        registry = %base.registry_path().display(),
        "no declared capabilities, scanning capability directory"
    );
    load_capability_ids(base)
}

fn registry_outcome(base: &CatalogBase) -> LoadOutcome<Vec<CapabilityId>> {
    let path = base.registry_path();
    read_yaml_mapping(&path).and_then(|doc| match doc.get("capabilities") {
        None | Some(Value::Null) => LoadOutcome::Loaded(Vec::new()),
        Some(Value::Sequence(entries)) => {
            if entries
                .iter()
                .any(|entry| !matches!(entry, Value::String(_) | Value::Mapping(_)))
            {
                return LoadOutcome::Malformed(CatalogError::UnexpectedShape {
                    path,
                    key: "capabilities".to_string(),
                    expected: "a sequence of ids or records with an id",
                });
            }
            LoadOutcome::Loaded(entries.iter().filter_map(registry_entry_id).collect())
        }
        Some(_) => LoadOutcome::Malformed(CatalogError::UnexpectedShape {
            path,
            key: "capabilities".to_string(),
            expected: "a sequence",
        }),
    })
}

/// `security` or `{ id: security, ... }`. Empty ids are dropped.
fn registry_entry_id(entry: &Value) -> Option<CapabilityId> {
    let id = match entry {
        Value::String(id) => Some(id.clone()),
        Value::Mapping(fields) => fields.get("id").and_then(scalar_to_string),
        _ => None,
    };
    match id {
        Some(id) if !id.is_empty() => Some(id),
        _ => {
            tracing::warn!(entry = ?entry, "skipping capability registry entry without an id");
            None
        }
    }
}
