//! Catalog store: raw document loading under `<base>/catalog/`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml_ng::{Mapping, Value};

use crate::paths::CatalogBase;

use super::error::{CatalogError, LoadOutcome};
use super::yaml::scalar_to_string;

/// `<base>/catalog`
pub fn get_catalog_dir(base: &CatalogBase) -> PathBuf {
    base.catalog_dir()
}

/// Read and parse one YAML document.
///
/// A missing file is [`LoadOutcome::Absent`]; unreadable or unparsable
/// content is [`LoadOutcome::Malformed`]. An empty file loads as null.
pub fn read_yaml_document(path: &Path) -> LoadOutcome<Value> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "catalog file not present");
        return LoadOutcome::Absent;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            return LoadOutcome::Malformed(CatalogError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_yaml_ng::from_str::<Value>(&content) {
        Ok(value) => LoadOutcome::Loaded(value),
        Err(source) => LoadOutcome::Malformed(CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read a document whose top level must be a mapping (null counts as empty).
pub(crate) fn read_yaml_mapping(path: &Path) -> LoadOutcome<Mapping> {
    read_yaml_document(path).and_then(|value| match value {
        Value::Mapping(map) => LoadOutcome::Loaded(map),
        Value::Null => LoadOutcome::Loaded(Mapping::new()),
        _ => LoadOutcome::Malformed(CatalogError::UnexpectedShape {
            path: path.to_path_buf(),
            key: "<document>".to_string(),
            expected: "a mapping",
        }),
    })
}

/// Sorted stems of `*.yaml` files directly under `dir`, dot-files excluded.
pub(crate) fn list_yaml_stems(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), error = %err, "catalog directory not readable");
            return Vec::new();
        }
    };

    let mut stems: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == "yaml"))
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?;
            if stem.is_empty() || stem.starts_with('.') {
                return None;
            }
            Some(stem.to_string())
        })
        .collect();
    stems.sort();
    stems
}

/// A provider entry from `providers.yaml`, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Provider(Mapping);

impl Provider {
    pub fn new(fields: Mapping) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Declared `id`, if it is a scalar.
    pub fn id(&self) -> Option<String> {
        self.get("id").and_then(scalar_to_string)
    }

    /// Declared `name`, if it is a scalar.
    pub fn name(&self) -> Option<String> {
        self.get("name").and_then(scalar_to_string)
    }

    pub fn fields(&self) -> &Mapping {
        &self.0
    }
}

/// Ids of the given providers, in declaration order; entries without one are skipped.
pub fn provider_ids(providers: &[Provider]) -> Vec<String> {
    providers.iter().filter_map(Provider::id).collect()
}

fn providers_outcome(base: &CatalogBase) -> LoadOutcome<Vec<Provider>> {
    let path = base.providers_path();
    read_yaml_mapping(&path).and_then(|doc| match doc.get("providers") {
        None | Some(Value::Null) => LoadOutcome::Loaded(Vec::new()),
        Some(Value::Sequence(items)) => {
            let providers = items
                .iter()
                .filter_map(|item| match item {
                    Value::Mapping(fields) => Some(Provider::new(fields.clone())),
                    other => {
                        tracing::warn!(
                            path = %path.display(),
                            entry = ?other,
                            "skipping provider entry that is not a mapping"
                        );
                        None
                    }
                })
                .collect();
            LoadOutcome::Loaded(providers)
        }
        Some(_) => LoadOutcome::Malformed(CatalogError::UnexpectedShape {
            path: path.clone(),
            key: "providers".to_string(),
            expected: "a sequence",
        }),
    })
}

/// Providers declared in `catalog/providers.yaml`; empty on any failure.
pub fn load_catalog_providers(base: &CatalogBase) -> Vec<Provider> {
    providers_outcome(base).unwrap_or_default()
}

/// Parsed `catalog/capabilities/<id>.yaml`, keeping the failure reason.
pub fn load_capability_content_outcome(
    base: &CatalogBase,
    capability_id: &str,
) -> LoadOutcome<Mapping> {
    read_yaml_mapping(&base.capability_path(capability_id))
}

/// Parsed `catalog/capabilities/<id>.yaml`; empty mapping on any failure.
pub fn load_capability_content(base: &CatalogBase, capability_id: &str) -> Mapping {
    load_capability_content_outcome(base, capability_id).unwrap_or_default()
}
