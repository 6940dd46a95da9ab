//! Shared core types produced by the catalog resolution layer.

use serde::Serialize;

/// Identifier of a capability declared in the catalog (`security`, `servers`, ...).
pub type CapabilityId = String;

/// Identifier of a service under a server type (`nginx`, `postgres`, ...).
pub type ServiceId = String;

/// Key a provider configuration may address: a plain capability id, or one
/// `servers_<type>` key per declared server type.
pub type CapabilityKey = String;

/// The capability whose server types are expanded into per-type keys.
pub const SERVERS_CAPABILITY: &str = "servers";

/// Reserved prefix of expanded server capability keys.
pub const SERVER_KEY_PREFIX: &str = "servers_";

/// Build the capability key for a server type (`web` -> `servers_web`).
pub fn server_capability_key(server_type: &str) -> CapabilityKey {
    format!("{SERVER_KEY_PREFIX}{server_type}")
}

/// Server type addressed by an expanded key, if the key carries the prefix.
pub fn server_type_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(SERVER_KEY_PREFIX)
}

/// On-disk shape `server_types` was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerTypesShape {
    /// `server_types: { web: { label, services, targets, environments } }`
    Mapping,
    /// Legacy `server_types: [ { id, default_services | services, targets } ]`
    Sequence,
}

/// Canonical server type record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerType {
    pub id: String,
    pub label: String,
    pub services: Vec<ServiceId>,
    pub targets: Vec<String>,
    pub environments: Vec<String>,
    /// Declared in the mapping shape with no fields (`web:` or `web: {}`).
    /// Such a type still yields a capability key but has no template.
    #[serde(skip)]
    pub declared_empty: bool,
}

impl ServerType {
    /// Record with `label` defaulted to the id and every list empty.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            ..Self::default()
        }
    }
}

/// Normalized view of the `server_types` declared by a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerTypeCatalog {
    /// `None` when the capability declares no usable `server_types`.
    pub shape: Option<ServerTypesShape>,
    pub types: Vec<ServerType>,
    /// Capability-level `default_environments`, consulted by the legacy shape only.
    pub default_environments: Vec<String>,
}

impl ServerTypeCatalog {
    pub fn empty() -> Self {
        Self {
            shape: None,
            types: Vec::new(),
            default_environments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a declared server type by id.
    pub fn get(&self, id: &str) -> Option<&ServerType> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.id.as_str())
    }
}

/// Provider-configuration template for one capability key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderCapabilityTemplate {
    pub services: Vec<ServiceId>,
    pub targets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<String>>,
}
