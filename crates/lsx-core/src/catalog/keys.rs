//! Capability key expansion.

use crate::paths::CatalogBase;
use crate::types::{CapabilityKey, SERVERS_CAPABILITY, SERVER_KEY_PREFIX, server_capability_key};

use super::registry::load_capability_ids_from_registry;
use super::server_types::load_server_type_catalog;

/// One `servers_<type>` key per server type declared by the `servers` capability.
pub fn load_configurable_server_capability_ids(base: &CatalogBase) -> Vec<CapabilityKey> {
    load_server_type_catalog(base, SERVERS_CAPABILITY)
        .ids()
        .map(server_capability_key)
        .collect()
}

/// Every key a provider configuration may address.
///
/// Registry order is kept; `servers` is replaced in place by its per-type keys.
/// Capability ids using the reserved `servers_` prefix are passed through
/// with a warning, since they may collide with an expanded key.
pub fn load_all_provider_capability_keys(base: &CatalogBase) -> Vec<CapabilityKey> {
    let mut keys = Vec::new();
    for capability_id in load_capability_ids_from_registry(base) {
        if capability_id == SERVERS_CAPABILITY {
            keys.extend(load_configurable_server_capability_ids(base));
            continue;
        }
        if uses_reserved_prefix(&capability_id) {
            tracing::warn!(
                capability_id = %capability_id,
                prefix = SERVER_KEY_PREFIX,
                "capability id uses the reserved server key prefix"
            );
        }
        keys.push(capability_id);
    }
    keys
}

fn uses_reserved_prefix(capability_id: &str) -> bool {
    capability_id.starts_with(SERVER_KEY_PREFIX)
}

const CAPABILITY_LABELS: &[(&str, &str)] = &[
    ("servers_web", "Web server (Nginx, Apache, Traefik, etc.)"),
    ("servers_database", "Database server (Postgres, MySQL, Redis, etc.)"),
    ("servers_mail", "Mail server"),
    ("servers_cache", "Cache server"),
    ("servers_queue", "Queue server"),
];

/// Human-readable label for a capability key.
pub fn capability_label(key: &str) -> String {
    if let Some((_, label)) = CAPABILITY_LABELS.iter().find(|(k, _)| *k == key) {
        return (*label).to_string();
    }
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
