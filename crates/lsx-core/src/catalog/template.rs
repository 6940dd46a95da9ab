//! Provider capability templates for `servers_<type>` keys.

use crate::paths::CatalogBase;
use crate::types::{
    ProviderCapabilityTemplate, SERVERS_CAPABILITY, ServerType, ServerTypesShape, ServiceId,
    server_type_from_key,
};

use super::server_types::load_server_type_catalog;
use super::services::load_server_service_ids;

/// Template (services, targets, environments) for an expanded server key.
///
/// Returns `None` when the key has no `servers_` prefix, names a server
/// type the catalog does not declare, or names one declared without fields
/// (`web:` / `web: {}`). Declared services are narrowed to the ones with a
/// definition under `catalog/services/servers/<type>/`.
pub fn load_capability_template_from_servers(
    base: &CatalogBase,
    capability_key: &str,
) -> Option<ProviderCapabilityTemplate> {
    let Some(server_type) = server_type_from_key(capability_key) else {
        tracing::debug!(capability_key, "not a server capability key");
        return None;
    };

    let catalog = load_server_type_catalog(base, SERVERS_CAPABILITY);
    let Some(declared) = catalog.get(server_type) else {
        tracing::debug!(capability_key, server_type, "server type not declared");
        return None;
    };
    if declared.declared_empty {
        tracing::debug!(capability_key, server_type, "server type declared without fields");
        return None;
    }
    let available = load_server_service_ids(base, server_type);

    match catalog.shape? {
        ServerTypesShape::Mapping => Some(mapping_template(declared, &available)),
        ServerTypesShape::Sequence => Some(legacy_template(
            declared,
            &available,
            &catalog.default_environments,
        )),
    }
}

/// Mapping shape: an `environments` list is always present, and an empty
/// intersection is replaced by everything available.
fn mapping_template(declared: &ServerType, available: &[ServiceId]) -> ProviderCapabilityTemplate {
    let services = if available.is_empty() {
        declared.services.clone()
    } else {
        match filter_available(&declared.services, available) {
            filtered if filtered.is_empty() => available.to_vec(),
            filtered => filtered,
        }
    };

    ProviderCapabilityTemplate {
        services,
        targets: declared.targets.clone(),
        environments: Some(declared.environments.clone()),
    }
}

/// Legacy sequence shape: environments fall back to the capability's
/// `default_environments` and are left out when still empty.
fn legacy_template(
    declared: &ServerType,
    available: &[ServiceId],
    default_environments: &[String],
) -> ProviderCapabilityTemplate {
    let mut services = if available.is_empty() {
        declared.services.clone()
    } else {
        filter_available(&declared.services, available)
    };
    if services.is_empty() && !available.is_empty() {
        services = available.to_vec();
    }

    let environments = if declared.environments.is_empty() {
        default_environments.to_vec()
    } else {
        declared.environments.clone()
    };

    ProviderCapabilityTemplate {
        services,
        targets: declared.targets.clone(),
        environments: (!environments.is_empty()).then_some(environments),
    }
}

fn filter_available(declared: &[ServiceId], available: &[ServiceId]) -> Vec<ServiceId> {
    declared
        .iter()
        .filter(|service| available.contains(service))
        .cloned()
        .collect()
}
