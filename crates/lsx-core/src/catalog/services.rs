//! Service availability and host configuration roots.

use serde_yaml_ng::{Mapping, Value};

use crate::paths::CatalogBase;
use crate::types::ServiceId;

use super::store::{list_yaml_stems, read_yaml_mapping};
use super::yaml::{get_set, is_truthy};

/// Services with a definition file under `catalog/services/servers/<type>/`, sorted.
pub fn load_server_service_ids(base: &CatalogBase, server_type: &str) -> Vec<ServiceId> {
    list_yaml_stems(&base.server_services_dir(server_type))
}

/// Host directory holding a service's configuration.
///
/// Reads `host.layouts` from the service definition, preferring the
/// `default` layout and otherwise the first one declared, and returns its
/// `root` without trailing slashes. Anything missing falls back to a fixed
/// per-service path; unknown services fall back to `/etc/nginx`.
pub fn get_service_config_path(base: &CatalogBase, server_type: &str, service_id: &str) -> String {
    let path = base.service_path(server_type, service_id);
    let declared = read_yaml_mapping(&path)
        .map(|doc| layout_root(&doc))
        .unwrap_or_default();

    match declared {
        Some(root) => root,
        None => {
            let fallback = default_config_path(service_id);
            tracing::debug!(
                server_type,
                service_id,
                fallback,
                "no declared layout root, using default config path"
            );
            fallback.to_string()
        }
    }
}

fn layout_root(doc: &Mapping) -> Option<String> {
    let layouts = match doc.get("host").and_then(|host| get_set(host, "layouts"))? {
        Value::Mapping(layouts) => layouts,
        _ => return None,
    };

    let layout = match layouts.get("default").filter(|l| is_truthy(l)) {
        Some(layout) => layout,
        None => layouts.values().next()?,
    };

    match layout.get("root") {
        Some(Value::String(root)) if !root.is_empty() => Some(trim_trailing_slashes(root)),
        _ => None,
    }
}

/// `/srv/www/` -> `/srv/www`; a root made only of slashes is kept as is.
fn trim_trailing_slashes(root: &str) -> String {
    match root.trim_end_matches('/') {
        "" => root.to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn default_config_path(service_id: &str) -> &'static str {
    match service_id {
        "apache" => "/etc/apache2",
        "traefik" => "/etc/traefik",
        _ => "/etc/nginx",
    }
}
