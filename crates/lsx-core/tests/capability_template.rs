mod support;

use pretty_assertions::assert_eq;

use lsx_core::catalog::{load_all_provider_capability_keys, load_capability_template_from_servers};
use lsx_core::types::ProviderCapabilityTemplate;

use support::{CatalogFixture, strings};

fn mapping_catalog(web_services: &str) -> CatalogFixture {
    let fixture = CatalogFixture::new();
    fixture.capability(
        "servers",
        &format!(
            "server_types:\n  web:\n    services: {web_services}\n    targets: [host, docker]\n    environments: [dev, prod]\n"
        ),
    );
    fixture
}

#[test]
fn declared_services_are_filtered_to_available() {
    let fixture = mapping_catalog("[a, b, c]");
    fixture.bare_service("web", "a");
    fixture.bare_service("web", "c");

    let template = load_capability_template_from_servers(&fixture.base(), "servers_web");

    assert_eq!(
        template,
        Some(ProviderCapabilityTemplate {
            services: strings(&["a", "c"]),
            targets: strings(&["host", "docker"]),
            environments: Some(strings(&["dev", "prod"])),
        })
    );
}

#[test]
fn no_declared_service_available_substitutes_all_available() {
    let fixture = mapping_catalog("[x, y]");
    fixture.bare_service("web", "a");
    fixture.bare_service("web", "c");

    let template = load_capability_template_from_servers(&fixture.base(), "servers_web").unwrap();

    assert_eq!(template.services, strings(&["a", "c"]));
}

#[test]
fn nothing_available_keeps_declared_services() {
    let fixture = mapping_catalog("[x, y]");

    let template = load_capability_template_from_servers(&fixture.base(), "servers_web").unwrap();

    assert_eq!(template.services, strings(&["x", "y"]));
}

#[test]
fn mapping_shape_always_carries_environments() {
    let fixture = CatalogFixture::new();
    fixture.capability("servers", "server_types:\n  database:\n    services: [postgres]\n");

    let template =
        load_capability_template_from_servers(&fixture.base(), "servers_database").unwrap();

    assert_eq!(template.environments, Some(Vec::new()));
    assert!(template.targets.is_empty());
}

#[test]
fn unknown_server_type_is_none() {
    let fixture = mapping_catalog("[a]");
    assert_eq!(
        load_capability_template_from_servers(&fixture.base(), "servers_mail"),
        None
    );
}

#[test]
fn key_without_servers_prefix_is_none() {
    let fixture = mapping_catalog("[a]");
    fixture.capability("security", "label: Security\n");

    assert_eq!(
        load_capability_template_from_servers(&fixture.base(), "security"),
        None
    );
    assert_eq!(
        load_capability_template_from_servers(&fixture.base(), "servers"),
        None
    );
}

#[test]
fn type_declared_without_fields_has_no_template() {
    let fixture = CatalogFixture::new();
    fixture.capability("servers", "server_types:\n  web: {}\n  db: ~\n");
    fixture.bare_service("web", "a");

    assert_eq!(
        load_capability_template_from_servers(&fixture.base(), "servers_web"),
        None
    );
    assert_eq!(
        load_capability_template_from_servers(&fixture.base(), "servers_db"),
        None
    );
    assert_eq!(
        load_all_provider_capability_keys(&fixture.base()),
        strings(&["servers_web", "servers_db"])
    );
}

#[test]
fn missing_servers_capability_is_none() {
    let fixture = CatalogFixture::new();
    assert_eq!(
        load_capability_template_from_servers(&fixture.base(), "servers_web"),
        None
    );
}

const LEGACY: &str = r#"
default_environments: [dev, qa, prod]
server_types:
  - id: web
    default_services: [nginx, apache]
    services: [caddy]
    targets: [host]
  - id: database
    services: [postgres, mysql]
    environments: [prod]
"#;

#[test]
fn legacy_prefers_default_services_and_default_environments() {
    let fixture = CatalogFixture::new();
    fixture.capability("servers", LEGACY);
    fixture.bare_service("web", "apache");
    fixture.bare_service("web", "caddy");

    let template = load_capability_template_from_servers(&fixture.base(), "servers_web").unwrap();

    assert_eq!(
        template,
        ProviderCapabilityTemplate {
            services: strings(&["apache"]),
            targets: strings(&["host"]),
            environments: Some(strings(&["dev", "qa", "prod"])),
        }
    );
}

#[test]
fn legacy_type_environments_override_defaults() {
    let fixture = CatalogFixture::new();
    fixture.capability("servers", LEGACY);

    let template =
        load_capability_template_from_servers(&fixture.base(), "servers_database").unwrap();

    assert_eq!(template.services, strings(&["postgres", "mysql"]));
    assert_eq!(template.environments, Some(strings(&["prod"])));
}

#[test]
fn legacy_without_environments_omits_them() {
    let fixture = CatalogFixture::new();
    fixture.capability("servers", "server_types:\n  - id: web\n    services: [nginx]\n");

    let template = load_capability_template_from_servers(&fixture.base(), "servers_web").unwrap();

    assert_eq!(template.environments, None);
    assert_eq!(template.services, strings(&["nginx"]));
}

#[test]
fn legacy_substitutes_available_when_filter_is_empty() {
    let fixture = CatalogFixture::new();
    fixture.capability("servers", LEGACY);
    fixture.bare_service("database", "redis");

    let template =
        load_capability_template_from_servers(&fixture.base(), "servers_database").unwrap();

    assert_eq!(template.services, strings(&["redis"]));
}

#[test]
fn repeated_builds_are_identical() {
    let fixture = mapping_catalog("[a, b]");
    fixture.bare_service("web", "b");

    assert_eq!(
        load_capability_template_from_servers(&fixture.base(), "servers_web"),
        load_capability_template_from_servers(&fixture.base(), "servers_web")
    );
}
