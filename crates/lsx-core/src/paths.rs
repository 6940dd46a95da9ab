//! Catalog base discovery and path composition.
//!
//! Every catalog path is composed relative to a [`CatalogBase`], which the
//! caller hands to each query. Nothing here creates or deletes directories.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Environment variable naming the base directory explicitly.
pub const BASE_DIR_ENV: &str = "LSXTOOL_CONFIG_DIR";

/// Name of the per-project / per-user base directory.
pub const BASE_DIR_NAME: &str = ".lsxtool";

/// Directory handle every catalog path is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogBase {
    root: PathBuf,
}

impl CatalogBase {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the base from the process environment.
    ///
    /// See [`resolve_base_dir`] for the lookup order.
    pub fn discover() -> anyhow::Result<Self> {
        let env_override = std::env::var(BASE_DIR_ENV).ok();
        let cwd = std::env::current_dir().context("Could not determine current directory")?;
        let home = dirs::home_dir();

        let root = resolve_base_dir(env_override.as_deref(), &cwd, home.as_deref())
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        tracing::debug!(base = %root.display(), "resolved catalog base");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<base>/catalog`
    pub fn catalog_dir(&self) -> PathBuf {
        self.root.join("catalog")
    }

    /// `<base>/catalog/providers.yaml`
    pub fn providers_path(&self) -> PathBuf {
        self.catalog_dir().join("providers.yaml")
    }

    /// `<base>/catalog/capabilities.yaml`
    pub fn registry_path(&self) -> PathBuf {
        self.catalog_dir().join("capabilities.yaml")
    }

    /// `<base>/catalog/capabilities`
    pub fn capabilities_dir(&self) -> PathBuf {
        self.catalog_dir().join("capabilities")
    }

    /// `<base>/catalog/capabilities/<id>.yaml`
    pub fn capability_path(&self, capability_id: &str) -> PathBuf {
        self.capabilities_dir().join(format!("{capability_id}.yaml"))
    }

    /// `<base>/catalog/services/servers/<type>`
    pub fn server_services_dir(&self, server_type: &str) -> PathBuf {
        self.catalog_dir()
            .join("services")
            .join("servers")
            .join(server_type)
    }

    /// `<base>/catalog/services/servers/<type>/<service>.yaml`
    pub fn service_path(&self, server_type: &str, service_id: &str) -> PathBuf {
        self.server_services_dir(server_type)
            .join(format!("{service_id}.yaml"))
    }
}

impl From<PathBuf> for CatalogBase {
    fn from(root: PathBuf) -> Self {
        Self::new(root)
    }
}

impl From<&Path> for CatalogBase {
    fn from(root: &Path) -> Self {
        Self::new(root)
    }
}

/// Resolve the base directory.
///
/// 1. A non-empty `env_override` wins; a leading `~/` is expanded against
///    `home` and a trailing `config` component is dropped.
/// 2. `cwd` and its ancestors are searched for a `.lsxtool` directory that
///    holds `catalog/` or `config/`.
/// 3. `<home>/.lsxtool`.
///
/// Returns `None` only when nothing matched and `home` is unknown.
pub fn resolve_base_dir(
    env_override: Option<&str>,
    cwd: &Path,
    home: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(explicit) = env_override.map(str::trim).filter(|s| !s.is_empty()) {
        let path = expand_home(explicit, home);
        if path.file_name().is_some_and(|name| name == "config")
            && let Some(parent) = path.parent()
        {
            return Some(parent.to_path_buf());
        }
        return Some(path);
    }

    for dir in cwd.ancestors() {
        let candidate = dir.join(BASE_DIR_NAME);
        if candidate.join("catalog").is_dir() || candidate.join("config").is_dir() {
            return Some(candidate);
        }
    }

    home.map(|h| h.join(BASE_DIR_NAME))
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => home.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn env_override_is_used_verbatim() {
        let resolved = resolve_base_dir(Some("/srv/lsx"), Path::new("/nowhere"), None);
        assert_eq!(resolved, Some(PathBuf::from("/srv/lsx")));
    }

    #[test]
    fn env_override_pointing_at_config_uses_parent() {
        let resolved = resolve_base_dir(Some("/srv/lsx/config"), Path::new("/nowhere"), None);
        assert_eq!(resolved, Some(PathBuf::from("/srv/lsx")));
    }

    #[test]
    fn env_override_expands_home() {
        let resolved = resolve_base_dir(
            Some("~/custom/.lsxtool"),
            Path::new("/nowhere"),
            Some(Path::new("/home/ops")),
        );
        assert_eq!(resolved, Some(PathBuf::from("/home/ops/custom/.lsxtool")));
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let resolved = resolve_base_dir(
            Some("   "),
            Path::new("/nowhere"),
            Some(Path::new("/home/ops")),
        );
        assert_eq!(resolved, Some(PathBuf::from("/home/ops/.lsxtool")));
    }

    #[test]
    fn project_ancestor_with_catalog_wins_over_home() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        let nested = project.join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(project.join(".lsxtool").join("catalog")).unwrap();

        let resolved = resolve_base_dir(None, &nested, Some(Path::new("/home/ops")));

        assert_eq!(resolved, Some(project.join(".lsxtool")));
    }

    #[test]
    fn bare_lsxtool_dir_without_catalog_or_config_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".lsxtool").join("cache")).unwrap();

        let resolved = resolve_base_dir(None, temp.path(), Some(Path::new("/home/ops")));

        assert_eq!(resolved, Some(PathBuf::from("/home/ops/.lsxtool")));
    }

    #[test]
    fn no_home_and_no_project_yields_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(resolve_base_dir(None, temp.path(), None), None);
    }

    #[test]
    fn service_path_is_nested_under_server_type() {
        let base = CatalogBase::new("/b");
        assert_eq!(
            base.service_path("web", "nginx"),
            PathBuf::from("/b/catalog/services/servers/web/nginx.yaml")
        );
        assert_eq!(
            base.capability_path("servers"),
            PathBuf::from("/b/catalog/capabilities/servers.yaml")
        );
    }
}
