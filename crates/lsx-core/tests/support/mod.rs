#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use lsx_core::paths::CatalogBase;

/// Throwaway `<base>/catalog/` tree.
pub struct CatalogFixture {
    temp: TempDir,
}

impl CatalogFixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn base(&self) -> CatalogBase {
        CatalogBase::new(self.temp.path())
    }

    /// Write `content` to `catalog/<relative>`, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join("catalog").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn registry(&self, content: &str) -> PathBuf {
        self.write("capabilities.yaml", content)
    }

    pub fn capability(&self, id: &str, content: &str) -> PathBuf {
        self.write(&format!("capabilities/{id}.yaml"), content)
    }

    pub fn service(&self, server_type: &str, service_id: &str, content: &str) -> PathBuf {
        self.write(
            &format!("services/servers/{server_type}/{service_id}.yaml"),
            content,
        )
    }

    /// Service definition with no layout data.
    pub fn bare_service(&self, server_type: &str, service_id: &str) -> PathBuf {
        self.service(server_type, service_id, "id: placeholder\n")
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
