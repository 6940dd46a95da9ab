//! Load results for catalog documents.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a catalog document could not be used.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Unexpected shape in {path}: '{key}' should be {expected}")]
    UnexpectedShape {
        path: PathBuf,
        key: String,
        expected: &'static str,
    },
}

impl CatalogError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::UnexpectedShape { path, .. } => {
                path
            }
        }
    }
}

/// Result of reading one piece of the catalog.
///
/// Public queries collapse this to an empty/default value; the variants keep
/// the reason around long enough to be logged.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Absent,
    Malformed(CatalogError),
}

impl<T> LoadOutcome<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadOutcome<U> {
        match self {
            Self::Loaded(value) => LoadOutcome::Loaded(f(value)),
            Self::Absent => LoadOutcome::Absent,
            Self::Malformed(err) => LoadOutcome::Malformed(err),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> LoadOutcome<U>) -> LoadOutcome<U> {
        match self {
            Self::Loaded(value) => f(value),
            Self::Absent => LoadOutcome::Absent,
            Self::Malformed(err) => LoadOutcome::Malformed(err),
        }
    }

    /// The loaded value, if any.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Absent | Self::Malformed(_) => None,
        }
    }

    /// Collapse to the loaded value or `fallback`, logging malformed input.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Loaded(value) => value,
            Self::Absent => fallback,
            Self::Malformed(err) => {
                log_malformed(&err);
                fallback
            }
        }
    }
}

impl<T: Default> LoadOutcome<T> {
    /// Collapse to the loaded value or `T::default()`, logging malformed input.
    pub fn unwrap_or_default(self) -> T {
        self.unwrap_or(T::default())
    }
}

fn log_malformed(err: &CatalogError) {
    let detail = match err {
        CatalogError::Read { source, .. } => source.to_string(),
        CatalogError::Parse { source, .. } => source.to_string(),
        CatalogError::UnexpectedShape { .. } => err.to_string(),
    };
    tracing::warn!(path = %err.path().display(), %detail, "ignoring malformed catalog file");
}
