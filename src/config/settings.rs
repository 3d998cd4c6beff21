//! Per-package installer settings loaded from TOML

use crate::types::{MirrorError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path};

/// Installer extras a package author can declare
///
/// ```toml
/// blacklist-filter = ["documentation/**", "**/*.md"]
/// target-directory = "acme/payments"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PackageSettings {
    /// Globs the author wants excluded from every copy
    #[serde(default)]
    pub blacklist_filter: Vec<String>,

    /// Install directory name, overriding the package name
    pub target_directory: Option<String>,

    /// Sub-directory of the package to copy from
    pub source_directory: Option<String>,

    /// Theme asset directory (defaults to `out`)
    pub assets_directory: Option<String>,
}

impl PackageSettings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(text).map_err(|e| MirrorError::Config(e.message().to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            MirrorError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&text)
    }

    /// Reject directory overrides that would escape the package or project
    pub fn validate(&self) -> Result<()> {
        let overrides = [
            ("target-directory", &self.target_directory),
            ("source-directory", &self.source_directory),
            ("assets-directory", &self.assets_directory),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                ensure_contained(key, value)?;
            }
        }
        Ok(())
    }
}

/// Reject a value that, joined onto a directory, could leave that directory
pub(crate) fn ensure_contained(key: &str, value: &str) -> Result<()> {
    if is_contained_relative(value) {
        Ok(())
    } else {
        Err(MirrorError::Config(format!(
            "{} must be a relative path without '..', got '{}'",
            key, value
        )))
    }
}

fn is_contained_relative(value: &str) -> bool {
    !value.is_empty()
        && Path::new(value)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
