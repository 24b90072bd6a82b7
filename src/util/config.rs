//! Configuration file support for debquery.
//!
//! Configuration lives in a single TOML file (default:
//! `/etc/debquery/config.toml`) and is loaded explicitly by whoever wires
//! up the query layer; there is no implicit global instance.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default location of the dpkg status database.
pub const DEFAULT_STATUS_PATH: &str = "/var/lib/dpkg/status";

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/debquery/config.toml";

/// Debquery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the dpkg status file to parse
    pub status_path: PathBuf,

    /// Canonical field ids included in single-package query results
    pub return_fields: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            status_path: PathBuf::from(DEFAULT_STATUS_PATH),
            return_fields: vec![
                "package".to_string(),
                "description".to_string(),
                "depends".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is absent.
    ///
    /// A file that exists but does not parse is reported as a warning and
    /// ignored rather than aborting the query.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.status_path, PathBuf::from(DEFAULT_STATUS_PATH));
        assert_eq!(config.return_fields, ["package", "description", "depends"]);
    }

    #[test]
    fn test_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "status_path = \"/tmp/status\"\nreturn_fields = [\"package\", \"version\"]\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.status_path, PathBuf::from("/tmp/status"));
        assert_eq!(config.return_fields, ["package", "version"]);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(Some(&tmp.path().join("nope.toml")));
        assert_eq!(config.status_path, PathBuf::from(DEFAULT_STATUS_PATH));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "status_path = \"/srv/status\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.status_path, PathBuf::from("/srv/status"));
        assert_eq!(config.return_fields, ["package", "description", "depends"]);
    }
}
