// File: src/config.rs
// Purpose: Discovery configuration parsed from fileroutes.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "fileroutes.toml";

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Route discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Directory containing route files (default: "routes")
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File extensions treated as route files, without the dot (default: ["rs"])
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Sort directory entries by name instead of filesystem order
    #[serde(default = "default_false")]
    pub sort_entries: bool,
}

fn default_directory() -> PathBuf {
    PathBuf::from("routes")
}

fn default_extensions() -> Vec<String> {
    vec!["rs".to_string()]
}

fn default_false() -> bool {
    false
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extensions: default_extensions(),
            sort_entries: false,
        }
    }
}

impl RoutesConfig {
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sorted_entries(mut self, sort_entries: bool) -> Self {
        self.sort_entries = sort_entries;
        self
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the defaults. Malformed TOML is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default path (./fileroutes.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.routes.directory, PathBuf::from("routes"));
        assert_eq!(config.routes.extensions, vec!["rs"]);
        assert!(!config.routes.sort_entries);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.routes, RoutesConfig::default());
    }

    #[test]
    fn test_custom_routes_section() {
        let toml = r#"
            [routes]
            directory = "app/routes"
            extensions = ["rs", "route"]
            sort_entries = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.routes.directory, PathBuf::from("app/routes"));
        assert_eq!(config.routes.extensions, vec!["rs", "route"]);
        assert!(config.routes.sort_entries);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[routes]\nsort_entries = true\n").unwrap();
        assert_eq!(config.routes.directory, PathBuf::from("routes"));
        assert_eq!(config.routes.extensions, vec!["rs"]);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.routes, RoutesConfig::default());
    }

    #[test]
    fn test_load_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[routes\ndirectory = ").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Config { .. })));
    }
}
