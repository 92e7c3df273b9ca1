//! Configuration management for the omni CLI
//!
//! The configuration is a small TOML file holding defaults for commands that
//! would otherwise need an explicit path argument:
//! - `project-path`: the `project.pbxproj` that `omni dedup` patches
//! - `plugin-dir`: the plugin package directory that `omni validate` checks

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "OMNI_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const CONFIG_KEYS: [&str; 2] = ["project-path", "plugin-dir"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}. Supported keys: project-path, plugin-dir")]
    UnknownKey(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_dir: Option<String>,
}

impl Config {
    pub fn path() -> PathBuf {
        // Honor explicit override via OMNI_CONFIG for tests / isolated runs.
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir().map_or_else(
                || PathBuf::from(".config/omni/omni.toml"),
                |h| h.join(".config").join("omni").join("omni.toml"),
            )
        }

        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map_or_else(
                || PathBuf::from("config\\omni\\omni.toml"),
                |c| c.join("omni").join("omni.toml"),
            )
        }
    }

    /// Load the config from its default location, or an empty config if absent
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match key {
            "project-path" => Ok(self.project_path.clone()),
            "plugin-dir" => Ok(self.plugin_dir.clone()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "project-path" => self.project_path = Some(value),
            "plugin-dir" => self.plugin_dir = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.project_path.is_none() && self.plugin_dir.is_none()
    }

    /// Set values in [`CONFIG_KEYS`] order
    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .into_iter()
            .filter_map(|key| match self.get(key) {
                Ok(Some(value)) => Some((key, value)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        assert!(config.is_empty());

        assert!(config
            .set("project-path", "App.xcodeproj/project.pbxproj".to_string())
            .is_ok());
        assert!(!config.is_empty());
        assert!(matches!(
            config.get("project-path"),
            Ok(Some(path)) if path == "App.xcodeproj/project.pbxproj"
        ));
        assert!(matches!(config.get("plugin-dir"), Ok(None)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = Config::default();
        let result = config.set("cache-path", "/tmp".to_string());
        assert!(matches!(result, Err(ConfigError::UnknownKey(key)) if key == "cache-path"));
        assert!(config.is_empty());
        assert!(config.get("verbosity").is_err());
    }

    #[test]
    fn test_values_iter_order() {
        let config = Config {
            project_path: Some("a.pbxproj".to_string()),
            plugin_dir: Some("plugins/example".to_string()),
        };
        let keys: Vec<&str> = config.values_iter().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["project-path", "plugin-dir"]);
    }

    #[test]
    fn test_values_iter_skips_unset_keys() {
        let mut config = Config::default();
        assert!(config.values_iter().is_empty());

        assert!(config.set("plugin-dir", "plugins/weather".to_string()).is_ok());
        assert_eq!(
            config.values_iter(),
            vec![("plugin-dir", "plugins/weather".to_string())]
        );
    }

    #[test]
    fn test_save_and_load_from_path() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("nested").join("omni.toml");

        let config = Config {
            project_path: None,
            plugin_dir: Some("plugin-template".to_string()),
        };
        assert!(config.save_to_path(&path).is_ok());

        let contents = fs::read_to_string(&path).unwrap_or_default();
        assert!(contents.contains("plugin_dir = \"plugin-template\""));
        assert!(!contents.contains("project_path"));

        let loaded = Config::load_from_path(&path);
        assert!(matches!(loaded, Ok(ref c) if *c == config));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let loaded = Config::load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(loaded, Ok(ref c) if c.is_empty()));
    }

    #[test]
    fn test_load_malformed_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("omni.toml");
        assert!(fs::write(&path, "project_path = [").is_ok());
        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
