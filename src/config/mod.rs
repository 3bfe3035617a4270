//! Configuration file support for keyguard.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/keyguard/` on Linux). A missing file means defaults.

pub mod types;

pub use types::SuppressionConfig;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [suppression]
/// platform_defaults = true
/// extra_rules = ["Alt+F4"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Key suppression settings
    #[serde(default)]
    pub suppression: SuppressionConfig,
}

impl Config {
    /// Trims rule strings and drops empty entries.
    fn normalize(&mut self) {
        let before = self.suppression.extra_rules.len();
        self.suppression.extra_rules = self
            .suppression
            .extra_rules
            .iter()
            .map(|rule| rule.trim().to_string())
            .filter(|rule| !rule.is_empty())
            .collect();

        let dropped = before - self.suppression.extra_rules.len();
        if dropped > 0 {
            warn!("Ignoring {} blank suppression.extra_rules entries", dropped);
        }
    }

    /// Path to the default configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("keyguard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from `path` (or the default location), returning
    /// defaults when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        config.normalize();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Writes the documented example config to `path` (or the default location).
    ///
    /// # Errors
    /// Returns an error if a file already exists there or cannot be written.
    pub fn create_default_file(path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        fs::write(&config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.suppression.platform_defaults);
        assert!(config.suppression.extra_rules.is_empty());
    }

    #[test]
    fn parses_suppression_section() {
        let config = Config::from_toml(
            r#"
            [suppression]
            platform_defaults = false
            extra_rules = ["Alt+F4", "Cmd+Q"]
            "#,
        )
        .unwrap();
        assert!(!config.suppression.platform_defaults);
        assert_eq!(config.suppression.extra_rules, vec!["Alt+F4", "Cmd+Q"]);
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(Config::from_toml("[suppression\nplatform_defaults = 1").is_err());
        assert!(Config::from_toml("[suppression]\nplatform_defaults = \"yes\"").is_err());
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(&temp.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_normalizes_rules() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[suppression]\nextra_rules = [\"  Alt+F4 \", \"\", \"   \"]\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.suppression.extra_rules, vec!["Alt+F4"]);
    }

    #[test]
    fn example_config_parses_to_defaults() {
        let config = Config::from_toml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn create_default_file_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let written = Config::create_default_file(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), EXAMPLE_CONFIG);
        assert!(Config::create_default_file(Some(&path)).is_err());
    }

    #[test]
    fn schema_mentions_suppression() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("suppression"));
        assert!(schema.contains("extra_rules"));
    }
}
