//! Configuration file support for gh-sbom.
//!
//! Provides YAML-based configuration through `gh-sbom.config.yml` files:
//! API base URLs, retry/timeout tuning, and the optional home
//! organization consulted before the global repository search.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "gh-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub github_api_url: Option<String>,
    pub npm_registry_url: Option<String>,
    pub pypi_api_url: Option<String>,
    pub rubygems_api_url: Option<String>,
    pub max_retries: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub rate_limit_pause_ms: Option<u64>,
    pub home_org: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Resolved runtime settings with every default applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub github_api_url: String,
    pub npm_registry_url: String,
    pub pypi_api_url: String,
    pub rubygems_api_url: String,
    pub max_retries: u32,
    pub timeout: Duration,
    pub rate_limit_pause: Duration,
    pub home_org: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_api_url: "https://api.github.com".to_string(),
            npm_registry_url: "https://registry.npmjs.org".to_string(),
            pypi_api_url: "https://pypi.org/pypi".to_string(),
            rubygems_api_url: "https://rubygems.org/api/v1/gems".to_string(),
            max_retries: 3,
            timeout: Duration::from_secs(30),
            rate_limit_pause: Duration::from_millis(500),
            home_org: None,
        }
    }
}

impl Settings {
    /// Overlay a config file on the defaults.
    pub fn with_config(config: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            github_api_url: config.github_api_url.unwrap_or(defaults.github_api_url),
            npm_registry_url: config
                .npm_registry_url
                .unwrap_or(defaults.npm_registry_url),
            pypi_api_url: config.pypi_api_url.unwrap_or(defaults.pypi_api_url),
            rubygems_api_url: config
                .rubygems_api_url
                .unwrap_or(defaults.rubygems_api_url),
            max_retries: config.max_retries.unwrap_or(defaults.max_retries),
            timeout: config
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            rate_limit_pause: config
                .rate_limit_pause_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.rate_limit_pause),
            home_org: config.home_org,
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(0) = config.max_retries {
        bail!(
            "Invalid config: max_retries must be at least 1.\n\n\
             💡 Hint: Use max_retries: 1 to disable retrying."
        );
    }
    if let Some(0) = config.timeout_secs {
        bail!(
            "Invalid config: timeout_secs must be positive.\n\n\
             💡 Hint: The default is 30 seconds."
        );
    }
    if let Some(org) = &config.home_org {
        if org.trim().is_empty() {
            bail!(
                "Invalid config: home_org must not be empty.\n\n\
                 💡 Hint: Remove the field to disable the org-scoped lookup."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
github_api_url: https://github.example.com/api/v3
max_retries: 5
timeout_secs: 10
home_org: acme
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(
            config.github_api_url.as_deref(),
            Some("https://github.example.com/api/v3")
        );
        assert_eq!(config.max_retries, Some(5));
        assert_eq!(config.home_org.as_deref(), Some("acme"));
    }

    #[test]
    fn test_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from_path(&dir.path().join("absent.yml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "max_retries: [not a number").unwrap();
        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_zero_max_retries_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "max_retries: 0").unwrap();
        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("max_retries"));
    }

    #[test]
    fn test_empty_home_org_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "home_org: \"  \"").unwrap();
        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_discover_config_absent_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_discover_config_present() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "max_retries: 2").unwrap();
        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.max_retries, Some(2));
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.github_api_url, "https://api.github.com");
        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.home_org.is_none());
    }

    #[test]
    fn test_settings_overlay() {
        let config = ConfigFile {
            max_retries: Some(5),
            rate_limit_pause_ms: Some(100),
            home_org: Some("acme".to_string()),
            ..Default::default()
        };
        let settings = Settings::with_config(config);
        assert_eq!(settings.max_retries, 5);
        assert_eq!(settings.rate_limit_pause, Duration::from_millis(100));
        assert_eq!(settings.home_org.as_deref(), Some("acme"));
        // Untouched fields keep their defaults
        assert_eq!(settings.npm_registry_url, "https://registry.npmjs.org");
    }
}
