//! CLI configuration.
//!
//! Read from `gamedex/config.json` under the user config directory. Every
//! field is optional; the `RAWG_API_KEY` environment variable overrides the
//! stored key.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gamedex_catalog::DEFAULT_PAGE_SIZE;
use gamedex_rawg::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "RAWG_API_KEY";

/// On-disk shape of `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    api_key: String,
    base_url: Option<String>,
    page_size: Option<u32>,
    timeout_secs: Option<u64>,
}

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub page_size: u32,
    pub timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
        }
    }
}

impl AppConfig {
    /// Loads the user config file, then applies the environment override.
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::load_from(&config_path()?)?;
        Ok(config.with_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Loads `path`. A missing file yields defaults; so does an unparseable
    /// one, with a warning.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let Ok(file) = serde_json::from_str::<ConfigFile>(&content) else {
            tracing::warn!(
                path = %path.display(),
                "failed to parse config, using defaults"
            );
            return Ok(Self::default());
        };

        let defaults = Self::default();
        Ok(Self {
            api_key: file.api_key.trim().to_string(),
            base_url: file
                .base_url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.base_url),
            page_size: file.page_size.filter(|&n| n > 0).unwrap_or(defaults.page_size),
            timeout: file.timeout_secs.map(Duration::from_secs),
        })
    }

    /// Replaces the API key with `key` when it is set and non-blank.
    pub fn with_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }
}

/// Path of the config file: `<config dir>/gamedex/config.json`.
pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(config_base_dir()?.join("gamedex").join("config.json"))
}

fn config_base_dir() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| anyhow::anyhow!("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata))
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(xdg));
        }
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "https://api.rawg.io/api");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn reads_camel_case_fields() {
        let (_dir, path) = write_config(
            r#"{
                "apiKey": " abc123 ",
                "baseUrl": "http://localhost:8080/api",
                "pageSize": 40,
                "timeoutSecs": 15
            }"#,
        );
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.page_size, 40);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_dir, path) = write_config(r#"{ "apiKey": "k", "pageSize": 0 }"#);
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let (_dir, path) = write_config("{ not json");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn key_override_ignores_blank_values() {
        let config = AppConfig {
            api_key: "from-file".into(),
            ..AppConfig::default()
        };
        let config = config.with_key_override(Some("   ".into()));
        assert_eq!(config.api_key, "from-file");

        let config = config.with_key_override(Some("from-env".into()));
        assert_eq!(config.api_key, "from-env");

        let config = config.with_key_override(None);
        assert_eq!(config.api_key, "from-env");
    }

    #[test]
    fn client_config_carries_settings() {
        let config = AppConfig {
            api_key: "k".into(),
            timeout: Some(Duration::from_secs(3)),
            ..AppConfig::default()
        };
        let client = config.client_config();
        assert_eq!(client.api_key, "k");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn config_path_ends_with_app_dir() {
        let path = config_path().unwrap();
        assert!(path.ends_with("gamedex/config.json"));
    }
}
