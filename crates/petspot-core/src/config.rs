//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API base URL, the last email used to sign in and an
//! optional override for the storage file location.
//!
//! Configuration is stored at `~/.config/petspot/config.json`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "petspot";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Storage file name in the cache directory
const STORAGE_FILE: &str = "storage.json";

/// Environment variable naming the API base URL
pub const API_BASE_URL_VAR: &str = "PETSPOT_API_BASE_URL";

/// API base URL fixed when the binary was built, if any
const BUILD_API_BASE_URL: Option<&str> = option_env!("PETSPOT_API_BASE_URL");

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
    pub storage_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Location of the persistent key-value store
    pub fn storage_file(&self) -> Result<PathBuf> {
        match self.storage_path {
            Some(ref path) => Ok(path.clone()),
            None => Ok(self.cache_dir()?.join(STORAGE_FILE)),
        }
    }

    /// API base URL: runtime environment first, then the config file, then
    /// the value baked in at build time.
    pub fn api_base_url(&self) -> Option<String> {
        Self::resolve_api_base_url(
            std::env::var(API_BASE_URL_VAR).ok(),
            self.api_base_url.clone(),
            BUILD_API_BASE_URL,
        )
    }

    fn resolve_api_base_url(
        env: Option<String>,
        file: Option<String>,
        build: Option<&str>,
    ) -> Option<String> {
        [env, file, build.map(str::to_string)]
            .into_iter()
            .flatten()
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url_precedence() {
        let url = Config::resolve_api_base_url(
            Some("http://env".to_string()),
            Some("http://file".to_string()),
            Some("http://build"),
        );
        assert_eq!(url.as_deref(), Some("http://env"));

        let url = Config::resolve_api_base_url(None, Some("http://file".to_string()), Some("http://build"));
        assert_eq!(url.as_deref(), Some("http://file"));

        let url = Config::resolve_api_base_url(None, None, Some("http://build"));
        assert_eq!(url.as_deref(), Some("http://build"));

        assert_eq!(Config::resolve_api_base_url(None, None, None), None);
    }

    #[test]
    fn test_api_base_url_skips_blank_values() {
        let url = Config::resolve_api_base_url(
            Some("  ".to_string()),
            Some("http://file".to_string()),
            None,
        );
        assert_eq!(url.as_deref(), Some("http://file"));
    }

    #[test]
    fn test_storage_file_override() {
        let config = Config {
            storage_path: Some(PathBuf::from("/tmp/petspot/store.json")),
            ..Default::default()
        };
        assert_eq!(config.storage_file().unwrap(), PathBuf::from("/tmp/petspot/store.json"));
    }

    #[test]
    fn test_save_to_and_load_from() {
        let path = std::env::temp_dir()
            .join(format!("petspot-config-test-{}", std::process::id()))
            .join("config.json");
        assert!(Config::load_from(&path).unwrap().last_email.is_none());

        let config = Config {
            last_email: Some("ana@example.com".to_string()),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.last_email.as_deref(), Some("ana@example.com"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_config_round_trip_json() {
        let json = r#"{"api_base_url":"http://localhost:3000","last_email":"ana@example.com","storage_path":null}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.last_email.as_deref(), Some("ana@example.com"));
        assert!(config.storage_path.is_none());
    }
}
