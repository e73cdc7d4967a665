//! Profile configuration
//!
//! A TOML file under the platform config dir, with environment overrides
//! for the store URL and token (`HRDESK_STORE_URL`, `HRDESK_TOKEN`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_STORE_URL: &str = "http://localhost:8080";
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the document store API.
    #[serde(default = "default_store_url")]
    pub store_url: String,
    /// Bearer token, if the store requires auth.
    #[serde(default)]
    pub token: Option<String>,
    /// Default rows per page for list output.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            token: None,
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load the profile, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config: {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("HRDESK_STORE_URL") {
            config.store_url = url;
        }
        if let Ok(token) = std::env::var("HRDESK_TOKEN") {
            config.token = Some(token);
        }
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hrdesk").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store_url, DEFAULT_STORE_URL);
        assert_eq!(config.page_size, 10);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("store_url = \"https://hr.example.com\"").unwrap();
        assert_eq!(config.store_url, "https://hr.example.com");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
