//! Application configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

fn default_vault_path() -> PathBuf {
    PathBuf::from(".mithai/session.json")
}

/// Configuration for the storefront client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Base URL of the storefront API, including the `/api` prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// File the session vault persists to.
    #[serde(default = "default_vault_path")]
    pub vault_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            vault_path: default_vault_path(),
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    /// Load from a file if it exists, defaults otherwise. Environment
    /// overrides apply either way.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default().with_env_overrides())
        }
    }

    /// Apply `MITHAI_API_URL` and `MITHAI_SESSION_PATH` overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("MITHAI_API_URL") {
            if !url.is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(path) = std::env::var("MITHAI_SESSION_PATH") {
            if !path.is_empty() {
                self.vault_path = PathBuf::from(path);
            }
        }
        self
    }
}
