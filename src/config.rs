//! Configuration Management
//!
//! Handles the optional config file and resolves the settings the API client
//! runs with (CLI > environment > config file > defaults).

use crate::api::ApiConfig;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable supplying the API key when it is not passed positionally
pub const API_KEY_ENV: &str = "apiKey";

/// User configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// API base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Prefix for names of resources created by the scenarios
    #[serde(default)]
    pub name_prefix: Option<String>,
    /// API key, used when neither the CLI nor the environment provide one
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sqdemo").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse config file content, falling back to defaults if malformed
    pub fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config file: {}", e);
            Self::default()
        })
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub env_api_key: Option<String>,
    pub base_url: Option<String>,
    pub name_prefix: Option<String>,
}

impl Overrides {
    /// Read the environment part of the overrides
    pub fn with_env(mut self) -> Self {
        self.env_api_key = std::env::var(API_KEY_ENV).ok();
        self
    }
}

/// Resolve the effective API configuration
pub fn resolve(overrides: Overrides, config: &Config) -> Result<ApiConfig> {
    let api_key = overrides
        .api_key
        .or(overrides.env_api_key)
        .or_else(|| config.api_key.clone())
        .filter(|key| !key.is_empty());

    let Some(api_key) = api_key else {
        bail!(
            "No API key configured. Pass it as the first argument or set the {} environment variable",
            API_KEY_ENV
        );
    };

    let base_url = overrides
        .base_url
        .or_else(|| config.base_url.clone())
        .unwrap_or_else(|| ApiConfig::DEFAULT_BASE_URL.to_string());

    url::Url::parse(&base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
    let base_url = base_url.trim_end_matches('/');

    let name_prefix = overrides
        .name_prefix
        .or_else(|| config.name_prefix.clone())
        .unwrap_or_else(|| ApiConfig::DEFAULT_NAME_PREFIX.to_string());

    Ok(ApiConfig::new(base_url, &api_key).with_name_prefix(&name_prefix))
}
