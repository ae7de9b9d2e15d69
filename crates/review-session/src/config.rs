//! Client configuration
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or none at all) yields a working local setup:
//!
//! ```toml
//! [backend]
//! base_url = "http://localhost:3000"
//! timeout_secs = 120
//!
//! [client]
//! model = "gpt-4o"
//! api_key_env = "OPENAI_API_KEY"
//! ```
//!
//! The API key itself is never stored in the file; only the name of the
//! environment variable that holds it.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared_types::ApiKey;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub client: ClientSettings,
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Where the review backend lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    #[serde(default = "default_models_path")]
    pub models_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            analyze_path: default_analyze_path(),
            chat_path: default_chat_path(),
            models_path: default_models_path(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_analyze_path() -> String {
    "/api/analyze".to_string()
}

fn default_chat_path() -> String {
    "/chat".to_string()
}

fn default_models_path() -> String {
    "/api/models".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Remembered model preference
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            model: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl ClientSettings {
    /// Read the API key from the configured environment variable
    pub fn api_key_from_env(&self) -> Option<ApiKey> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(ApiKey::new)
            .filter(|key| !key.is_empty())
    }
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
