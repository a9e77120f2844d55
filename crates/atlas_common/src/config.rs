//! Atlas configuration.
//!
//! Config file: ~/.config/atlas/config.toml, with environment overrides
//! (ATLAS_ENDPOINT, ATLAS_MODEL, ATLAS_API_KEY, ATLAS_TIMEOUT_SECS).
//! The core pipeline never reads configuration itself; atlasctl loads this
//! and hands a constructed client to the pipeline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// OpenAI-compatible chat completions base URL (without the
    /// /chat/completions suffix).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name passed through to the backend.
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token for the backend. Optional for local endpoints.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout. A timed-out call counts as a transport failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AtlasConfig {
    /// Default config file path (~/.config/atlas/config.toml).
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("atlas/config.toml"));
        }
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config/atlas/config.toml"))
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load from the default path (defaults if missing), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("ATLAS_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("ATLAS_MODEL") {
            self.model = model;
        }
        if let Ok(key) = std::env::var("ATLAS_API_KEY") {
            self.api_key = Some(key);
        }
        if let Ok(secs) = std::env::var("ATLAS_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.timeout_secs = secs;
            }
        }
    }

    /// Local endpoints (e.g. an Ollama sidecar) work unauthenticated;
    /// anything else needs a key before we start.
    pub fn requires_api_key(&self) -> bool {
        !(self.endpoint.contains("localhost") || self.endpoint.contains("127.0.0.1"))
    }
}
