//! Application configuration
//!
//! Configuration loaded from .wiki-diff-viewer.toml file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// When the parent of a range's first revision is applied to the diff query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentResolution {
    /// Resolve the parent before the first request, so a ranged diff starts
    /// at the first revision's parent right away
    #[default]
    Eager,
    /// Issue the first request against the end revision's predecessor and
    /// only use the resolved parent for the wiki link
    Deferred,
}

/// Application configuration loaded from .wiki-diff-viewer.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Wiki used when an article does not name one (e.g. "en.wikipedia")
    #[serde(default = "default_wiki")]
    pub default_wiki: String,

    /// URL scheme for wiki hosts
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// User-Agent sent with every API request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How the first revision's parent feeds into the first diff request
    #[serde(default)]
    pub parent_resolution: ParentResolution,

    /// Per-wiki host overrides, keyed by wiki identifier
    #[serde(default)]
    pub host_overrides: HashMap<String, String>,

    /// How long the command line front end waits for a diff
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
}

fn default_wiki() -> String {
    "en.wikipedia".to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_user_agent() -> String {
    format!("wiki-diff-viewer/{}", env!("CARGO_PKG_VERSION"))
}

fn default_wait_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_wiki: default_wiki(),
            scheme: default_scheme(),
            user_agent: default_user_agent(),
            parent_resolution: ParentResolution::default(),
            host_overrides: HashMap::new(),
            wait_timeout_secs: default_wait_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}
