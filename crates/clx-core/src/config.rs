//! Configuration management for clx.
//!
//! Loads configuration from ${CLX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Backend address used when no URL is configured anywhere.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for clx configuration and data directories.
    //!
    //! CLX_HOME resolution order:
    //! 1. CLX_HOME environment variable (if set)
    //! 2. ~/.config/clx (default)

    use std::path::PathBuf;

    /// Returns the clx home directory.
    pub fn clx_home() -> PathBuf {
        if let Ok(home) = std::env::var("CLX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("clx"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        clx_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        clx_home().join("session.json")
    }

    /// Returns the log directory.
    pub fn logs_dir() -> PathBuf {
        clx_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API settings.
    pub api: ApiConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL (for non-default deployments).
    pub base_url: Option<String>,
}

impl ApiConfig {
    /// Returns the configured base URL if set and non-empty.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Resolves the backend base URL.
///
/// Precedence: explicit flag (clap also maps CLX_API_URL onto it) > config
/// file > built-in default. A trailing slash is stripped so endpoint paths
/// can be appended verbatim.
pub fn resolve_base_url(flag: Option<&str>, config: &Config) -> String {
    let picked = flag
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| config.api.effective_base_url())
        .unwrap_or(DEFAULT_BASE_URL);
    picked.trim_end_matches('/').to_string()
}
