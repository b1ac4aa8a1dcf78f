use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{API_BASE_URL, USER_AGENT};
use crate::fetcher::DEFAULT_MAX_CONCURRENCY;
use crate::retry::RetryPolicy;

/// Retry policy parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first (0 = use the built-in default).
    pub max_retries: u32,
    /// Delay in seconds before the first retry (e.g. 0.5 = 500ms).
    pub initial_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_secs: 5.0,
            max_delay_secs: 60,
        }
    }
}

impl RetryConfig {
    /// Converts to a [`RetryPolicy`], substituting defaults for zero fields.
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_delay: Duration::from_secs_f64(self.initial_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
        .normalized()
    }
}

/// Client configuration loaded from `~/.config/bangumi-client/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Bangumi v0 API.
    pub api_base_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Cap on concurrent fetches in a batch call.
    pub max_concurrent_fetches: usize,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENCY,
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bangumi-client")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`], but against an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        let default_cfg = ClientConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ClientConfig = toml::from_str(&data)?;
    Ok(cfg)
}
