use crate::retry::RetryPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Retry schedule parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay in seconds slept before each re-attempt, in order. The number
    /// of attempts is one more than the number of delays.
    pub delay_secs: Vec<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            delay_secs: vec![1, 2],
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.delay_secs.iter().map(|s| Duration::from_secs(*s)).collect())
    }
}

/// Global configuration loaded from `~/.config/uplink/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UplinkConfig {
    /// Default per-attempt timeout for the generic HTTP transport, seconds.
    pub timeout_secs: u64,
    /// Default multipart form field name.
    pub field_name: String,
    /// Optional retry schedule; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for UplinkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            field_name: "file".to_string(),
            retry: None,
        }
    }
}

impl UplinkConfig {
    /// Retry policy from the config, or the built-in default schedule.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(|r| r.policy())
            .unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("uplink")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UplinkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UplinkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: UplinkConfig = toml::from_str(&data)?;
    Ok(cfg)
}
