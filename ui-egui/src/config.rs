// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client configuration stored as TOML in the platform config directory.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use senet_core::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Game server, `host:port`
    pub server_addr: String,
    /// Play against the in-process loopback instead of a server
    pub offline: bool,
    /// Directory holding the board, Anubis and stick images
    pub assets_dir: PathBuf,
    pub sound: SoundConfig,
    pub render: RenderConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    /// Master volume (0.0 to 1.0)
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub retry_delay_ms: u64,
    pub retry_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Zoom applied to the 879x400 canvas
    pub scale: f32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:7000".to_string(),
            offline: false,
            assets_dir: PathBuf::from("assets"),
            sound: SoundConfig::default(),
            render: RenderConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.8,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            retry_delay_ms: policy.delay.as_millis() as u64,
            retry_limit: policy.max_attempts,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl RenderConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            delay: Duration::from_millis(self.retry_delay_ms),
            max_attempts: self.retry_limit,
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "senet", "senet")
        .context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Rotated client logs live beside the platform's local data, or `./logs`
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("org", "senet", "senet")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Load the config from the platform location, creating it if absent
pub fn load_config() -> Result<ClientConfig> {
    let config_path = get_config_path()?;
    load_from(&config_path)
}

/// Load the config at `path`, writing defaults there if the file is missing
pub fn load_from(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        tracing::info!("Config file not found, creating default at: {}", path.display());
        let config = ClientConfig::default();
        save_to(&config, path)?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str::<ClientConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

pub fn save_to(config: &ClientConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    tracing::debug!("Saved config to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_retry_policy_matches_core() {
        let config = ClientConfig::default();
        assert_eq!(config.render.retry_policy(), RetryPolicy::default());
        assert_eq!(config.render.retry_delay_ms, 100);
    }

    #[test]
    fn test_log_dir_is_named_logs() {
        assert!(log_dir().ends_with("logs"));
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = load_from(&config_path)?;
        assert_eq!(config, ClientConfig::default());
        assert!(config_path.exists());
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = ClientConfig::default();
        config.server_addr = "senet.example:9000".to_string();
        config.sound.enabled = false;
        config.window.scale = 1.5;
        save_to(&config, &config_path)?;

        assert_eq!(load_from(&config_path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "offline = true\n[render]\nretry_limit = 5\n")?;

        let config = load_from(&config_path)?;
        assert!(config.offline);
        assert_eq!(config.render.retry_limit, 5);
        assert_eq!(config.render.retry_delay_ms, 100);
        assert_eq!(config.server_addr, "127.0.0.1:7000");
        Ok(())
    }

    #[test]
    fn test_garbage_file_is_an_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "offline = [")?;
        assert!(load_from(&config_path).is_err());
        Ok(())
    }
}
