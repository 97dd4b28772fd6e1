use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest page `photos.get` returns; bigger requests are silently truncated.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Global configuration loaded from `~/.config/vkad/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VkadConfig {
    /// Base URL of the API method endpoint; method names are appended as path segments.
    pub api_base_url: String,
    /// API version sent as the `v` parameter on every call.
    pub api_version: String,
    /// Number of photos requested per `photos.get` page, 1..=MAX_PAGE_SIZE.
    pub page_size: u32,
    /// Pause after each downloaded photo, in milliseconds.
    pub download_delay_ms: u64,
    /// Optional connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Optional User-Agent header for API calls and downloads.
    pub user_agent: Option<String>,
}

impl Default for VkadConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.vk.com/method".to_string(),
            api_version: "5.131".to_string(),
            page_size: 1000,
            download_delay_ms: 500,
            connect_timeout_secs: None,
            user_agent: None,
        }
    }
}

impl VkadConfig {
    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    /// `page_size` limited to what one API page can hold.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vkad")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VkadConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] but with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<VkadConfig> {
    if !path.exists() {
        let default_cfg = VkadConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: VkadConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    if !(1..=MAX_PAGE_SIZE).contains(&cfg.page_size) {
        anyhow::bail!(
            "page_size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE,
            cfg.page_size
        );
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = VkadConfig::default();
        assert_eq!(cfg.api_base_url, "https://api.vk.com/method");
        assert_eq!(cfg.page_size, 1000);
        assert_eq!(cfg.download_delay(), Duration::from_millis(500));
        assert!(cfg.connect_timeout().is_none());
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            download_delay_ms = 0
            connect_timeout_secs = 10
        "#;
        let cfg: VkadConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.download_delay_ms, 0);
        assert_eq!(cfg.connect_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(cfg.api_version, "5.131");
        assert_eq!(cfg.page_size, 1000);
        assert!(cfg.user_agent.is_none());
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.page_size, 1000);

        let reloaded = load_or_init_at(&path).unwrap();
        assert_eq!(reloaded.api_base_url, cfg.api_base_url);
    }

    #[test]
    fn load_rejects_zero_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 0\n").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }

    #[test]
    fn load_rejects_page_size_above_api_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 2000\n").unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(err.to_string().contains("between 1 and 1000"), "got {err}");

        fs::write(&path, "page_size = 1000\n").unwrap();
        assert_eq!(load_or_init_at(&path).unwrap().page_size, 1000);
    }

    #[test]
    fn effective_page_size_is_clamped() {
        let mut cfg = VkadConfig::default();
        cfg.page_size = 5000;
        assert_eq!(cfg.effective_page_size(), MAX_PAGE_SIZE);
        cfg.page_size = 0;
        assert_eq!(cfg.effective_page_size(), 1);
        cfg.page_size = 250;
        assert_eq!(cfg.effective_page_size(), 250);
    }
}
