//! Last-used settings: a three-line UTF-8 file (token, download folder, album name).
//!
//! Read at startup if present and overwritten on every run start. The third
//! line is kept for compatibility with existing files but is never used.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name used next to the executable when no explicit path is given.
pub const SETTINGS_FILE_NAME: &str = "last_settings.cfg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: String,
    pub download_folder: String,
    pub album_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: String::new(),
            download_folder: default_download_folder(),
            album_name: String::new(),
        }
    }
}

fn default_download_folder() -> String {
    dirs::home_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// `last_settings.cfg` in the directory of the running executable.
pub fn default_settings_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locate current executable")?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow::anyhow!("executable has no parent directory"))?;
    Ok(dir.join(SETTINGS_FILE_NAME))
}

impl Settings {
    /// Parses file contents. Missing lines fall back to defaults.
    pub fn parse(data: &str) -> Self {
        let mut lines = data.lines().map(str::trim);
        let token = lines.next().unwrap_or_default().to_string();
        let download_folder = lines
            .next()
            .map(str::to_string)
            .unwrap_or_else(default_download_folder);
        let album_name = lines.next().unwrap_or_default().to_string();
        Self {
            token,
            download_folder,
            album_name,
        }
    }

    pub fn to_file_contents(&self) -> String {
        format!(
            "{}\n{}\n{}\n",
            self.token, self.download_folder, self.album_name
        )
    }

    /// Loads settings from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Ok(Self::parse(&data))
    }

    /// Overwrites `path` with these settings.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_file_contents())
            .with_context(|| format!("write {}", path.display()))?;
        tracing::debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// Settings as written at the start of a run: album name is always cleared.
    pub fn for_run(token: &str, download_folder: &str) -> Self {
        Self {
            token: token.to_string(),
            download_folder: download_folder.to_string(),
            album_name: String::new(),
        }
    }

    /// Token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        let count = self.token.chars().count();
        if count <= 4 {
            return "*".repeat(count);
        }
        let tail: String = self.token.chars().skip(count - 4).collect();
        format!("{}{}", "*".repeat(count - 4), tail)
    }
}
