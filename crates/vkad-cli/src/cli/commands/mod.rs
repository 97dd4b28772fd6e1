//! CLI command handlers. Each command is in its own file.

mod download;
mod resolve;
mod settings;

pub use download::run_download;
pub use resolve::run_resolve;
pub use settings::run_settings;

use anyhow::Result;
use std::path::PathBuf;
use vkad_core::settings::default_settings_path;

/// Explicit `--settings` path, or the default next to the executable.
fn settings_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p),
        None => default_settings_path(),
    }
}
