//! `vkad settings` – show stored settings.

use anyhow::Result;
use std::path::PathBuf;
use vkad_core::settings::Settings;

use super::settings_path;

pub fn run_settings(explicit: Option<PathBuf>) -> Result<()> {
    let path = settings_path(explicit)?;
    let s = Settings::load(&path)?;
    println!("file:   {}", path.display());
    println!("token:  {}", s.masked_token());
    println!("folder: {}", s.download_folder);
    Ok(())
}
