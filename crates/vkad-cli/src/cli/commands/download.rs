//! `vkad download` – run one album download and stream its log to stdout.

use anyhow::Result;
use std::path::{Path, PathBuf};
use vkad_core::config::VkadConfig;
use vkad_core::settings::Settings;
use vkad_core::worker::{self, RunOutcome, RunRequest, WorkerEvent};

use super::settings_path;

/// Runs the worker on its own thread and prints every log line as it arrives.
pub fn run_download(
    cfg: &VkadConfig,
    album: &str,
    token: Option<String>,
    folder: Option<String>,
    settings: Option<PathBuf>,
) -> Result<()> {
    let path = settings_path(settings)?;
    let request = prepare_request(album, token, folder, &path)?;

    let handle = worker::spawn_run(request, cfg)?;
    let summary = handle.wait(|event| {
        if let WorkerEvent::Log(line) = event {
            println!("{}", line);
        }
    })?;

    if summary.outcome == RunOutcome::Aborted {
        anyhow::bail!("download aborted");
    }
    Ok(())
}

/// Fills token/folder from the settings file at `path`, requires all three
/// inputs, then rewrites the settings file with the values about to be used.
/// A failed save is only a warning.
fn prepare_request(
    album: &str,
    token: Option<String>,
    folder: Option<String>,
    path: &Path,
) -> Result<RunRequest> {
    let stored = Settings::load(path)?;

    let token = token.unwrap_or(stored.token);
    let folder = folder.unwrap_or(stored.download_folder);
    let (token, album, folder) = (token.trim(), album.trim(), folder.trim());
    if token.is_empty() || album.is_empty() || folder.is_empty() {
        anyhow::bail!("token, album and download folder are all required");
    }

    if let Err(e) = Settings::for_run(token, folder).save(path) {
        tracing::warn!("could not save settings: {:#}", e);
        eprintln!("warning: could not save settings: {:#}", e);
    }

    Ok(RunRequest::new(token, album, folder))
}
