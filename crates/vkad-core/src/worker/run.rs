//! One album download, start to finish, on the calling thread.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::album_ref::{self, AlbumReference};
use crate::api::AlbumApi;
use crate::config::VkadConfig;
use crate::fetch::PhotoFetcher;
use crate::model::PhotoRecord;
use crate::naming;

use super::events::{EventSink, RunOutcome, RunSummary};
use super::paginate::collect_photos;

/// Inputs of one run, owned by the worker for its whole duration.
#[derive(Clone)]
pub struct RunRequest {
    pub token: String,
    pub album_input: String,
    pub download_folder: PathBuf,
}

impl RunRequest {
    pub fn new(token: &str, album_input: &str, download_folder: &str) -> Self {
        Self {
            token: token.trim().to_string(),
            album_input: album_input.trim().to_string(),
            download_folder: PathBuf::from(download_folder.trim()),
        }
    }
}

impl std::fmt::Debug for RunRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunRequest")
            .field("token", &"<redacted>")
            .field("album_input", &self.album_input)
            .field("download_folder", &self.download_folder)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub page_size: u32,
    /// Pause after each successful download.
    pub download_delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&VkadConfig::default())
    }
}

impl From<&VkadConfig> for RunOptions {
    fn from(cfg: &VkadConfig) -> Self {
        Self {
            page_size: cfg.effective_page_size(),
            download_delay: cfg.download_delay(),
        }
    }
}

fn abort(events: &EventSink, message: String) -> RunSummary {
    events.error(message);
    let summary = RunSummary::aborted();
    events.finished(summary.clone());
    summary
}

/// Runs the whole protocol: authenticate, resolve, title lookup, pagination,
/// folder creation, sequential downloads. Always ends with a finished event.
pub fn run_album_download<A, F>(
    request: &RunRequest,
    api: &A,
    fetcher: &F,
    opts: &RunOptions,
    events: &EventSink,
) -> RunSummary
where
    A: AlbumApi + ?Sized,
    F: PhotoFetcher + ?Sized,
{
    events.info("connecting to the API...");
    match api.authenticate() {
        Ok(Some(name)) => events.info(format!("authorized as {}", name)),
        Ok(None) => {}
        Err(e) => return abort(events, format!("failed to connect to the API: {}", e)),
    }

    let album = match album_ref::resolve(&request.album_input) {
        Ok(album) => album,
        Err(e) => return abort(events, format!("invalid album reference: {}", e)),
    };

    let title = album_title(api, &album, events);
    events.info(format!("downloading album '{}' ({})...", title, album));

    let photos = collect_photos(api, &album, opts.page_size, events);
    events.info(format!("found {} photos in the album", photos.len()));

    let folder = request
        .download_folder
        .join(naming::album_folder_name(&title, &album));
    if let Err(e) = fs::create_dir_all(&folder) {
        return abort(
            events,
            format!("failed to create folder {}: {}", folder.display(), e),
        );
    }
    events.info(format!("saving to folder {}", folder.display()));

    let mut downloaded = 0;
    let mut failed = 0;
    for (index, photo) in photos.iter().enumerate() {
        match download_photo(fetcher, photo, &folder) {
            Ok(file_name) => {
                downloaded += 1;
                events.success(format!("downloaded photo #{}: {}", index + 1, file_name));
                if !opts.download_delay.is_zero() {
                    std::thread::sleep(opts.download_delay);
                }
            }
            Err(e) => {
                failed += 1;
                events.error(format!("failed to download photo {}: {:#}", photo.id, e));
            }
        }
    }

    events.info(format!(
        "done: {} of {} photos downloaded, {} failed",
        downloaded,
        photos.len(),
        failed
    ));
    let summary = RunSummary {
        outcome: RunOutcome::Completed,
        photos_found: photos.len(),
        downloaded,
        failed,
        folder: Some(folder),
    };
    events.finished(summary.clone());
    summary
}

fn album_title<A: AlbumApi + ?Sized>(api: &A, album: &AlbumReference, events: &EventSink) -> String {
    match api.album_title(album) {
        Ok(title) => title,
        Err(e) => {
            events.warn(format!("album title not found: {}", e));
            naming::fallback_title(album)
        }
    }
}

fn download_photo<F: PhotoFetcher + ?Sized>(
    fetcher: &F,
    photo: &PhotoRecord,
    folder: &Path,
) -> Result<String> {
    let url = photo
        .best_url()
        .ok_or_else(|| anyhow!("photo {} has no downloadable sizes", photo.id))?;
    let file_name = naming::photo_file_name(photo.id);
    let bytes = fetcher.fetch_to(url, &folder.join(&file_name))?;
    tracing::debug!(photo_id = photo.id, bytes, "photo saved");
    Ok(file_name)
}
