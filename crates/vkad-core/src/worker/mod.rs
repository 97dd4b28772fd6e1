//! Download worker: runs one album download on a background thread and
//! reports progress over a channel.
//!
//! The worker never touches front-end state. Consumers read [`WorkerEvent`]s
//! from [`RunHandle::events`] (or pass a callback to [`RunHandle::wait`]);
//! the last event of every run is [`WorkerEvent::Finished`].
//!
//! Runs cannot be cancelled once started. Nothing here prevents two runs
//! from being started at once.

mod events;
mod paginate;
mod run;

pub use events::{EventSink, LogLine, RunOutcome, RunSummary, Severity, WorkerEvent};
pub use paginate::collect_photos;
pub use run::{run_album_download, RunOptions, RunRequest};

use anyhow::{Context, Result};
use std::sync::mpsc::Receiver;
use std::thread::JoinHandle;

use crate::api::{AlbumApi, VkClient};
use crate::config::VkadConfig;
use crate::fetch::{CurlFetcher, PhotoFetcher};

/// A run in progress.
pub struct RunHandle {
    pub events: Receiver<WorkerEvent>,
    join: JoinHandle<RunSummary>,
}

impl RunHandle {
    /// Passes every event to `on_event` until the run finishes, then joins the thread.
    pub fn wait(self, mut on_event: impl FnMut(&WorkerEvent)) -> Result<RunSummary> {
        for event in self.events.iter() {
            on_event(&event);
            if matches!(event, WorkerEvent::Finished(_)) {
                break;
            }
        }
        self.join()
    }

    pub fn join(self) -> Result<RunSummary> {
        self.join
            .join()
            .map_err(|e| anyhow::anyhow!("worker thread panicked: {:?}", e))
    }
}

/// Starts a run against the real API with settings from `cfg`.
pub fn spawn_run(request: RunRequest, cfg: &VkadConfig) -> Result<RunHandle> {
    let api = VkClient::new(&request.token, cfg);
    let fetcher = CurlFetcher::new(cfg);
    spawn_run_with(request, api, fetcher, RunOptions::from(cfg))
}

/// Starts a run with any API and fetcher implementation.
pub fn spawn_run_with<A, F>(
    request: RunRequest,
    api: A,
    fetcher: F,
    opts: RunOptions,
) -> Result<RunHandle>
where
    A: AlbumApi + Send + 'static,
    F: PhotoFetcher + Send + 'static,
{
    let (sink, events) = EventSink::channel();
    tracing::debug!(?request, "starting run");
    let join = std::thread::Builder::new()
        .name("vkad-run".to_string())
        .spawn(move || run_album_download(&request, &api, &fetcher, &opts, &sink))
        .context("failed to spawn worker thread")?;
    Ok(RunHandle { events, join })
}
