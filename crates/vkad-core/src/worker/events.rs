//! Events a run emits: free-text log lines and one final finished notice.

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
    Success,
}

impl Severity {
    fn marker(self) -> &'static str {
        match self {
            Severity::Info => "[INFO]",
            Severity::Warn => "[WARN]",
            Severity::Error => "[ERROR]",
            Severity::Success => "[OK]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.marker(), self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Reached the end of the download loop (individual photos may have failed).
    Completed,
    /// Stopped early on a run-level failure.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub photos_found: usize,
    pub downloaded: usize,
    pub failed: usize,
    pub folder: Option<PathBuf>,
}

impl RunSummary {
    pub(super) fn aborted() -> Self {
        Self {
            outcome: RunOutcome::Aborted,
            photos_found: 0,
            downloaded: 0,
            failed: 0,
            folder: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    Log(LogLine),
    Finished(RunSummary),
}

/// Sending half of a run's event channel. Every line is mirrored to `tracing`.
///
/// Send errors are ignored: a consumer that went away must not stop the run.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<WorkerEvent>,
}

impl EventSink {
    pub fn new(tx: mpsc::Sender<WorkerEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::Receiver<WorkerEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }

    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        let line = LogLine {
            severity,
            message: message.into(),
        };
        match severity {
            Severity::Info | Severity::Success => tracing::info!("{}", line.message),
            Severity::Warn => tracing::warn!("{}", line.message),
            Severity::Error => tracing::error!("{}", line.message),
        }
        let _ = self.tx.send(WorkerEvent::Log(line));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.log(Severity::Success, message);
    }

    pub fn finished(&self, summary: RunSummary) {
        tracing::debug!(?summary, "run finished");
        let _ = self.tx.send(WorkerEvent::Finished(summary));
    }
}
