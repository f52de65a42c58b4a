//! Sync progress reporting.
//!
//! `connectors sync` reports which connector is being read and how many
//! documents have reached the index so far. Everything goes to **stderr**;
//! stdout carries only the final summary.

use serde::Serialize;
use std::fmt;
use std::io::Write;

/// Progress of one sync run. Counts are cumulative for the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SyncProgressEvent {
    /// Extraction has started; nothing indexed yet.
    Discovering { connector: String },
    /// A batch was accepted by the index.
    Indexing {
        connector: String,
        documents: u64,
        batches: u64,
    },
}

impl SyncProgressEvent {
    pub fn connector(&self) -> &str {
        match self {
            Self::Discovering { connector } | Self::Indexing { connector, .. } => connector,
        }
    }
}

/// Renders as `sync docs  indexed  1,234 documents (13 batches)`.
impl fmt::Display for SyncProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovering { connector } => write!(f, "sync {}  discovering...", connector),
            Self::Indexing {
                connector,
                documents,
                batches,
            } => write!(
                f,
                "sync {}  indexed  {} documents ({} batches)",
                connector,
                group_thousands(*documents),
                group_thousands(*batches)
            ),
        }
    }
}

/// Receives progress events from the sync runner.
pub trait SyncProgressReporter: Send + Sync {
    fn report(&self, event: SyncProgressEvent);
}

/// One human-readable line per event.
pub struct StderrProgress;

impl SyncProgressReporter for StderrProgress {
    fn report(&self, event: SyncProgressEvent) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", event);
    }
}

#[derive(Serialize)]
struct ProgressLine<'a> {
    event: &'static str,
    #[serde(flatten)]
    progress: &'a SyncProgressEvent,
}

/// One JSON object per line, e.g.
/// `{"event":"progress","phase":"indexing","connector":"docs","documents":200,"batches":2}`.
pub struct JsonProgress;

impl SyncProgressReporter for JsonProgress {
    fn report(&self, event: SyncProgressEvent) {
        let line = ProgressLine {
            event: "progress",
            progress: &event,
        };
        if let Ok(json) = serde_json::to_string(&line) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", json);
        }
    }
}

pub struct NoProgress;

impl SyncProgressReporter for NoProgress {
    fn report(&self, _event: SyncProgressEvent) {}
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `--progress` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// `Human` when stderr is a terminal, `Off` when it is piped.
    pub fn detect() -> Self {
        if atty::is(atty::Stream::Stderr) {
            Self::Human
        } else {
            Self::Off
        }
    }

    pub fn reporter(self) -> Box<dyn SyncProgressReporter> {
        match self {
            Self::Off => Box::new(NoProgress),
            Self::Human => Box::new(StderrProgress),
            Self::Json => Box::new(JsonProgress),
        }
    }
}
