//! Append-only JSONL discussion transcript.
//!
//! Every record is one line:
//! `{"session_id": .., "timestamp": .., "type": .., ...event fields}`.
//! Reopening an existing file appends, so repeated runs against the same
//! transcript path accumulate sessions.

use chrono::{SecondsFormat, Utc};
use panel_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

#[derive(Serialize)]
struct TranscriptRecord<'a> {
    session_id: &'a str,
    timestamp: String,
    #[serde(flatten)]
    event: &'a ConversationEvent,
}

/// Transcript sink writing one JSON object per line
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    write_failed: AtomicBool,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its parent directories.
    ///
    /// Returns `None` (after a warning) if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                path: path.to_path_buf(),
                write_failed: AtomicBool::new(false),
            }),
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Transcript file `discussion-<UTC timestamp>.jsonl` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        Self::new(dir.as_ref().join(format!("discussion-{}.jsonl", stamp)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(path: &Path) -> io::Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", line)?;
        // Flushed per record so an abort keeps the turns so far
        writer.flush()
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, session_id: &str, event: &ConversationEvent) {
        let record = TranscriptRecord {
            session_id,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
        };
        let result = serde_json::to_string(&record)
            .map_err(io::Error::from)
            .and_then(|line| self.write_line(&line));

        if let Err(e) = result
            && !self.write_failed.swap(true, Ordering::Relaxed)
        {
            warn!(
                "Transcript {} is incomplete: write failed: {}",
                self.path.display(),
                e
            );
        }
    }
}
