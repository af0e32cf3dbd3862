// crates/archive-harness/src/telemetry.rs
// ============================================================================
// Module: Harness Telemetry
// Description: Structured JSON-line events for archiver invocations.
// Purpose: Record what the harness ran, for how long, and how it ended.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each archiver invocation emits a `run_started` event followed by either
//! `run_finished` or `run_failed`. Events are serialized as single-line JSON
//! through an [`EventSink`]; sinks swallow their own write failures so logging
//! never changes a test outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Lifecycle stage of an archiver invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HarnessEventKind {
    /// The subprocess is about to be spawned.
    RunStarted,
    /// The subprocess exited with status 0.
    RunFinished,
    /// Spawn failure, timeout, or non-zero exit.
    RunFailed,
}

/// One structured log record.
///
/// # Invariants
/// - Optional fields are `None` when the stage has no such data yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarnessEvent {
    /// Lifecycle stage.
    pub event: HarnessEventKind,
    /// Wall-clock time in unix milliseconds.
    pub timestamp_ms: u128,
    /// Archiver program path.
    pub program: String,
    /// Output directory of the invocation.
    pub output_dir: String,
    /// Number of submitted links.
    pub link_count: usize,
    /// Elapsed time, set once the subprocess has ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u128>,
    /// Exit code, when the process exited normally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Failure description for `run_failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HarnessEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(event: HarnessEventKind, program: &Path, output_dir: &Path, link_count: usize) -> Self {
        Self {
            event,
            timestamp_ms: now_millis(),
            program: program.display().to_string(),
            output_dir: output_dir.display().to_string(),
            link_count,
            elapsed_ms: None,
            exit_code: None,
            message: None,
        }
    }
}

/// Returns the current unix time in milliseconds.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for harness events.
pub trait EventSink: Send + Sync {
    /// Records an event.
    fn record(&self, event: &HarnessEvent);
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl EventSink for FileEventSink {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink that discards events.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record(&self, _event: &HarnessEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
