// crates/archive-harness/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Error type shared by every harness operation.
// Purpose: Surface archiver regressions as typed, non-retried failures.
// Dependencies: thiserror, serde_json
// ============================================================================

//! ## Overview
//! Every fallible harness operation returns [`HarnessError`]. Failures are
//! treated as defects to investigate, so no variant is ever retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building inputs, running the archiver, or inspecting output.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A submitted link was empty.
    #[error("link at index {index} is empty")]
    InvalidLink {
        /// Position of the offending link in the submitted sequence.
        index: usize,
    },
    /// Filesystem failure on a harness-owned path.
    #[error("io error at {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// JSON serialization failure while writing the input document.
    #[error("json error at {}: {source}", .path.display())]
    Json {
        /// Path of the JSON document.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The archiver process could not be started.
    #[error("failed to spawn archiver {}: {source}", .program.display())]
    Spawn {
        /// Program that failed to launch.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The archiver did not exit before the configured timeout.
    #[error("archiver timed out after {}ms", .timeout.as_millis())]
    Timeout {
        /// Timeout that elapsed.
        timeout: Duration,
    },
    /// The archiver exited unsuccessfully.
    #[error("archiver failed ({status}): {stderr}")]
    NonZeroExit {
        /// Rendered exit status.
        status: String,
        /// Exit code when the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
    /// The output directory has no `archive/` folder.
    #[error("archive directory missing: {}", .0.display())]
    MissingArchiveDir(PathBuf),
    /// An archive entry is not a directory or its `index.json` is unusable.
    #[error("malformed archive entry {}: {reason}", .entry.display())]
    MalformedEntry {
        /// Entry path under `archive/`.
        entry: PathBuf,
        /// Description of the defect.
        reason: String,
    },
    /// Archived entries disagree with the submitted link set.
    #[error("archive mismatch: {0}")]
    Mismatch(String),
}

impl HarnessError {
    /// Wraps an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
