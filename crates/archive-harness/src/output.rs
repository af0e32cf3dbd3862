// crates/archive-harness/src/output.rs
// ============================================================================
// Module: Output Directory
// Description: Explicit handle for one archiver working set.
// Purpose: Thread the output directory through every harness operation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`OutputDir`] names the root the archiver writes into. The harness only
//! writes `input.json` there; everything under `archive/` belongs to the
//! archiver and is read-only from the harness side.

use std::path::Path;
use std::path::PathBuf;

/// File name of the input document inside the output directory.
pub const INPUT_FILE_NAME: &str = "input.json";
/// Folder holding one subdirectory per archived link.
pub const ARCHIVE_DIR_NAME: &str = "archive";
/// Per-entry descriptor file name.
pub const INDEX_FILE_NAME: &str = "index.json";

/// Root directory of one archiver working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    /// Absolute or caller-relative root path.
    root: PathBuf,
}

impl OutputDir {
    /// Wraps an output directory path. The directory need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Returns the root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns the fixed input document path.
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.root.join(INPUT_FILE_NAME)
    }

    /// Returns the `archive/` folder path.
    #[must_use]
    pub fn archive_dir(&self) -> PathBuf {
        self.root.join(ARCHIVE_DIR_NAME)
    }
}
