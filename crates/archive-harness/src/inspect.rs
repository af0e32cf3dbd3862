// crates/archive-harness/src/inspect.rs
// ============================================================================
// Module: Output Inspection
// Description: Reads archive entries the archiver left in an output directory.
// Purpose: Recover submitted URLs and compare them with what was archived.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The archiver writes one directory per link under `<output_dir>/archive/`,
//! each holding an `index.json` with at least a `url` string. Inspection is
//! strictly read-only. Any child of `archive/` that is not a directory with a
//! parseable `index.json` is reported as malformed rather than skipped.
//!
//! The merge/overwrite policy the archiver applies on re-submission is not
//! asserted here; checks stop at entry counts and URL set equality.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::HarnessError;
use crate::output::INDEX_FILE_NAME;
use crate::output::OutputDir;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One archived link as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Directory name under `archive/`.
    pub name: String,
    /// Full directory path.
    pub dir: PathBuf,
    /// URL recorded in the entry's `index.json`.
    pub url: String,
}

/// Fields of `index.json` the harness relies on; the rest are ignored.
#[derive(Debug, Deserialize)]
struct IndexDocument {
    /// Archived URL.
    url: String,
}

// ============================================================================
// SECTION: Listing
// ============================================================================

/// Lists every entry under `<output_dir>/archive/`, sorted by directory name.
///
/// # Errors
///
/// Returns [`HarnessError::MissingArchiveDir`] when `archive/` is absent and
/// [`HarnessError::MalformedEntry`] for an entry that is not a directory or
/// whose `index.json` is missing, unparseable, or lacks a string `url`.
pub fn list_entries(output_dir: &OutputDir) -> Result<Vec<ArchiveEntry>, HarnessError> {
    let archive_dir = output_dir.archive_dir();
    let reader = match fs::read_dir(&archive_dir) {
        Ok(reader) => reader,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(HarnessError::MissingArchiveDir(archive_dir));
        }
        Err(err) => return Err(HarnessError::io(archive_dir, err)),
    };

    let mut dirs = Vec::new();
    for item in reader {
        let item = item.map_err(|err| HarnessError::io(&archive_dir, err))?;
        dirs.push(item.path());
    }
    dirs.sort();

    dirs.into_iter().map(read_entry).collect()
}

/// Reads one entry directory.
fn read_entry(dir: PathBuf) -> Result<ArchiveEntry, HarnessError> {
    if !dir.is_dir() {
        return Err(malformed(dir, "not a directory"));
    }
    let index_path = dir.join(INDEX_FILE_NAME);
    let bytes = match fs::read(&index_path) {
        Ok(bytes) => bytes,
        Err(err) => return Err(malformed(dir, format!("cannot read {INDEX_FILE_NAME}: {err}"))),
    };
    let index: IndexDocument = match serde_json::from_slice(&bytes) {
        Ok(index) => index,
        Err(err) => return Err(malformed(dir, format!("invalid {INDEX_FILE_NAME}: {err}"))),
    };
    let name = dir.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    Ok(ArchiveEntry {
        name,
        dir,
        url: index.url,
    })
}

/// Builds a malformed-entry error.
fn malformed(entry: PathBuf, reason: impl Into<String>) -> HarnessError {
    HarnessError::MalformedEntry {
        entry,
        reason: reason.into(),
    }
}

/// Returns the set of URLs recorded across all archive entries.
///
/// # Errors
///
/// Propagates any [`list_entries`] error.
pub fn archived_urls(output_dir: &OutputDir) -> Result<BTreeSet<String>, HarnessError> {
    Ok(list_entries(output_dir)?.into_iter().map(|entry| entry.url).collect())
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Checks that every entry's URL belongs to the submitted set.
///
/// # Errors
///
/// Returns [`HarnessError::Mismatch`] listing the foreign entries.
pub fn verify_discoverability<S: AsRef<str>>(
    entries: &[ArchiveEntry],
    submitted: &[S],
) -> Result<(), HarnessError> {
    let submitted: BTreeSet<&str> = submitted.iter().map(AsRef::as_ref).collect();
    let foreign: Vec<String> = entries
        .iter()
        .filter(|entry| !submitted.contains(entry.url.as_str()))
        .map(|entry| format!("{} -> {}", entry.name, entry.url))
        .collect();
    if foreign.is_empty() {
        return Ok(());
    }
    Err(HarnessError::Mismatch(format!(
        "{} entries were never submitted: {}",
        foreign.len(),
        foreign.join(", ")
    )))
}

/// Checks one entry per unique submitted URL and equal URL sets.
///
/// # Errors
///
/// Returns [`HarnessError::Mismatch`] describing the count or set difference.
pub fn verify_exact<S: AsRef<str>>(
    entries: &[ArchiveEntry],
    submitted: &[S],
) -> Result<(), HarnessError> {
    let expected: BTreeSet<&str> = submitted.iter().map(AsRef::as_ref).collect();
    if entries.len() != expected.len() {
        return Err(HarnessError::Mismatch(format!(
            "expected {} entries, found {}",
            expected.len(),
            entries.len()
        )));
    }
    let archived: BTreeSet<&str> = entries.iter().map(|entry| entry.url.as_str()).collect();
    let missing: Vec<&str> = expected.difference(&archived).copied().collect();
    let unexpected: Vec<&str> = archived.difference(&expected).copied().collect();
    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }
    Err(HarnessError::Mismatch(format!(
        "missing [{}], unexpected [{}]",
        missing.join(", "),
        unexpected.join(", ")
    )))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
