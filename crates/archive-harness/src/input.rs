// crates/archive-harness/src/input.rs
// ============================================================================
// Module: Input Builder
// Description: Builds the JSON link document handed to the archiver.
// Purpose: Turn a list of URLs into `<output_dir>/input.json`.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The archiver consumes a JSON array of `{ "href", "description" }` objects.
//! No richer metadata exists in the harness, so the description echoes the
//! href. URLs are not validated beyond being non-empty; malformed URLs are the
//! archiver's problem.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::HarnessError;
use crate::output::OutputDir;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One submitted link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Link URL.
    pub href: String,
    /// Human-readable description; mirrors `href`.
    pub description: String,
}

impl LinkRecord {
    /// Creates a record whose description echoes the URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        let href = url.into();
        Self {
            description: href.clone(),
            href,
        }
    }
}

/// Ordered sequence of link records, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputDocument {
    /// Records in submission order.
    pub links: Vec<LinkRecord>,
}

impl InputDocument {
    /// Builds a document from URLs, rejecting empty entries.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidLink`] for the first empty URL.
    pub fn from_urls<S: AsRef<str>>(urls: &[S]) -> Result<Self, HarnessError> {
        let links = urls
            .iter()
            .enumerate()
            .map(|(index, url)| {
                let url = url.as_ref();
                if url.is_empty() {
                    return Err(HarnessError::InvalidLink {
                        index,
                    });
                }
                Ok(LinkRecord::from_url(url))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            links,
        })
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true when the document holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Writes `urls` as the input document of `output_dir` and returns its path.
///
/// The output directory is created when missing. An existing `input.json` is
/// overwritten, which lets one directory be reused across invocations.
///
/// # Errors
///
/// Returns an error when a URL is empty or the document cannot be written.
pub fn build_input<S: AsRef<str>>(
    output_dir: &OutputDir,
    urls: &[S],
) -> Result<PathBuf, HarnessError> {
    let document = InputDocument::from_urls(urls)?;
    fs::create_dir_all(output_dir.path())
        .map_err(|err| HarnessError::io(output_dir.path(), err))?;
    let path = output_dir.input_path();
    let bytes = serde_json::to_vec(&document).map_err(|source| HarnessError::Json {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, bytes).map_err(|err| HarnessError::io(&path, err))?;
    Ok(path)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
