// crates/archive-harness/src/flags.rs
// ============================================================================
// Module: Archiver Environment Flags
// Description: Typed names for the environment variables the archiver reads.
// Purpose: Build hermetic per-invocation environments for the archiver.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The archiver is configured purely through environment variables holding
//! `True`/`False` strings. [`ArchiverEnv`] collects caller overrides; the
//! runner then pins the hermetic values on top so callers cannot re-enable
//! web-archive submission or redirect the output directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::ffi::OsString;

use crate::output::OutputDir;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable carrying the output directory.
pub const OUTPUT_DIR_ENV: &str = "OUTPUT_DIR";

/// Capture stages that are expensive or network-bound, in a stable order.
pub const CAPTURE_STAGES: [ArchiverFlag; 5] = [
    ArchiverFlag::FetchFavicon,
    ArchiverFlag::FetchScreenshot,
    ArchiverFlag::FetchPdf,
    ArchiverFlag::FetchDom,
    ArchiverFlag::CheckSslValidity,
];

// ============================================================================
// SECTION: Flags
// ============================================================================

/// Boolean toggles understood by the archiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchiverFlag {
    /// Submit archived links to the public web archive. Always off in tests.
    SubmitArchiveDotOrg,
    /// Fetch the site favicon.
    FetchFavicon,
    /// Capture a screenshot.
    FetchScreenshot,
    /// Render a PDF snapshot.
    FetchPdf,
    /// Dump the rendered DOM.
    FetchDom,
    /// Validate TLS certificates when fetching.
    CheckSslValidity,
}

impl ArchiverFlag {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmitArchiveDotOrg => "SUBMIT_ARCHIVE_DOT_ORG",
            Self::FetchFavicon => "FETCH_FAVICON",
            Self::FetchScreenshot => "FETCH_SCREENSHOT",
            Self::FetchPdf => "FETCH_PDF",
            Self::FetchDom => "FETCH_DOM",
            Self::CheckSslValidity => "CHECK_SSL_VALIDITY",
        }
    }
}

/// Renders a boolean the way the archiver parses it.
#[must_use]
pub const fn render_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

// ============================================================================
// SECTION: Environment Builder
// ============================================================================

/// Caller-supplied environment overrides for one archiver invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiverEnv {
    /// Override values keyed by variable name.
    vars: BTreeMap<String, String>,
}

impl ArchiverEnv {
    /// Creates an empty override set; the archiver uses its own defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables every capture stage so only the plain page fetch runs.
    #[must_use]
    pub fn fetch_only() -> Self {
        CAPTURE_STAGES.into_iter().fold(Self::new(), |env, flag| env.with_flag(flag, false))
    }

    /// Sets a boolean toggle.
    #[must_use]
    pub fn with_flag(self, flag: ArchiverFlag, enabled: bool) -> Self {
        self.with_var(flag.as_str(), render_bool(enabled))
    }

    /// Sets an arbitrary variable, for archiver knobs without a typed flag.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Returns the override for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Returns the final variables for an invocation writing into `output_dir`.
    ///
    /// Web-archive submission is forced off and `OUTPUT_DIR` is pinned,
    /// whatever the caller supplied. The output path is passed through as raw
    /// OS bytes so non-UTF-8 directories reach the archiver unchanged.
    #[must_use]
    pub fn resolved(&self, output_dir: &OutputDir) -> BTreeMap<String, OsString> {
        let mut vars: BTreeMap<String, OsString> =
            self.vars.iter().map(|(key, value)| (key.clone(), OsString::from(value))).collect();
        vars.insert(
            ArchiverFlag::SubmitArchiveDotOrg.as_str().to_string(),
            OsString::from(render_bool(false)),
        );
        vars.insert(OUTPUT_DIR_ENV.to_string(), output_dir.path().as_os_str().to_os_string());
        vars
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
