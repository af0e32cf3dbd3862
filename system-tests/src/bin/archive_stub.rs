// system-tests/src/bin/archive_stub.rs
// ============================================================================
// Module: Archive Stub
// Description: Offline stand-in for the archiver binary under test.
// Purpose: Let system-tests run hermetically when no real archiver is set.
// Dependencies: serde, serde_json, sha2
// ============================================================================

//! ## Overview
//! Implements the archiver's outside contract without touching the network:
//! `archive_stub <input.json>` with `OUTPUT_DIR` set writes one
//! `archive/<id>/index.json` per unique link, where `<id>` is derived from the
//! URL so re-submissions land on the same entry. Every link is recorded as
//! unreachable, matching what the real archiver does for dead localhost URLs.
//!
//! Test controls:
//! - `ARCHIVE_STUB_SLEEP_MS` delays startup, to exercise harness timeouts.
//! - `ARCHIVE_STUB_EXIT_CODE` exits with that code before archiving anything.
//!
//! The environment the stub observed is written to `stub_env.json` so tests
//! can assert what the harness actually passed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Startup delay control.
const SLEEP_ENV: &str = "ARCHIVE_STUB_SLEEP_MS";
/// Forced exit code control.
const EXIT_ENV: &str = "ARCHIVE_STUB_EXIT_CODE";
/// Output directory variable.
const OUTPUT_DIR_ENV: &str = "OUTPUT_DIR";
/// Variables echoed into `stub_env.json`.
const OBSERVED_ENV: [&str; 7] = [
    "SUBMIT_ARCHIVE_DOT_ORG",
    "OUTPUT_DIR",
    "FETCH_FAVICON",
    "FETCH_SCREENSHOT",
    "FETCH_PDF",
    "FETCH_DOM",
    "CHECK_SSL_VALIDITY",
];
/// Capture stages and the variable gating each one.
const STAGES: [(&str, &str); 5] = [
    ("favicon", "FETCH_FAVICON"),
    ("screenshot", "FETCH_SCREENSHOT"),
    ("pdf", "FETCH_PDF"),
    ("dom", "FETCH_DOM"),
    ("ssl", "CHECK_SSL_VALIDITY"),
];

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Input record; extra fields are ignored.
#[derive(Debug, Deserialize)]
struct InputLink {
    /// Link URL.
    href: String,
    /// Link description.
    #[serde(default)]
    description: Option<String>,
}

/// Per-entry descriptor.
#[derive(Debug, Serialize, Deserialize)]
struct IndexDocument {
    /// Archived URL.
    url: String,
    /// Description from the most recent submission.
    description: Option<String>,
    /// First time this URL was archived, unix milliseconds.
    first_archived_ms: u128,
    /// Number of runs that submitted this URL.
    submissions: u64,
    /// Fetch outcome.
    status: String,
    /// Capture stage outcomes keyed by stage name.
    stages: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let _ = writeln!(io::stderr(), "archive_stub: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one archiving pass.
fn run() -> Result<ExitCode, String> {
    let mut args = env::args_os().skip(1);
    let input = args.next().map(PathBuf::from).ok_or("usage: archive_stub <input.json>")?;
    if args.next().is_some() {
        return Err("expected exactly one argument".to_string());
    }
    let output_dir = env::var_os(OUTPUT_DIR_ENV)
        .map(PathBuf::from)
        .ok_or_else(|| format!("{OUTPUT_DIR_ENV} must be set"))?;

    if let Some(millis) = read_u64(SLEEP_ENV)? {
        thread::sleep(Duration::from_millis(millis));
    }
    if let Some(code) = read_u64(EXIT_ENV)? {
        let code = u8::try_from(code).map_err(|_| format!("{EXIT_ENV} must fit in u8"))?;
        let _ = writeln!(io::stderr(), "archive_stub: forced exit {code}");
        return Ok(ExitCode::from(code));
    }

    let bytes = fs::read(&input).map_err(|err| format!("read {}: {err}", input.display()))?;
    let links: Vec<InputLink> =
        serde_json::from_slice(&bytes).map_err(|err| format!("parse {}: {err}", input.display()))?;

    fs::create_dir_all(&output_dir)
        .map_err(|err| format!("create {}: {err}", output_dir.display()))?;
    record_env(&output_dir)?;

    let archive_dir = output_dir.join("archive");
    fs::create_dir_all(&archive_dir)
        .map_err(|err| format!("create {}: {err}", archive_dir.display()))?;

    let stages = stage_outcomes();
    let mut seen = BTreeSet::new();
    for link in links {
        if link.href.is_empty() || !seen.insert(link.href.clone()) {
            continue;
        }
        archive_link(&archive_dir, link, &stages)?;
    }

    let _ = writeln!(
        io::stdout(),
        "archive_stub: archived {} links into {}",
        seen.len(),
        archive_dir.display()
    );
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes or merges the entry for one link.
fn archive_link(
    archive_dir: &Path,
    link: InputLink,
    stages: &BTreeMap<String, String>,
) -> Result<(), String> {
    let entry_dir = archive_dir.join(entry_id(&link.href));
    fs::create_dir_all(&entry_dir)
        .map_err(|err| format!("create {}: {err}", entry_dir.display()))?;
    let index_path = entry_dir.join("index.json");

    let previous = fs::read(&index_path)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<IndexDocument>(&bytes).ok())
        .filter(|index| index.url == link.href);
    let (first_archived_ms, submissions) = previous
        .map_or((now_millis(), 0), |index| (index.first_archived_ms, index.submissions));

    let index = IndexDocument {
        url: link.href,
        description: link.description,
        first_archived_ms,
        submissions: submissions + 1,
        status: "unreachable".to_string(),
        stages: stages.clone(),
    };
    let bytes = serde_json::to_vec_pretty(&index)
        .map_err(|err| format!("serialize {}: {err}", index_path.display()))?;
    fs::write(&index_path, bytes).map_err(|err| format!("write {}: {err}", index_path.display()))
}

/// Derives a stable directory name from a URL.
fn entry_id(url: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
    digest[.. 16].to_string()
}

/// Reports each capture stage as disabled or failed.
fn stage_outcomes() -> BTreeMap<String, String> {
    STAGES
        .iter()
        .map(|(stage, var)| {
            let disabled =
                env::var(var).is_ok_and(|value| value.trim().eq_ignore_ascii_case("false"));
            let outcome = if disabled { "disabled" } else { "failed" };
            ((*stage).to_string(), outcome.to_string())
        })
        .collect()
}

/// Writes the archiver-relevant environment to `stub_env.json`.
fn record_env(output_dir: &Path) -> Result<(), String> {
    let observed: BTreeMap<&str, Option<String>> =
        OBSERVED_ENV.iter().map(|name| (*name, env::var(name).ok())).collect();
    let path = output_dir.join("stub_env.json");
    let bytes = serde_json::to_vec_pretty(&observed)
        .map_err(|err| format!("serialize {}: {err}", path.display()))?;
    fs::write(&path, bytes).map_err(|err| format!("write {}: {err}", path.display()))
}

/// Reads an optional unsigned integer control variable.
fn read_u64(name: &str) -> Result<Option<u64>, String> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| format!("{name} must be an integer")),
        Err(_) => Ok(None),
    }
}

/// Returns the current unix time in milliseconds.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}
