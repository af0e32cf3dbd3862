// crates/archive-harness/src/lib.rs
// ============================================================================
// Module: Archiver Harness Library
// Description: Black-box test harness for an external link-archiver binary.
// Purpose: Build input documents, invoke the archiver, and inspect its output.
// Dependencies: serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! `archive-harness` drives an external archiver executable from the outside.
//! It writes a JSON list of links into an output directory, runs the archiver
//! against it with a hermetic environment, and reads back the per-link
//! `archive/<entry>/index.json` descriptors the archiver produced.
//!
//! The harness never archives anything itself. Every capture stage (favicon,
//! screenshot, PDF, DOM, SSL checks) belongs to the binary under test.
//!
//! Invariants:
//! - The output directory is always an explicit [`OutputDir`] argument.
//! - `SUBMIT_ARCHIVE_DOT_ORG` is forced to `False` on every invocation.
//! - Every invocation is bounded by a timeout; nothing is retried.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod flags;
pub mod input;
pub mod inspect;
pub mod output;
pub mod runner;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::HarnessConfig;
pub use config::HarnessEnv;
pub use error::HarnessError;
pub use flags::ArchiverEnv;
pub use flags::ArchiverFlag;
pub use input::InputDocument;
pub use input::LinkRecord;
pub use input::build_input;
pub use inspect::ArchiveEntry;
pub use inspect::archived_urls;
pub use inspect::list_entries;
pub use inspect::verify_discoverability;
pub use inspect::verify_exact;
pub use output::OutputDir;
pub use runner::ArchiverCommand;
pub use runner::DEFAULT_RUN_TIMEOUT;
pub use runner::HarnessRunner;
pub use runner::RunReport;
pub use telemetry::EventSink;
pub use telemetry::FileEventSink;
pub use telemetry::HarnessEvent;
pub use telemetry::HarnessEventKind;
pub use telemetry::NoopEventSink;
