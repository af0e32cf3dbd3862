// system-tests/tests/helpers/archiver.rs
// ============================================================================
// Module: Archiver Under Test
// Description: Resolves the archiver binary and builds configured runners.
// Purpose: Run suites against a real archiver or the bundled stub.
// Dependencies: archive-harness
// ============================================================================

//! Resolution order: `ARCHIVER_SYSTEM_TEST_BIN` when set, otherwise the
//! `archive_stub` binary built alongside these tests.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use archive_harness::ArchiverCommand;
use archive_harness::FileEventSink;
use archive_harness::HarnessRunner;
use serde::Serialize;

use super::artifacts::TestReporter;
use super::timeouts::resolve_timeout;

/// Which archiver a suite is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiverKind {
    /// The bundled offline stub.
    Stub,
    /// A binary supplied through configuration.
    External,
}

/// Runner plus the kind of archiver it drives.
pub struct ArchiverUnderTest {
    /// Configured runner; events land in the test's `events.jsonl`.
    pub runner: HarnessRunner,
    /// Stub or external.
    pub kind: ArchiverKind,
}

impl ArchiverUnderTest {
    /// True when stub-only controls (forced exits, sleeps) are available.
    pub fn is_stub(&self) -> bool {
        self.kind == ArchiverKind::Stub
    }
}

/// Returns the bundled stub archiver path.
pub fn stub_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_archive_stub"))
}

/// Builds the runner for a test, logging events into its run root and
/// recording the resolved archiver in its summary.
pub fn archiver_under_test(
    reporter: &mut TestReporter,
    requested_timeout: Duration,
) -> Result<ArchiverUnderTest, String> {
    let config = reporter.config();
    let (program, kind) = config
        .archiver_bin
        .clone()
        .map_or_else(|| (stub_binary(), ArchiverKind::Stub), |bin| (bin, ArchiverKind::External));
    let timeout = resolve_timeout(requested_timeout, config);
    let sink = FileEventSink::new(&reporter.events_path())
        .map_err(|err| format!("open event log failed: {err}"))?;
    reporter.record_archiver(kind, &program);
    let runner = HarnessRunner::new(ArchiverCommand::new(program))
        .with_timeout(timeout)
        .with_sink(Arc::new(sink));
    Ok(ArchiverUnderTest {
        runner,
        kind,
    })
}
