// crates/archive-harness/src/runner.rs
// ============================================================================
// Module: Harness Runner
// Description: Single-shot invocation of the external archiver binary.
// Purpose: Write the input document, run the archiver, and fail on bad exits.
// Dependencies: tokio, archive-harness::{input, flags, telemetry}
// ============================================================================

//! ## Overview
//! [`HarnessRunner::run`] is one call/inspect cycle: it writes
//! `<output_dir>/input.json`, spawns `<archiver> <input.json>` with the
//! resolved hermetic environment, and waits for the process under a timeout.
//! A non-zero exit, a spawn failure, or an elapsed timeout is returned as an
//! error; the child is killed when the timeout fires. Nothing is retried.
//!
//! Invariants:
//! - `SUBMIT_ARCHIVE_DOT_ORG=False` and `OUTPUT_DIR` are set on every call.
//! - Once the input document is written, a call emits `run_started` and
//!   exactly one terminal event. Failures while building the input emit nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::process::Output;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::HarnessError;
use crate::flags::ArchiverEnv;
use crate::input::build_input;
use crate::output::OutputDir;
use crate::telemetry::EventSink;
use crate::telemetry::HarnessEvent;
use crate::telemetry::HarnessEventKind;
use crate::telemetry::NoopEventSink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bound on a single archiver invocation.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(600);

// ============================================================================
// SECTION: Command
// ============================================================================

/// Program used to launch the archiver.
///
/// Leading arguments go before the input path, which is always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiverCommand {
    /// Executable path.
    program: PathBuf,
    /// Arguments placed before the input path.
    leading_args: Vec<OsString>,
}

impl ArchiverCommand {
    /// Runs `program <input.json>`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Adds arguments ahead of the input path, e.g. for interpreter-launched archivers.
    #[must_use]
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Returns the executable path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Outcome of a successful archiver invocation.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Input document handed to the archiver.
    pub input_path: PathBuf,
    /// Exit status (always success).
    pub status: ExitStatus,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Wall-clock duration of the subprocess.
    pub elapsed: Duration,
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Invokes the archiver once per [`HarnessRunner::run`] call.
#[derive(Clone)]
pub struct HarnessRunner {
    /// Archiver launch command.
    command: ArchiverCommand,
    /// Bound on each invocation.
    timeout: Duration,
    /// Destination for lifecycle events.
    sink: Arc<dyn EventSink>,
}

impl HarnessRunner {
    /// Creates a runner with the default timeout and no event logging.
    #[must_use]
    pub fn new(command: ArchiverCommand) -> Self {
        Self {
            command,
            timeout: DEFAULT_RUN_TIMEOUT,
            sink: Arc::new(NoopEventSink),
        }
    }

    /// Sets the per-invocation timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the per-invocation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the archiver launch command.
    #[must_use]
    pub const fn command(&self) -> &ArchiverCommand {
        &self.command
    }

    /// Archives `links` into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when the input cannot be written, the archiver cannot
    /// be spawned, the timeout elapses, or the archiver exits non-zero.
    pub async fn run<S: AsRef<str>>(
        &self,
        output_dir: &OutputDir,
        links: &[S],
        env: &ArchiverEnv,
    ) -> Result<RunReport, HarnessError> {
        let input_path = build_input(output_dir, links)?;
        self.sink.record(&self.event(HarnessEventKind::RunStarted, output_dir, links.len()));

        let started = Instant::now();
        let result = self.invoke(output_dir, &input_path, env).await;
        let elapsed = started.elapsed();

        let outcome = result.and_then(|output| {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            if output.status.success() {
                Ok(RunReport {
                    input_path,
                    status: output.status,
                    stdout,
                    stderr,
                    elapsed,
                })
            } else {
                Err(HarnessError::NonZeroExit {
                    status: output.status.to_string(),
                    code: output.status.code(),
                    stderr,
                })
            }
        });

        let mut event = match &outcome {
            Ok(report) => {
                let mut event = self.event(HarnessEventKind::RunFinished, output_dir, links.len());
                event.exit_code = report.status.code();
                event
            }
            Err(err) => {
                let mut event = self.event(HarnessEventKind::RunFailed, output_dir, links.len());
                if let HarnessError::NonZeroExit {
                    code, ..
                } = err
                {
                    event.exit_code = *code;
                }
                event.message = Some(err.to_string());
                event
            }
        };
        event.elapsed_ms = Some(elapsed.as_millis());
        self.sink.record(&event);
        outcome
    }

    /// Spawns the archiver and waits for it under the timeout.
    async fn invoke(
        &self,
        output_dir: &OutputDir,
        input_path: &Path,
        env: &ArchiverEnv,
    ) -> Result<Output, HarnessError> {
        let program = self.command.program();
        let mut command = Command::new(program);
        command.args(&self.command.leading_args);
        command.arg(input_path);
        command.envs(env.resolved(output_dir));
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);

        let child = command.spawn().map_err(|source| HarnessError::Spawn {
            program: program.to_path_buf(),
            source,
        })?;
        timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| HarnessError::Timeout {
                timeout: self.timeout,
            })?
            .map_err(|err| HarnessError::io(program, err))
    }

    /// Builds an event for this runner's program.
    fn event(&self, kind: HarnessEventKind, output_dir: &OutputDir, links: usize) -> HarnessEvent {
        HarnessEvent::new(kind, self.command.program(), output_dir.path(), links)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
