// system-tests/tests/suites/favicon.rs
// ============================================================================
// Module: Favicon Regression Tests
// Description: Archiving a live site with favicon fetching disabled.
// Purpose: Guard against crashes when no favicon is fetched.
// Dependencies: system-tests helpers, archive-harness
// ============================================================================

//! ## Overview
//! Needs outbound network access, so it only runs when
//! `ARCHIVER_SYSTEM_TEST_ALLOW_NETWORK` is enabled. A clean exit is the whole
//! assertion.

use std::time::Duration;

use archive_harness::ArchiverEnv;
use archive_harness::ArchiverFlag;
use archive_harness::HarnessEnv;
use archive_harness::OutputDir;
use helpers::archiver::archiver_under_test;
use helpers::artifacts::TestReporter;
use tempfile::TempDir;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn disabled_favicon_fetch_does_not_crash() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("disabled_favicon_fetch_does_not_crash")?;
    if !reporter.config().allow_network {
        reporter.skip(&format!("set {} to run", HarnessEnv::AllowNetwork.as_str()))?;
        return Ok(());
    }
    let archiver = archiver_under_test(&mut reporter, Duration::from_secs(300))?;
    let temp = TempDir::new()?;
    let output = OutputDir::new(temp.path());

    let env = ArchiverEnv::new().with_flag(ArchiverFlag::FetchFavicon, false);
    archiver.runner.run(&output, &["https://google.com"], &env).await?;

    reporter.pass("archiver exited cleanly with favicon fetch disabled")?;
    Ok(())
}
