// system-tests/tests/suites/scale.rs
// ============================================================================
// Module: Scale Tests
// Description: Large batches of deliberately unreachable links.
// Purpose: Validate per-link fetch failures never abort the batch.
// Dependencies: system-tests helpers, archive-harness
// ============================================================================

//! ## Overview
//! Every URL points at a closed localhost port. The archiver must still
//! produce one entry per link with all capture stages disabled.

use std::time::Duration;

use archive_harness::ArchiverEnv;
use archive_harness::OutputDir;
use archive_harness::list_entries;
use archive_harness::verify_exact;
use helpers::archiver::archiver_under_test;
use helpers::artifacts::TestReporter;
use helpers::links::unreachable_links;
use tempfile::TempDir;

use crate::helpers;

const LINK_COUNT: usize = 3000;

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_links_are_all_archived() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("unreachable_links_are_all_archived")?;
    let archiver = archiver_under_test(&mut reporter, Duration::from_secs(1800))?;
    let temp = TempDir::new()?;
    let output = OutputDir::new(temp.path());

    let links = unreachable_links(LINK_COUNT);
    let report = archiver.runner.run(&output, &links, &ArchiverEnv::fetch_only()).await?;

    let entries = list_entries(&output)?;
    if entries.len() != LINK_COUNT {
        return Err(format!("expected {LINK_COUNT} entries, found {}", entries.len()).into());
    }
    verify_exact(&entries, &links)?;

    reporter.record_counts(links.len(), entries.len());
    reporter.pass(&format!("archiver ran for {}ms", report.elapsed.as_millis()))?;
    Ok(())
}
