// system-tests/tests/suites/resubmission.rs
// ============================================================================
// Module: Resubmission Tests
// Description: Idempotency of archiving the same links into one directory.
// Purpose: Validate re-submission neither duplicates nor drops entries.
// Dependencies: system-tests helpers, archive-harness
// ============================================================================

//! ## Overview
//! Re-running the archiver over an existing output directory must leave one
//! entry per unique URL. Whether the second run merges into or overwrites the
//! first run's entries is deliberately not asserted.

use std::fs;
use std::time::Duration;

use archive_harness::ArchiverEnv;
use archive_harness::OutputDir;
use archive_harness::archived_urls;
use archive_harness::list_entries;
use archive_harness::verify_discoverability;
use archive_harness::verify_exact;
use helpers::archiver::archiver_under_test;
use helpers::artifacts::SUMMARY_FILE;
use helpers::artifacts::TestReporter;
use helpers::links::unreachable_links;
use tempfile::TempDir;

use crate::helpers;

const RUN_TIMEOUT: Duration = Duration::from_secs(300);

#[tokio::test(flavor = "multi_thread")]
async fn resubmitting_reversed_links_keeps_one_entry_per_url()
-> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("resubmitting_reversed_links_keeps_one_entry_per_url")?;
    let archiver = archiver_under_test(&mut reporter, RUN_TIMEOUT)?;
    let temp = TempDir::new()?;
    let output = OutputDir::new(temp.path());
    let env = ArchiverEnv::fetch_only();

    let links = unreachable_links(10);
    archiver.runner.run(&output, &links, &env).await?;

    let reversed: Vec<String> = links.iter().rev().cloned().collect();
    archiver.runner.run(&output, &reversed, &env).await?;

    let entries = list_entries(&output)?;
    if entries.len() != links.len() {
        return Err(format!("expected {} entries, found {}", links.len(), entries.len()).into());
    }
    verify_exact(&entries, &links)?;
    let urls: Vec<String> = archived_urls(&output)?.into_iter().collect();
    reporter.write_json("archived_urls.json", &urls)?;

    reporter.record_counts(links.len(), entries.len());
    reporter.pass("reversed re-submission kept one entry per url")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn every_entry_maps_back_to_a_submitted_link() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("every_entry_maps_back_to_a_submitted_link")?;
    let archiver = archiver_under_test(&mut reporter, RUN_TIMEOUT)?;
    let temp = TempDir::new()?;
    let output = OutputDir::new(temp.path());
    let env = ArchiverEnv::fetch_only();

    let all_links = unreachable_links(6);
    let first = &all_links[.. 4];

    archiver.runner.run(&output, first, &env).await?;
    let entries = list_entries(&output)?;
    verify_discoverability(&entries, first)?;

    archiver.runner.run(&output, &all_links, &env).await?;
    let entries = list_entries(&output)?;
    verify_discoverability(&entries, &all_links)?;
    verify_exact(&entries, &all_links)?;

    reporter.record_counts(all_links.len(), entries.len());
    reporter.pass("subset then superset runs left one entry per submitted link")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn summary_records_archiver_and_counts() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("summary_records_archiver_and_counts")?;
    let archiver = archiver_under_test(&mut reporter, RUN_TIMEOUT)?;
    let temp = TempDir::new()?;
    let output = OutputDir::new(temp.path());

    let links = unreachable_links(3);
    archiver.runner.run(&output, &links, &ArchiverEnv::fetch_only()).await?;
    let entries = list_entries(&output)?;
    reporter.record_counts(links.len(), entries.len());
    reporter.pass("summary written")?;

    let summary: serde_json::Value =
        serde_json::from_slice(&fs::read(reporter.root().join(SUMMARY_FILE))?)?;
    let expected_kind = if archiver.is_stub() { "stub" } else { "external" };
    if summary["outcome"] != "pass" || summary["archiver"]["kind"] != expected_kind {
        return Err(format!("unexpected summary header: {summary}").into());
    }
    if summary["counts"]["submitted_links"] != 3 || summary["counts"]["archived_entries"] != 3 {
        return Err(format!("unexpected summary counts: {summary}").into());
    }
    let listed = summary["artifacts"].as_array().is_some_and(|names| {
        names.iter().any(|name| name == "events.jsonl")
    });
    if !listed {
        return Err(format!("event log not listed: {summary}").into());
    }
    Ok(())
}
