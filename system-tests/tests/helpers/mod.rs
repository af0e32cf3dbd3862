// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for archiver system-tests.
// Purpose: Provide archiver resolution, fixtures, and artifact utilities.
// Dependencies: archive-harness
// ============================================================================

//! ## Overview
//! Shared helpers for archiver system-tests.
//! Invariants:
//! - Every test owns a fresh output directory.
//! - Archiver invocations are sequential within a test.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod archiver;
pub mod links;
