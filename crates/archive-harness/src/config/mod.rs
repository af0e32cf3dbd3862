// crates/archive-harness/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: Centralized configuration for archiver harness runs.
// Purpose: Provide typed access to harness environment settings and defaults.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! Harness configuration is read from environment variables and mapped into
//! a small typed structure shared by the runner and the system tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ConfigError;
pub use env::HarnessConfig;
pub use env::HarnessEnv;
