// crates/archive-harness/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed configuration for archiver harness runs.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Optional path to the archiver binary under test.
    ArchiverBin,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional artifact root override.
    RunRoot,
    /// Allow scenarios that reach the public internet (`true`/`false` or `1`/`0`).
    AllowNetwork,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArchiverBin => "ARCHIVER_SYSTEM_TEST_BIN",
            Self::TimeoutSeconds => "ARCHIVER_SYSTEM_TEST_TIMEOUT_SEC",
            Self::RunRoot => "ARCHIVER_SYSTEM_TEST_RUN_ROOT",
            Self::AllowNetwork => "ARCHIVER_SYSTEM_TEST_ALLOW_NETWORK",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The variable holds bytes that are not UTF-8.
    #[error("{0} must be valid UTF-8")]
    NotUtf8(&'static str),
    /// The variable is set but blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// The timeout is not a positive integer.
    #[error("{0} must be a positive integer number of seconds")]
    InvalidTimeout(&'static str),
    /// The boolean literal is not recognized.
    #[error("{0} must be 1, 0, true, or false")]
    InvalidBool(&'static str),
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed harness configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarnessConfig {
    /// Archiver binary override.
    pub archiver_bin: Option<PathBuf>,
    /// Invocation timeout override.
    pub timeout: Option<Duration>,
    /// Artifact root override.
    pub run_root: Option<PathBuf>,
    /// Whether internet-dependent scenarios may run.
    pub allow_network: bool,
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid timeout or boolean value).
    pub fn load() -> Result<Self, ConfigError> {
        let archiver_bin = read_env_nonempty(HarnessEnv::ArchiverBin)?.map(PathBuf::from);
        let timeout = read_env_nonempty(HarnessEnv::TimeoutSeconds)?
            .map(|value| parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let run_root = read_env_nonempty(HarnessEnv::RunRoot)?.map(PathBuf::from);
        let allow_network = parse_bool_env(
            HarnessEnv::AllowNetwork.as_str(),
            read_env_nonempty(HarnessEnv::AllowNetwork)?,
        )?;
        Ok(Self {
            archiver_bin,
            timeout,
            run_root,
            allow_network,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
fn read_env_strict(name: &'static str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::NotUtf8(name))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(key: HarnessEnv) -> Result<Option<String>, ConfigError> {
    let name = key.as_str();
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(name)),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
fn parse_timeout_seconds(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout(name))?;
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout(name));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable; unset means `false`.
fn parse_bool_env(name: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(ConfigError::InvalidBool(name))
}
