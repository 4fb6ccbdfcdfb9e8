//! Action input resolution.
//!
//! This module provides the configuration surface of the action:
//! - Input values handed over by the workflow runner as `INPUT_*` variables
//! - Decoding of the JSON-encoded run list
//! - The configuration error type
//!
//! # Inputs
//!
//! | Input | Variable | Description |
//! |-------|----------|-------------|
//! | `network_url` | `INPUT_NETWORK_URL` | TestRail instance URL |
//! | `username` | `INPUT_USERNAME` | API user |
//! | `api_key` | `INPUT_API_KEY` | API key (basic-auth password) |
//! | `test_runs` | `INPUT_TEST_RUNS` | JSON array of `{projectId, suiteId, runId}` |
//! | `current_branch` | `INPUT_CURRENT_BRANCH` | Branch the pipeline is building |
//!
//! The runner materializes every input, possibly as an empty string, so a
//! missing variable is not a parse error: an empty `test_runs` fails JSON
//! decoding, an empty `current_branch` hits the explicit branch check.

use serde::Deserialize;

// ============================================================================
// Input Variable Names
// ============================================================================

/// Environment variable for the TestRail instance URL
pub const ENV_NETWORK_URL: &str = "INPUT_NETWORK_URL";

/// Environment variable for the API user
pub const ENV_USERNAME: &str = "INPUT_USERNAME";

/// Environment variable for the API key
pub const ENV_API_KEY: &str = "INPUT_API_KEY";

/// Environment variable for the JSON-encoded run list
pub const ENV_TEST_RUNS: &str = "INPUT_TEST_RUNS";

/// Environment variable for the current branch name
pub const ENV_CURRENT_BRANCH: &str = "INPUT_CURRENT_BRANCH";

// ============================================================================
// Resolved Inputs
// ============================================================================

/// Resolved action inputs, immutable for the rest of the invocation
#[derive(Debug, Clone)]
pub struct ActionInputs {
    /// TestRail instance URL (e.g. `https://org.testrail.io`)
    pub host: String,

    /// API user
    pub user: String,

    /// API key, sent as the basic-auth password
    pub api_key: String,

    /// Run list exactly as received, decoded by [`parse_runs`]
    pub test_runs: String,

    /// Branch the pipeline is building; empty marks the no-branch path
    pub branch: String,
}

/// One configured run to summarize
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSelector {
    /// Project the run belongs to
    pub project_id: u64,

    /// Suite the run was created from
    pub suite_id: u64,

    /// Run identifier, the key for both remote operations
    pub run_id: u64,
}

/// Decode the `test_runs` input into an ordered run list.
///
/// The input order is preserved and defines the order of the summary
/// blocks in the final output.
pub fn parse_runs(raw: &str) -> ConfigResult<Vec<RunSelector>> {
    serde_json::from_str(raw).map_err(ConfigError::RunList)
}

// ============================================================================
// Errors
// ============================================================================

/// Result type for configuration handling
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while resolving action inputs
#[derive(Debug)]
pub enum ConfigError {
    /// The `current_branch` input is empty or missing
    MissingBranch,

    /// The `test_runs` input is not a valid JSON run list
    RunList(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingBranch => write!(f, "Target branch name not found"),
            ConfigError::RunList(err) => write!(f, "Invalid test_runs input: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::MissingBranch => None,
            ConfigError::RunList(err) => Some(err),
        }
    }
}
