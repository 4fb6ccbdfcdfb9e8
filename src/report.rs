//! Report orchestration.
//!
//! Drives one invocation end to end: branch check, run-list decoding, the
//! sequential per-run fetch loop, and block concatenation. Generic over
//! [`RunSource`] so tests drive it with a fake instead of a live service.

use crate::client::{ClientError, RunSource};
use crate::config::{self, ActionInputs, ConfigError};
use crate::output;
use crate::summary;

/// Value published instead of a report when the invocation fails
pub const RESULT_SENTINEL: &str = "N/A";

/// Separator between per-run blocks in the final output
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Result type for report building
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that abort report building
#[derive(Debug)]
pub enum ReportError {
    /// Input resolution failed
    Config(ConfigError),

    /// A remote operation failed
    Client(ClientError),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Config(err) => write!(f, "{}", err),
            ReportError::Client(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Config(err) => Some(err),
            ReportError::Client(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ReportError {
    fn from(err: ConfigError) -> Self {
        ReportError::Config(err)
    }
}

impl From<ClientError> for ReportError {
    fn from(err: ClientError) -> Self {
        ReportError::Client(err)
    }
}

/// Build the full summary text for the configured runs.
///
/// Runs are processed strictly in input order, one at a time; the two
/// remote reads per run are awaited sequentially. Any failure aborts the
/// remaining runs and discards blocks already built, so the caller never
/// publishes a partial report.
pub async fn build_report<S: RunSource + ?Sized>(
    inputs: &ActionInputs,
    source: &S,
) -> ReportResult<String> {
    // Stop before any network activity when no branch is provided,
    // probably due to use in a non-PR workflow.
    if inputs.branch.trim().is_empty() {
        return Err(ConfigError::MissingBranch.into());
    }

    let runs = config::parse_runs(&inputs.test_runs)?;

    let mut blocks = Vec::with_capacity(runs.len());
    for selector in &runs {
        output::debug(&format!(
            "Summarizing run {} (project {}, suite {})",
            selector.run_id, selector.project_id, selector.suite_id
        ));

        let run = source.fetch_run(selector.run_id).await?;
        let tests = source.fetch_run_tests(selector.run_id).await?;

        let mut block = summary::run_summary(&run);
        block.push('\n');
        block.push_str(&summary::related_summary(&tests, &inputs.branch));
        blocks.push(block);
    }

    Ok(blocks.join(BLOCK_SEPARATOR))
}
