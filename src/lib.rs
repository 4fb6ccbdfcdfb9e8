//! TestRail run summary for CI pipelines.
//!
//! This crate provides:
//! - Action input resolution from the workflow runner's `INPUT_*` variables
//! - A thin TestRail API client behind a swappable [`client::RunSource`] seam
//! - Pure summarizers for whole-run and branch-related pass/fail counts
//! - A report orchestrator that concatenates one block per configured run
//! - The pipeline output channel, with a guaranteed single `run_result` write
//!
//! # Example
//!
//! ```rust,no_run
//! use testrail_summary::client::TestRailClient;
//! use testrail_summary::config::ActionInputs;
//! use testrail_summary::report::build_report;
//!
//! # async fn demo() {
//! let inputs = ActionInputs {
//!     host: "https://org.testrail.io".to_string(),
//!     user: "ci@org.example".to_string(),
//!     api_key: "secret".to_string(),
//!     test_runs: r#"[{"projectId": 1, "suiteId": 2, "runId": 81}]"#.to_string(),
//!     branch: "feature/login-fix".to_string(),
//! };
//! let client = TestRailClient::new(&inputs.host, &inputs.user, &inputs.api_key);
//! let report = build_report(&inputs, &client).await.unwrap();
//! println!("{}", report);
//! # }
//! ```

pub mod client;
pub mod config;
pub mod output;
pub mod report;
pub mod summary;

// Re-export client types
pub use client::{
    ClientError, ClientResult, RunMetadata, RunSource, STATUS_FAILED, STATUS_PASSED,
    TestRailClient, TestRecord,
};

// Re-export input resolution
pub use config::{ActionInputs, ConfigError, ConfigResult, RunSelector, parse_runs};

// Re-export the output channel
pub use output::{OUTPUT_RUN_RESULT, OutputGuard, set_output};

// Re-export report building
pub use report::{BLOCK_SEPARATOR, RESULT_SENTINEL, ReportError, ReportResult, build_report};

// Re-export summarizers
pub use summary::{
    RelatedCounts, count_related, normalize_branch, pass_percentage, related_summary, run_summary,
};
