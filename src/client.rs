//! TestRail API client.
//!
//! Provides the two remote read operations the action consumes:
//! - Run metadata by run id (`get_run`)
//! - The list of tests belonging to a run (`get_tests`)
//!
//! Responses are decoded against an explicit schema at the boundary, so a
//! shape mismatch surfaces as a [`ClientError::Decode`] instead of leaking
//! an unchecked structure into the summarizers. Each call is a single
//! attempt: no retries, no caching.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Status id the service assigns to a passed test
pub const STATUS_PASSED: i64 = 1;

/// Status id the service assigns to a failed test
pub const STATUS_FAILED: i64 = 5;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the service
#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, timeout)
    Request(reqwest::Error),

    /// The service answered with a non-success status
    Api { status: u16, body: String },

    /// The response body did not match the expected schema
    Decode(serde_json::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Request(err) => write!(f, "Request failed: {}", err),
            ClientError::Api { status, body } => {
                let preview: String = body.chars().take(200).collect();
                write!(f, "API error (status {}): {}", status, preview)
            }
            ClientError::Decode(err) => write!(f, "Unexpected response shape: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Request(err) => Some(err),
            ClientError::Api { .. } => None,
            ClientError::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Request(err)
    }
}

/// Aggregate counts for a run, as reported by `get_run`
#[derive(Debug, Clone, Deserialize)]
pub struct RunMetadata {
    /// Tests with a passed result
    pub passed_count: u64,

    /// Tests with a blocked result
    pub blocked_count: u64,

    /// Tests not yet executed
    pub untested_count: u64,

    /// Tests marked for retest
    pub retest_count: u64,

    /// Tests with a failed result
    pub failed_count: u64,

    /// Browser URL of the run in the service UI
    pub url: String,
}

impl RunMetadata {
    /// Total population the pass percentage is computed over
    pub fn total(&self) -> u64 {
        self.passed_count
            + self.blocked_count
            + self.untested_count
            + self.retest_count
            + self.failed_count
    }
}

/// A single test's latest result within a run, as reported by `get_tests`
#[derive(Debug, Clone, Deserialize)]
pub struct TestRecord {
    /// Result status id; see [`STATUS_PASSED`] and [`STATUS_FAILED`]
    pub status_id: i64,

    /// Free-text references (ticket/branch names); absent or null for
    /// tests nothing was linked to
    #[serde(default)]
    pub refs: Option<String>,
}

/// `get_tests` answers with a paging envelope on current API versions and
/// a bare array on older ones; both shapes decode.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TestsResponse {
    Page { tests: Vec<TestRecord> },
    Flat(Vec<TestRecord>),
}

impl TestsResponse {
    fn into_tests(self) -> Vec<TestRecord> {
        match self {
            TestsResponse::Page { tests } => tests,
            TestsResponse::Flat(tests) => tests,
        }
    }
}

/// Source of run data, abstracted so the orchestrator can be driven by a
/// fake in tests
#[async_trait]
pub trait RunSource {
    /// Fetch the aggregate metadata of a run
    async fn fetch_run(&self, run_id: u64) -> ClientResult<RunMetadata>;

    /// Fetch the tests belonging to a run (first page)
    async fn fetch_run_tests(&self, run_id: u64) -> ClientResult<Vec<TestRecord>>;
}

/// HTTP client for a TestRail instance
#[derive(Debug, Clone)]
pub struct TestRailClient {
    host: String,
    user: String,
    api_key: String,
    http: reqwest::Client,
}

impl TestRailClient {
    /// Create a client for the given instance and credentials
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Build the URL for an API v2 operation keyed by run id
    fn endpoint(&self, operation: &str, run_id: u64) -> String {
        format!(
            "{}/index.php?/api/v2/{}/{}",
            self.host.trim_end_matches('/'),
            operation,
            run_id
        )
    }

    async fn get<T: DeserializeOwned>(&self, operation: &str, run_id: u64) -> ClientResult<T> {
        let url = self.endpoint(operation, run_id);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.user, Some(&self.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(ClientError::Decode)
    }
}

#[async_trait]
impl RunSource for TestRailClient {
    async fn fetch_run(&self, run_id: u64) -> ClientResult<RunMetadata> {
        self.get("get_run", run_id).await
    }

    async fn fetch_run_tests(&self, run_id: u64) -> ClientResult<Vec<TestRecord>> {
        let response: TestsResponse = self.get("get_tests", run_id).await?;
        Ok(response.into_tests())
    }
}
