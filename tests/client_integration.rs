//! Integration tests for the TestRail client against a local mock server.

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use testrail_summary::client::{ClientError, RunSource, TestRailClient};

// base64("user:api-key"), the header reqwest builds from the credentials
const BASIC_AUTH: &str = "Basic dXNlcjphcGkta2V5";

fn client_for(server: &MockServer) -> TestRailClient {
    TestRailClient::new(server.base_url(), "user", "api-key")
}

#[tokio::test]
async fn test_fetch_run_decodes_metadata() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/index.php")
                .header("authorization", BASIC_AUTH);
            then.status(200).json_body(json!({
                "id": 81,
                "name": "Release sweep",
                "passed_count": 3,
                "blocked_count": 1,
                "untested_count": 2,
                "retest_count": 0,
                "failed_count": 2,
                "url": "https://org.testrail.io/index.php?/runs/view/81"
            }));
        })
        .await;

    let run = client_for(&server).fetch_run(81).await.unwrap();

    mock.assert_async().await;
    assert_eq!(run.passed_count, 3);
    assert_eq!(run.failed_count, 2);
    assert_eq!(run.total(), 8);
    assert_eq!(run.url, "https://org.testrail.io/index.php?/runs/view/81");
}

#[tokio::test]
async fn test_fetch_run_tests_paging_envelope() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/index.php");
            then.status(200).json_body(json!({
                "offset": 0,
                "limit": 250,
                "size": 2,
                "_links": {"next": null, "prev": null},
                "tests": [
                    {"id": 1, "status_id": 1, "refs": "LOGIN-FIX-123"},
                    {"id": 2, "status_id": 5, "refs": null}
                ]
            }));
        })
        .await;

    let tests = client_for(&server).fetch_run_tests(81).await.unwrap();

    mock.assert_async().await;
    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0].refs.as_deref(), Some("LOGIN-FIX-123"));
    assert_eq!(tests[1].refs, None);
}

#[tokio::test]
async fn test_fetch_run_tests_legacy_array() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/index.php");
            then.status(200)
                .json_body(json!([{"status_id": 1}, {"status_id": 3, "refs": "T-9"}]));
        })
        .await;

    let tests = client_for(&server).fetch_run_tests(81).await.unwrap();

    assert_eq!(tests.len(), 2);
    assert_eq!(tests[1].refs.as_deref(), Some("T-9"));
}

#[tokio::test]
async fn test_fetch_run_surfaces_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/index.php");
            then.status(400)
                .json_body(json!({"error": "Field :run_id is not a valid test run."}));
        })
        .await;

    let err = client_for(&server).fetch_run(999).await.unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("not a valid test run"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_run_surfaces_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/index.php");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client_for(&server).fetch_run(81).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_run_tests_shape_mismatch_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/index.php");
            // an envelope without the tests array matches neither shape
            then.status(200).json_body(json!({"offset": 0, "limit": 250}));
        })
        .await;

    let err = client_for(&server).fetch_run_tests(81).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_request_error() {
    // nothing listens on the discard port
    let client = TestRailClient::new("http://127.0.0.1:9", "user", "api-key");
    let err = client.fetch_run(81).await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
}
