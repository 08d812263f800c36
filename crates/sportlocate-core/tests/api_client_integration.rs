//! Integration tests for ApiClient using wiremock.
//!
//! These tests verify the retry bound and error mapping against a mock HTTP server.

use sportlocate_core::{ApiClient, ApiError, RetryConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Three attempts, one millisecond apart
fn fast_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), RetryConfig::new(3, 1)).unwrap()
}

#[tokio::test]
async fn test_get_success_passes_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"typeCode": 1000, "subCategories": []}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        ApiClient::new(&format!("{}/api", mock_server.uri()), RetryConfig::new(3, 1)).unwrap();
    let value = client
        .get("/categories", Some(&[("lang", "en")]))
        .await
        .unwrap();

    assert_eq!(value[0]["typeCode"], 1000);
}

#[tokio::test]
async fn test_two_failures_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server);
    let value = client.get("/flaky", None).await.unwrap();

    assert_eq!(value["ok"], true);
}

#[tokio::test]
async fn test_three_failures_surface_unavailable_without_fourth_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server);
    let err = client.get("/down", None).await.unwrap_err();

    match err {
        ApiError::Unavailable { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("expected Unavailable, got {:?}", other),
    }

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_client_error_status_is_also_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server);
    let err = client.get("/missing", None).await.unwrap_err();

    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_non_json_body_is_retried_then_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server);
    let err = client.get("/garbage", None).await.unwrap_err();

    assert!(matches!(err, ApiError::Parse { .. }));
}

#[tokio::test]
async fn test_unreachable_host_is_unavailable() {
    // Port 9 (discard) is closed on test machines; connection is refused.
    let client = ApiClient::new("http://127.0.0.1:9", RetryConfig::new(2, 1)).unwrap();
    let err = client.get("/anything", None).await.unwrap_err();

    match err {
        ApiError::Unavailable { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("expected Unavailable, got {:?}", other),
    }
}
