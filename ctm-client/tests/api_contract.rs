//! HTTP-contract tests for `ApiClient`.
//!
//! Exercises every endpoint against a wiremock server: request shape (method,
//! path, query, JSON body) and response handling (order preservation, status
//! mapping, the rm-repo status exemption).

use ctm_client::{ApiClient, ApiError, DEFAULT_HISTORY_COUNT};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn commit_history_preserves_server_order() {
    let server = MockServer::start().await;
    let commits = json!([
        {"hash": "c3", "message": "third", "author": "a", "date": "2024-03-03T00:00:00+00:00"},
        {"hash": "c2", "message": "second", "author": "b", "date": "2024-03-02T00:00:00+00:00"},
        {"hash": "c1", "message": "first", "author": "c", "date": "2024-03-01T00:00:00+00:00"},
    ]);
    Mock::given(method("GET"))
        .and(path("/commits"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&commits))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let history = client
        .commit_history(None, DEFAULT_HISTORY_COUNT)
        .await
        .unwrap();

    assert_eq!(history.len(), 3);
    let hashes: Vec<&str> = history.iter().map(|c| c.hash.as_str()).collect();
    assert_eq!(hashes, ["c3", "c2", "c1"]);
}

#[tokio::test]
async fn commit_history_forwards_repo_url_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commits"))
        .and(query_param("count", "10"))
        .and(query_param("repo_url", "https://github.com/acme/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let history = client
        .commit_history(Some("https://github.com/acme/widgets"), 10)
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn commit_history_maps_server_error_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commits"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.commit_history(None, 10).await.unwrap_err();
    assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 500));
}

#[tokio::test]
async fn analyze_commit_sends_null_for_missing_hash() {
    let server = MockServer::start().await;
    let result = json!({
        "commit_metadata": {
            "hash": "c9", "author": "a", "date": "2024-03-01T00:00:00+00:00",
            "message": "tidy"
        },
        "analysis": "Touches one file.",
        "fix_suggestion": "Looks fine."
    });
    Mock::given(method("POST"))
        .and(path("/analyze-commit"))
        .and(body_json(json!({
            "repo_url": "https://github.com/acme/widgets",
            "commit_hash": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&result))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let analysis = client
        .analyze_commit("https://github.com/acme/widgets", None)
        .await
        .unwrap();
    assert_eq!(analysis.commit_metadata.hash, "c9");
    assert_eq!(analysis.analysis, "Touches one file.");
}

#[tokio::test]
async fn analyze_commit_sends_explicit_hash() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-commit"))
        .and(body_json(json!({
            "repo_url": "https://github.com/acme/widgets",
            "commit_hash": "90e5a216"
        })))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .analyze_commit("https://github.com/acme/widgets", Some("90e5a216"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 400));
}

#[tokio::test]
async fn remove_repo_ignores_http_status() {
    // Cleanup is best-effort: even a 500 from the backend counts as success.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rm-repo"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.remove_repo().await.is_ok());
}

#[tokio::test]
async fn remove_repo_reports_transport_failure() {
    // Point at a server that has been shut down so the connect fails.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ApiClient::new(&uri).unwrap();
    let err = client.remove_repo().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn health_probe_hits_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Code Time Machine"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.health().await.is_ok());
}
