//! Integration tests for the endpoint resource methods using wiremock.
//!
//! Verifies request construction (paths, verbs, query encoding, body
//! shapes, header handling) for the endpoint family.

use chrono::{Duration, Utc};
use reaqta_hive::{ApiConfig, Credential, HiveClient, ProcessToKill, Query, RequestSpec};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: a client with a preset valid token, so flow tests need no
/// `/1/authenticate` mock.
fn mock_client(server: &MockServer) -> HiveClient {
    let config = ApiConfig::new("app-id", "app-secret", server.uri());
    let credential = Credential::with_token(
        "app-id",
        "app-secret",
        "mock-token",
        Utc::now() + Duration::hours(1),
    );
    HiveClient::with_credential(config, credential).unwrap()
}

fn ok_empty() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": [], "remainingItems": 0
    }))
}

#[tokio::test]
async fn search_endpoints_sends_params_and_bearer() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/1/endpoints"))
        .and(query_param("os", "windows"))
        .and(header("authorization", "Bearer mock-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [{"id": "ep-1", "name": "WS-0042"}],
            "remainingItems": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = Query::new();
    params.push("os", "windows");
    let response = client.search_endpoints(params).await.unwrap();

    assert_eq!(response.data()["result"][0]["id"], "ep-1");
    assert!(!response.has_next_page());
}

#[tokio::test]
async fn array_params_serialize_as_repeated_keys() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/1/endpoints"))
        .respond_with(ok_empty())
        .mount(&server)
        .await;

    let mut params = Query::new();
    params.push_all("groupIds", ["g1", "g2"]);
    client.search_endpoints(params).await.unwrap();

    // Wire-compatibility requirement: repeated-key form, not brackets or
    // comma-joined values.
    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert_eq!(query, "groupIds=g1&groupIds=g2");
}

#[tokio::test]
async fn get_endpoint_hits_the_id_path() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/1/endpoint/ep-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "ep-7", "isolated": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.get_endpoint("ep-7").await.unwrap();
    assert_eq!(response.data()["id"], "ep-7");
}

#[tokio::test]
async fn kill_processes_posts_pid_and_start_time() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/1/endpoint/ep-7/processes/kill"))
        .and(body_json(serde_json::json!([
            {"pid": 4312, "startTime": 132412345000i64},
            {"pid": 998, "startTime": 132412999000i64}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let procs = vec![
        ProcessToKill {
            pid: 4312,
            start_time: 132_412_345_000,
        },
        ProcessToKill {
            pid: 998,
            start_time: 132_412_999_000,
        },
    ];
    client.kill_endpoint_processes("ep-7", &procs).await.unwrap();
}

#[tokio::test]
async fn isolate_and_deisolate_post_to_their_paths() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/1/endpoint/ep-7/isolate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1/endpoint/ep-7/deisolate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.isolate_endpoint("ep-7").await.unwrap();
    client.deisolate_endpoint("ep-7").await.unwrap();
}

#[tokio::test]
async fn caller_headers_are_merged_but_cannot_shadow_authorization() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    // The request carries the caller's custom header AND the pipeline's
    // bearer token — even though the caller tried to supply its own
    // Authorization value.
    Mock::given(method("GET"))
        .and(path("/1/endpoints"))
        .and(header("x-trace-id", "trace-123"))
        .and(header("authorization", "Bearer mock-token"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::get()
        .header("x-trace-id", "trace-123")
        .header("authorization", "Bearer forged-token");
    client.signed_request("/1/endpoints", spec).await.unwrap();
}

#[tokio::test]
async fn empty_response_body_wraps_as_null() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/1/endpoint/ep-7/isolate"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let response = client.isolate_endpoint("ep-7").await.unwrap();
    assert!(response.data().is_null());
    assert!(!response.has_next_page());
}
