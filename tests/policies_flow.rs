//! Integration tests for the policy resource methods using wiremock.

use chrono::{Duration, Utc};
use reaqta_hive::{ApiConfig, Credential, HiveClient, PolicyToggleOptions, Query, TriggerOnProcessHash};
use wiremock::matchers::{body_json, method, path, query_param};
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

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({}))
}

#[tokio::test]
async fn search_and_get_policy_hit_their_paths() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/1/policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [{"id": "pol-1"}], "remainingItems": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/policy/pol-1"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let response = client.search_policies(Query::new()).await.unwrap();
    assert_eq!(response.data()["result"][0]["id"], "pol-1");
    client.get_policy("pol-1").await.unwrap();
}

#[tokio::test]
async fn enable_policy_sends_version_and_repeated_group_ids() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/1/policy/pol-1/enable"))
        .and(query_param("previousVersionId", "v41"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let options = PolicyToggleOptions {
        previous_version_id: Some("v41".to_string()),
        group_ids: Some(vec!["g1".to_string(), "g2".to_string()]),
    };
    client.enable_policy("pol-1", options).await.unwrap();

    // groupIds must go out in repeated-key form.
    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert_eq!(query, "previousVersionId=v41&groupIds=g1&groupIds=g2");
}

#[tokio::test]
async fn disable_policy_with_no_options_sends_no_query() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/1/policy/pol-1/disable"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    client
        .disable_policy("pol-1", PolicyToggleOptions::default())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn trigger_on_process_hash_posts_camel_case_body() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let sha256 = "ab".repeat(32);
    Mock::given(method("POST"))
        .and(path("/1/policy/trigger-on-process-hash"))
        .and(body_json(serde_json::json!({
            "title": "Block dropper",
            "sha256": sha256,
            "block": true,
            "enabledGroups": ["g1"]
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let details = TriggerOnProcessHash {
        block: Some(true),
        enabled_groups: Some(vec!["g1".to_string()]),
        ..TriggerOnProcessHash::new("Block dropper", sha256.clone())
    };
    client.create_trigger_on_process_hash(details).await.unwrap();
}
