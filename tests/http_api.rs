//! HTTP API integration tests.
//!
//! Tests for the REST endpoints (health check, presence snapshot,
//! per-user presence).

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start(19080).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_presence_endpoint_empty() {
    // テスト項目: 接続がないとき /api/presence は空のスナップショットを返す
    // given (前提条件):
    let server = TestServer::start(19081).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/presence", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["onlineCount"], 0);
    assert_eq!(body["onlineUsers"], serde_json::json!([]));
}

#[tokio::test]
async fn test_user_presence_endpoint_offline() {
    // テスト項目: 未接続のユーザーは online: false
    // given (前提条件):
    let server = TestServer::start(19082).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/presence/Alice", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["username"], "Alice");
    assert_eq!(body["online"], false);
}
