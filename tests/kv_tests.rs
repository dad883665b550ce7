//! Storage backend tests: file-store persistence across reloads and the
//! hosted client's REST command encoding against a mock server.

use serde_json::{json, Value};
use tempfile::TempDir;
use voxboard::kv::{FileStore, KvStore, UpstashStore};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= File store =============

#[tokio::test]
async fn file_store_survives_reload() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("agents.json");

    {
        let store = FileStore::open(&data_file);
        store
            .set("agent:john", json!({"name": "john"}))
            .await
            .unwrap();
        store
            .set("agent:jane", json!({"name": "jane"}))
            .await
            .unwrap();
    }

    // Reopening reads the rewritten file, simulating a process restart.
    let store = FileStore::open(&data_file);
    let mut keys = store.keys("agent:*").await.unwrap();
    keys.sort_unstable();
    assert_eq!(keys, vec!["agent:jane", "agent:john"]);
    assert_eq!(
        store.get("agent:john").await.unwrap(),
        Some(json!({"name": "john"}))
    );
}

#[tokio::test]
async fn file_store_del_persists() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("agents.json");

    let store = FileStore::open(&data_file);
    store.set("agent:john", json!(1)).await.unwrap();
    store.del("agent:john").await.unwrap();
    drop(store);

    let store = FileStore::open(&data_file);
    assert_eq!(store.get("agent:john").await.unwrap(), None);
}

#[tokio::test]
async fn file_store_keys_only_match_prefix() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("agents.json"));

    store.set("agent:john", json!(1)).await.unwrap();
    store.set("call:xyz", json!(2)).await.unwrap();

    let keys = store.keys("agent:*").await.unwrap();
    assert_eq!(keys, vec!["agent:john"]);
}

// ============= Hosted store (Upstash REST) =============

async fn mock_command(server: &MockServer, cmd: Value, result: Value) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(cmd))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": result })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn upstash_set_and_get_round_trip() {
    let server = MockServer::start().await;
    let agent = json!({"name": "john", "assistantId": "abc"});

    mock_command(
        &server,
        json!(["SET", "agent:john", agent.to_string()]),
        json!("OK"),
    )
    .await;
    mock_command(
        &server,
        json!(["GET", "agent:john"]),
        json!(agent.to_string()),
    )
    .await;

    let store = UpstashStore::new(server.uri(), "test-token".to_string()).unwrap();
    store.set("agent:john", agent.clone()).await.unwrap();
    assert_eq!(store.get("agent:john").await.unwrap(), Some(agent));
}

#[tokio::test]
async fn upstash_get_missing_key_is_none() {
    let server = MockServer::start().await;
    mock_command(&server, json!(["GET", "agent:ghost"]), Value::Null).await;

    let store = UpstashStore::new(server.uri(), "test-token".to_string()).unwrap();
    assert_eq!(store.get("agent:ghost").await.unwrap(), None);
}

#[tokio::test]
async fn upstash_mget_keeps_input_order_with_gaps() {
    let server = MockServer::start().await;
    mock_command(
        &server,
        json!(["MGET", "agent:a", "agent:b"]),
        json!(["{\"n\":1}", null]),
    )
    .await;

    let store = UpstashStore::new(server.uri(), "test-token".to_string()).unwrap();
    let values = store
        .mget(&["agent:a".to_string(), "agent:b".to_string()])
        .await
        .unwrap();
    assert_eq!(values, vec![Some(json!({"n": 1})), None]);
}

#[tokio::test]
async fn upstash_keys_decodes_string_array() {
    let server = MockServer::start().await;
    mock_command(
        &server,
        json!(["KEYS", "agent:*"]),
        json!(["agent:john", "agent:jane"]),
    )
    .await;

    let store = UpstashStore::new(server.uri(), "test-token".to_string()).unwrap();
    let keys = store.keys("agent:*").await.unwrap();
    assert_eq!(keys, vec!["agent:john", "agent:jane"]);
}

#[tokio::test]
async fn upstash_error_envelope_surfaces_as_storage_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "unauthorized" })),
        )
        .mount(&server)
        .await;

    let store = UpstashStore::new(server.uri(), "bad-token".to_string()).unwrap();
    let err = store.get("agent:john").await.unwrap_err();
    assert!(err.to_string().contains("unauthorized"));
}

#[tokio::test]
async fn upstash_mget_of_nothing_skips_the_network() {
    // No mocks mounted: an empty key list must not issue a request.
    let server = MockServer::start().await;
    let store = UpstashStore::new(server.uri(), "test-token".to_string()).unwrap();
    assert!(store.mget(&[]).await.unwrap().is_empty());
}
