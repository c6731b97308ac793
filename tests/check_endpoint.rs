//! End-to-end checks over a real socket.

use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;
use token_gate::config::{parse_config, GateConfig};

mod common;

const CONFIG: &str = r#"
[server]
enabled = true
agents = ["bot123", "crawler"]

[[server.locations]]
path = "/text"
enabled = true
output_format = "text"
allow_text = "allowed"
deny_text = "denied"

[[server.locations]]
path = "/static"
"#;

fn config() -> GateConfig {
    parse_config(CONFIG).unwrap()
}

#[tokio::test]
async fn test_json_verdicts() {
    let server = common::start_server(config()).await;
    let client = common::client();

    let res = client.get(server.url("/?bot123")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/plain");
    assert_eq!(res.headers()[CONTENT_LENGTH], "17");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), r#"{"status":"true"}"#);

    let res = client.get(server.url("/?BOT123")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), r#"{"status":"true"}"#);

    let res = client.get(server.url("/?bot1234")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), r#"{"status":"false"}"#);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_text_location() {
    let server = common::start_server(config()).await;
    let client = common::client();

    let res = client.get(server.url("/text/x?crawler")).send().await.unwrap();
    assert_eq!(res.headers()[CONTENT_TYPE], "text/plain");
    assert_eq!(res.text().await.unwrap(), "allowed");

    let res = client.get(server.url("/text?someone")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "denied");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_head_request() {
    let server = common::start_server(config()).await;
    let client = common::client();

    let res = client.head(server.url("/?bot123")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/plain");
    assert_eq!(res.headers()[CONTENT_LENGTH], "17");
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client.head(server.url("/?nope")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_LENGTH], "18");
    assert!(res.bytes().await.unwrap().is_empty());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_client_errors() {
    let server = common::start_server(config()).await;
    let client = common::client();

    let res = client
        .post(server.url("/?bot123"))
        .body("payload")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(res.headers().get(CONTENT_TYPE).is_none());
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client.get(server.url("/static?bot123")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_request_body_is_discarded() {
    let server = common::start_server(config()).await;
    let client = common::client();

    let res = client
        .get(server.url("/?crawler"))
        .body(vec![b'x'; 64 * 1024])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), r#"{"status":"true"}"#);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = config();
    config.security.max_body_size = 16;
    let server = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(server.url("/?crawler"))
        .body(vec![b'x'; 1024])
        .send()
        .await
        .unwrap();
    assert!(res.status().is_client_error());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_reload_replaces_rules() {
    let server = common::start_server(config()).await;
    let client = common::client();

    let mut updated = config();
    updated.server.agents = vec!["newcomer".into()];
    server.config_updates.send(updated).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(server.url("/?newcomer")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), r#"{"status":"true"}"#);

    let res = client.get(server.url("/?bot123")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), r#"{"status":"false"}"#);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let server = common::start_server(config()).await;

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}
