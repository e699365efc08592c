//! Node API client integration against the mock node.

use ledger_load::node::ApiClient;
use ledger_load::LoadConfig;

mod common;

#[tokio::test]
async fn test_health_probe_reports_healthy() {
    let node = common::MockNode::start().await;
    let config = common::test_config(&node);
    let client = ApiClient::new(&config.node).unwrap();
    assert!(client.is_healthy().await);

    let info = client.info().await.unwrap();
    assert_eq!(info.name, "mock-node");
    assert_eq!(info.version, "2.0.0-test");
    assert!(info.status.is_healthy);
}

#[tokio::test]
async fn test_health_probe_false_when_unreachable() {
    // Grab a free port and release it so nothing answers there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = LoadConfig::default();
    config.node.url = format!("http://{}", addr);
    config.node.request_timeout_secs = 2;
    let client = ApiClient::new(&config.node).unwrap();
    assert!(!client.is_healthy().await);
}

#[tokio::test]
async fn test_output_fetch_round_trip() {
    let node = common::MockNode::start().await;
    let config = common::test_config(&node);
    let client = ApiClient::new(&config.node).unwrap();

    let page = client.basic_output_ids("rms1qmockaddress").await.unwrap();
    let output_id = page.items.first().unwrap().clone();
    let output = client.output(&output_id).await.unwrap();
    assert_eq!(output.metadata.output_id, output_id);
    assert!(!output.metadata.is_spent);
}
