//! End-to-end telemetry flow
//!
//! Wires the real chain together: editing events → TelemetryDebouncer →
//! DeliveryClient → HTTP → hub SessionStore, served by the real hub
//! router on a local listener. Uses a short real-time quiescence window
//! since actual network I/O is involved.

use async_trait::async_trait;
use parley_client::{ClientConfig, DeliveryClient, SessionIdentity, TelemetryDebouncer};
use parley_common::{CodeSnapshot, Error, Transcript};
use parley_hub::providers::{ReportGenerator, TranscriptProvider};
use parley_hub::store::MemoryStore;
use parley_hub::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

struct NoProviders;

#[async_trait]
impl TranscriptProvider for NoProviders {
    async fn fetch(&self, _agent_id: &str) -> parley_common::Result<Transcript> {
        Err(Error::upstream("transcript", "not wired in this test"))
    }
}

#[async_trait]
impl ReportGenerator for NoProviders {
    async fn complete(&self, _prompt: &str) -> parley_common::Result<String> {
        Err(Error::upstream("generator", "not wired in this test"))
    }
}

async fn spawn_hub(api_key: Option<&str>) -> SocketAddr {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(NoProviders),
        Arc::new(NoProviders),
        api_key.map(str::to_string),
    );
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn debounced_edits_land_in_the_hub_store() {
    let addr = spawn_hub(Some("e2e-secret")).await;

    let identity = SessionIdentity::new();
    let session_id = identity.get();

    let client = DeliveryClient::new(ClientConfig {
        endpoint: format!("http://{addr}/webhook/code-update"),
        api_key: Some("e2e-secret".to_string()),
        ..ClientConfig::default()
    })
    .unwrap();

    let window = Duration::from_millis(150);
    let debouncer = TelemetryDebouncer::new(Arc::new(client), window);

    // A quick burst: only the final draft should reach the hub.
    for code in ["let x", "let x =", "let x = 1;"] {
        debouncer.notify(CodeSnapshot::now(code, "javascript", session_id.clone()));
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // Wait out the window plus delivery latency.
    tokio::time::sleep(window + Duration::from_millis(500)).await;

    let body: serde_json::Value = reqwest::get(format!(
        "http://{addr}/webhook/code-update?sessionId={session_id}"
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["code"], "let x = 1;");
    assert_eq!(body["sessionId"], session_id.as_str());
    assert!(body["lastUpdated"].is_string());
}
