//! Integration tests for the code-update webhook endpoints
//!
//! Drives the real router through tower `oneshot`, covering:
//! - POST/GET round trip for a session snapshot
//! - Missing-field validation (400)
//! - API key enforcement on the write path (401)
//! - Unknown-session lookup (404 with availableSessions)
//! - Index metadata when no sessionId is given
//! - Health endpoint

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;

use async_trait::async_trait;
use parley_common::{Error, Transcript};
use parley_hub::providers::{ReportGenerator, TranscriptProvider};
use parley_hub::store::MemoryStore;
use parley_hub::{build_router, AppState};
use tower::util::ServiceExt; // for `oneshot` method

/// Providers that always fail; webhook tests never reach them.
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

/// Test helper: create app, optionally with an API key configured
fn setup_app(api_key: Option<&str>) -> axum::Router {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(NoProviders),
        Arc::new(NoProviders),
        api_key.map(str::to_string),
    );
    build_router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn update_body(session_id: &str, code: &str) -> Value {
    json!({
        "code": code,
        "language": "javascript",
        "timestamp": "2024-01-01T00:00:00Z",
        "sessionId": session_id,
    })
}

// =============================================================================
// POST /webhook/code-update
// =============================================================================

#[tokio::test]
async fn test_post_then_get_round_trip() {
    let app = setup_app(None);

    let response = app
        .clone()
        .oneshot(post_json(
            "/webhook/code-update",
            update_body("s1", "console.log(1)"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["received"], true);
    assert_eq!(body["sessionId"], "s1");
    assert_eq!(body["timestamp"], "2024-01-01T00:00:00Z");

    let response = app
        .oneshot(get("/webhook/code-update?sessionId=s1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["code"], "console.log(1)");
    assert_eq!(body["language"], "javascript");
    assert_eq!(body["sessionId"], "s1");
    assert!(body["lastUpdated"].is_string());
}

#[tokio::test]
async fn test_post_overwrites_prior_snapshot() {
    let app = setup_app(None);

    for code in ["first()", "second()"] {
        let response = app
            .clone()
            .oneshot(post_json("/webhook/code-update", update_body("s1", code)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get("/webhook/code-update?sessionId=s1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["code"], "second()");
}

#[tokio::test]
async fn test_post_missing_fields_is_400() {
    let app = setup_app(None);

    for field in ["code", "language", "timestamp", "sessionId"] {
        let mut body = update_body("s1", "x");
        body.as_object_mut().unwrap().remove(field);

        let response = app
            .clone()
            .oneshot(post_json("/webhook/code-update", body))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "missing {field} should be 400"
        );

        let json = extract_json(response.into_body()).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains(field));
    }
}

#[tokio::test]
async fn test_post_preserves_optional_user_id() {
    let app = setup_app(None);

    let mut body = update_body("s1", "x");
    body.as_object_mut()
        .unwrap()
        .insert("userId".to_string(), json!("u-42"));

    app.clone()
        .oneshot(post_json("/webhook/code-update", body))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/webhook/code-update?sessionId=s1"))
        .await
        .unwrap();
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["userId"], "u-42");
}

// =============================================================================
// API key enforcement
// =============================================================================

#[tokio::test]
async fn test_post_without_key_is_401_when_configured() {
    let app = setup_app(Some("hub-secret"));

    let response = app
        .oneshot(post_json("/webhook/code-update", update_body("s1", "x")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_post_with_wrong_key_is_401() {
    let app = setup_app(Some("hub-secret"));

    let mut request = post_json("/webhook/code-update", update_body("s1", "x"));
    request
        .headers_mut()
        .insert("x-api-key", "wrong".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_post_with_correct_key_succeeds() {
    let app = setup_app(Some("hub-secret"));

    let mut request = post_json("/webhook/code-update", update_body("s1", "x"));
    request
        .headers_mut()
        .insert("x-api-key", "hub-secret".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_is_public_even_with_key_configured() {
    let app = setup_app(Some("hub-secret"));

    let response = app.oneshot(get("/webhook/code-update")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// GET /webhook/code-update
// =============================================================================

#[tokio::test]
async fn test_get_unknown_session_is_404_with_available_sessions() {
    let app = setup_app(None);

    app.clone()
        .oneshot(post_json("/webhook/code-update", update_body("known", "x")))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/webhook/code-update?sessionId=unknown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    let available: Vec<&str> = body["availableSessions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(available, vec!["known"]);
}

#[tokio::test]
async fn test_get_without_session_id_returns_index() {
    let app = setup_app(None);

    for id in ["s1", "s2"] {
        app.clone()
            .oneshot(post_json("/webhook/code-update", update_body(id, "x")))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/webhook/code-update")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["totalSessions"], 2);
    assert_eq!(body["sessions"].as_array().unwrap().len(), 2);
}

// =============================================================================
// Health endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let app = setup_app(Some("hub-secret"));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "parley-hub");
    assert!(body["version"].is_string());
}
