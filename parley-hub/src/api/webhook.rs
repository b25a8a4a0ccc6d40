//! Code-update webhook handlers
//!
//! POST stores the latest snapshot for a session (unconditional overwrite);
//! GET returns the stored snapshot, or index metadata when no session id is
//! given. Field validation happens here so that a missing field is a clean
//! 400 rather than a body-rejection status.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::store::StoredSnapshot;
use crate::AppState;
use parley_common::CodeSnapshot;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Incoming snapshot body. All fields optional so presence can be
/// validated explicitly with a 400 per missing field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeUpdateRequest {
    code: Option<String>,
    language: Option<String>,
    timestamp: Option<String>,
    session_id: Option<String>,
    user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeUpdateResponse {
    success: bool,
    received: bool,
    session_id: String,
    timestamp: String,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotQuery {
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    success: bool,
    #[serde(flatten)]
    stored: StoredSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIndexResponse {
    success: bool,
    total_sessions: usize,
    sessions: Vec<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /webhook/code-update
///
/// Stores the snapshot, overwriting any prior entry for the session.
/// Arrival order at the store decides the winner, not the embedded
/// `timestamp`.
pub async fn post_code_update(
    State(state): State<AppState>,
    Json(request): Json<CodeUpdateRequest>,
) -> Response {
    let Some(code) = present(request.code) else {
        return missing_field("code");
    };
    let Some(language) = present(request.language) else {
        return missing_field("language");
    };
    let Some(timestamp) = present(request.timestamp) else {
        return missing_field("timestamp");
    };
    let Some(session_id) = present(request.session_id) else {
        return missing_field("sessionId");
    };

    let snapshot = CodeSnapshot {
        code,
        language,
        timestamp,
        session_id,
        user_id: request.user_id,
    };

    let stored = state.store.put(snapshot).await;
    info!(
        session_id = %stored.snapshot.session_id,
        language = %stored.snapshot.language,
        "Code update received"
    );

    (
        StatusCode::OK,
        Json(CodeUpdateResponse {
            success: true,
            received: true,
            session_id: stored.snapshot.session_id,
            timestamp: stored.snapshot.timestamp,
            message: "Code update received".to_string(),
        }),
    )
        .into_response()
}

/// GET /webhook/code-update?sessionId=<id>
///
/// With a session id: the stored snapshot or 404 listing known sessions.
/// Without: index metadata for diagnostics.
pub async fn get_code_update(
    State(state): State<AppState>,
    Query(query): Query<SnapshotQuery>,
) -> Response {
    let Some(session_id) = query.session_id.filter(|s| !s.is_empty()) else {
        let sessions = state.store.list().await;
        return (
            StatusCode::OK,
            Json(SessionIndexResponse {
                success: true,
                total_sessions: sessions.len(),
                sessions,
            }),
        )
            .into_response();
    };

    match state.store.get(&session_id).await {
        Some(stored) => (
            StatusCode::OK,
            Json(SnapshotResponse {
                success: true,
                stored,
            }),
        )
            .into_response(),
        None => {
            let available_sessions = state.store.list().await;
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "error": format!("No code found for session {session_id}"),
                    "availableSessions": available_sessions,
                })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

fn missing_field(name: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "error": format!("Missing required field: {name}"),
        })),
    )
        .into_response()
}
