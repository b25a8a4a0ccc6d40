//! Report generation endpoint
//!
//! Runs the synthesis pipeline for a finished interview. Upstream and
//! parse failures surface with their diagnostic payload; they are never
//! retried here and never coerced into a default report.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::AppState;
use parley_common::{Error, EvaluationReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    session_id: Option<String>,
    agent_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    success: bool,
    report: EvaluationReport,
}

/// POST /report/generate
pub async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateReportRequest>,
) -> Response {
    let Some(session_id) = request.session_id.filter(|s| !s.is_empty()) else {
        return bad_request("Missing required field: sessionId");
    };
    let Some(agent_id) = request.agent_id.filter(|s| !s.is_empty()) else {
        return bad_request("Missing required field: agentId");
    };

    match state.synthesizer.synthesize(&session_id, &agent_id).await {
        Ok(report) => (
            StatusCode::OK,
            Json(GenerateReportResponse {
                success: true,
                report,
            }),
        )
            .into_response(),
        Err(e) => synthesis_error_response(e),
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "error": message,
        })),
    )
        .into_response()
}

/// Map pipeline errors onto HTTP statuses with their diagnostic payload.
fn synthesis_error_response(e: Error) -> Response {
    match e {
        Error::Upstream { provider, detail } => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "success": false,
                "error": format!("Upstream failure from {provider}"),
                "detail": detail,
            })),
        )
            .into_response(),
        Error::Parse { detail, preview } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": format!("Could not extract a valid report: {detail}"),
                "rawPreview": preview,
            })),
        )
            .into_response(),
        other => {
            error!(error = %other, "Unexpected synthesis failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": other.to_string(),
                })),
            )
                .into_response()
        }
    }
}
