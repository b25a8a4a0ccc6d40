//! API key middleware for parley-hub
//!
//! Write endpoints accept a static shared-secret header. When no key is
//! configured the check is disabled entirely; this is not end-user
//! authentication, just a fence around the webhook surface.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// API key middleware
///
/// Validates `X-API-Key` against the configured secret.
/// Returns 401 Unauthorized on mismatch.
///
/// **Note:** applied to write routes only. GET diagnostics and /health
/// do not use this middleware.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // No configured key disables auth checking entirely.
    let Some(expected) = state.api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if key == expected => Ok(next.run(request).await),
        Some(_) => {
            warn!("Rejected request with mismatched API key");
            Err(AuthError::InvalidKey)
        }
        None => {
            warn!("Rejected request with missing API key header");
            Err(AuthError::MissingKey)
        }
    }
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    InvalidKey,
    MissingKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::InvalidKey => "Invalid API key",
            AuthError::MissingKey => "Missing X-API-Key header",
        };
        let body = Json(json!({
            "success": false,
            "error": message,
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
