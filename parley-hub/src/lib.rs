//! parley-hub library - session telemetry hub and report synthesis service
//!
//! Holds the per-session snapshot store behind the code-update webhook and
//! orchestrates report synthesis against the transcript and generation
//! providers. State is process-local; see `store` for the scaling caveat.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod config;
pub mod providers;
pub mod store;
pub mod synthesis;

use providers::{ReportGenerator, TranscriptProvider};
use store::SessionStore;
use synthesis::ReportSynthesizer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Session snapshot store (injected; in-memory by default)
    pub store: Arc<dyn SessionStore>,
    /// Synthesis pipeline over the same store plus the provider seams
    pub synthesizer: Arc<ReportSynthesizer>,
    /// Shared secret for the write endpoints; None/empty disables auth
    pub api_key: Option<String>,
}

impl AppState {
    /// Create new application state wiring the synthesizer to the store.
    pub fn new(
        store: Arc<dyn SessionStore>,
        transcript_provider: Arc<dyn TranscriptProvider>,
        generator: Arc<dyn ReportGenerator>,
        api_key: Option<String>,
    ) -> Self {
        let synthesizer = Arc::new(ReportSynthesizer::new(
            store.clone(),
            transcript_provider,
            generator,
        ));
        Self {
            store,
            synthesizer,
            api_key,
        }
    }
}

/// Build application router
///
/// Write endpoints sit behind the API key middleware; GET diagnostics and
/// /health are public. CORS is permissive so browser clients can deliver
/// snapshots cross-origin (OPTIONS preflight included).
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (write path)
    let protected = Router::new()
        .route("/webhook/code-update", post(api::post_code_update))
        .route("/report/generate", post(api::generate_report))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_api_key,
        ));

    // Public routes
    let public = Router::new()
        .route("/webhook/code-update", get(api::get_code_update))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .layer(CorsLayer::permissive())
}
