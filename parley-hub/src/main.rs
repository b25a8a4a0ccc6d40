//! Parley Hub - Main entry point
//!
//! Session telemetry hub for the interview assistant: receives debounced
//! code snapshots over the webhook, serves them back for diagnostics, and
//! synthesizes evaluation reports when an interview finishes.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parley_hub::config::{Args, Config};
use parley_hub::providers::{
    ChatCompletionsGenerator, ConvaiTranscriptClient, GeneratorConfig, TranscriptConfig,
};
use parley_hub::store::MemoryStore;
use parley_hub::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley_hub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification, logged before anything that can stall
    info!(
        "Starting Parley Hub v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = Config::resolve(args).context("Failed to resolve configuration")?;

    if config.api_key.is_none() {
        info!("Webhook API key not configured - write endpoints are unauthenticated");
    }
    if config.transcript_api_key.is_empty() {
        warn!("Transcript provider API key not configured - report synthesis will fail upstream");
    }
    if config.generator_api_key.is_empty() {
        warn!("Generator API key not configured - report synthesis will fail upstream");
    }

    // Provider clients share the configured timeout bound
    let transcript_client = ConvaiTranscriptClient::new(TranscriptConfig {
        base_url: config.transcript_base_url.clone(),
        api_key: config.transcript_api_key.clone(),
        timeout_secs: config.request_timeout_secs,
    })
    .context("Failed to build transcript client")?;

    let generator_client = ChatCompletionsGenerator::new(GeneratorConfig {
        base_url: config.generator_base_url.clone(),
        api_key: config.generator_api_key.clone(),
        model: config.generator_model.clone(),
        timeout_secs: config.request_timeout_secs,
    })
    .context("Failed to build generator client")?;

    // Process-local store: snapshots live only for this process's lifetime
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(transcript_client),
        Arc::new(generator_client),
        config.api_key.clone(),
    );

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
