//! Client-side configuration

use std::time::Duration;

/// Configuration for the telemetry client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the code-update webhook.
    pub endpoint: String,
    /// Optional shared secret sent as `X-API-Key`.
    pub api_key: Option<String>,
    /// Quiescence window: minimum gap of inactivity before a debounced
    /// delivery fires.
    pub quiescence_window: Duration,
    /// How long a terminal Sent/Error status stays visible before the
    /// status resets to Idle.
    pub status_display_interval: Duration,
    /// Per-request timeout for snapshot deliveries.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5750/webhook/code-update".to_string(),
            api_key: None,
            quiescence_window: Duration::from_millis(2000),
            status_display_interval: Duration::from_millis(3000),
            request_timeout: Duration::from_secs(10),
        }
    }
}
