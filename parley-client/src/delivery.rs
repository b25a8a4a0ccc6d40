//! Snapshot delivery client
//!
//! One POST per delivery, no retries, no queue: a failed send is dropped
//! and only reflected in the observable status. A failed autosave must
//! never interrupt the host application, so `send` returns a bool and
//! swallows every failure after logging it.

use async_trait::async_trait;
use parley_common::{CodeSnapshot, Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::debounce::SnapshotSink;

/// Observable delivery state.
///
/// Transitions `Idle → Sending → {Sent|Error} → Idle`; the return to Idle
/// is time-based (status_display_interval), so the UI briefly shows the
/// terminal state before resetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Idle,
    Sending,
    Sent,
    Error,
}

pub struct DeliveryClient {
    http_client: reqwest::Client,
    config: ClientConfig,
    status_tx: Arc<watch::Sender<DeliveryStatus>>,
    /// Monotonic send counter; the timed reset only fires if no newer send
    /// has started in the meantime.
    send_seq: Arc<AtomicU64>,
}

impl DeliveryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;
        let (status_tx, _) = watch::channel(DeliveryStatus::Idle);
        Ok(Self {
            http_client,
            config,
            status_tx: Arc::new(status_tx),
            send_seq: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Subscribe to status changes (for UI feedback).
    pub fn subscribe_status(&self) -> watch::Receiver<DeliveryStatus> {
        self.status_tx.subscribe()
    }

    /// Current status value.
    pub fn status(&self) -> DeliveryStatus {
        *self.status_tx.borrow()
    }

    /// Deliver one snapshot. Returns true on a 2xx response; any network
    /// error, timeout, or non-2xx status yields false with the failure
    /// detail logged and the status set to Error.
    pub async fn send(&self, snapshot: CodeSnapshot) -> bool {
        let seq = self.send_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_status(DeliveryStatus::Sending);

        let mut request = self.http_client.post(&self.config.endpoint).json(&snapshot);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-API-Key", key);
        }

        let success = match request.send().await {
            Ok(response) if response.status().is_success() => {
                debug!(
                    session_id = %snapshot.session_id,
                    bytes = snapshot.code.len(),
                    "Snapshot delivered"
                );
                true
            }
            Ok(response) => {
                error!(
                    session_id = %snapshot.session_id,
                    status = %response.status(),
                    "Snapshot delivery rejected"
                );
                false
            }
            Err(e) => {
                error!(session_id = %snapshot.session_id, error = %e, "Snapshot delivery failed");
                false
            }
        };

        self.set_status(if success {
            DeliveryStatus::Sent
        } else {
            DeliveryStatus::Error
        });
        self.schedule_status_reset(seq);
        success
    }

    fn set_status(&self, status: DeliveryStatus) {
        // Ignore send errors (no subscribers is OK)
        let _ = self.status_tx.send(status);
    }

    /// After the display interval, return to Idle unless a newer send has
    /// started since.
    fn schedule_status_reset(&self, seq: u64) {
        let status_tx = self.status_tx.clone();
        let send_seq = self.send_seq.clone();
        let interval = self.config.status_display_interval;
        tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            if send_seq.load(Ordering::SeqCst) == seq {
                let _ = status_tx.send(DeliveryStatus::Idle);
            }
        });
    }
}

#[async_trait]
impl SnapshotSink for DeliveryClient {
    async fn deliver(&self, snapshot: CodeSnapshot) -> bool {
        self.send(snapshot).await
    }
}
