//! Telemetry debouncer
//!
//! Coalesces a rapid stream of "code changed" events into one delivery per
//! quiescence window. Each `notify` stores the draft as latest, cancels any
//! outstanding timer, and schedules a fresh one; when the timer fires, the
//! most recent draft is handed to the sink exactly once.
//!
//! The timer is an explicit tokio task with abort-based
//! cancel-and-reschedule, independent of any UI framework lifecycle. There
//! is no delivery durability: dropping the debouncer aborts a pending
//! delivery.

use async_trait::async_trait;
use parley_common::CodeSnapshot;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Consumer of debounced snapshots. [`crate::DeliveryClient`] is the real
/// one; tests substitute recorders.
#[async_trait]
pub trait SnapshotSink: Send + Sync + 'static {
    /// Deliver a snapshot; returns whether delivery succeeded. Failures
    /// are the sink's to report, the debouncer does not retry.
    async fn deliver(&self, snapshot: CodeSnapshot) -> bool;
}

pub struct TelemetryDebouncer {
    sink: Arc<dyn SnapshotSink>,
    window: Duration,
    latest: Arc<Mutex<Option<CodeSnapshot>>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl TelemetryDebouncer {
    /// Must be created (and notified) within a tokio runtime.
    pub fn new(sink: Arc<dyn SnapshotSink>, window: Duration) -> Self {
        Self {
            sink,
            window,
            latest: Arc::new(Mutex::new(None)),
            pending: Mutex::new(None),
        }
    }

    /// Record an edit. Resets the quiescence timer; the sink sees only the
    /// draft from the last call in a burst.
    pub fn notify(&self, draft: CodeSnapshot) {
        *self.latest.lock().unwrap() = Some(draft);

        let mut pending = self.pending.lock().unwrap();
        if let Some(old) = pending.take() {
            old.abort();
        }

        let latest = self.latest.clone();
        let sink = self.sink.clone();
        let window = self.window;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Take, don't clone: the draft must be delivered exactly once.
            let snapshot = latest.lock().unwrap().take();
            if let Some(snapshot) = snapshot {
                let delivered = sink.deliver(snapshot).await;
                if !delivered {
                    tracing::warn!("Debounced snapshot delivery failed; next edit will retry");
                }
            }
        }));
    }

    /// Whether a delivery is currently scheduled.
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for TelemetryDebouncer {
    fn drop(&mut self) {
        // Pending deliveries are lost on teardown, by design.
        if let Some(handle) = self.pending.lock().unwrap().take() {
            handle.abort();
        }
    }
}
