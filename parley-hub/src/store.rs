//! Session snapshot store
//!
//! Maps session id → latest code snapshot. The store is an injected trait
//! so a future multi-instance deployment can substitute a shared,
//! ordering-aware backend without touching callers.
//!
//! The bundled [`MemoryStore`] is process-local: entries live for the
//! process lifetime only, with no eviction. That is an accepted limitation
//! for a single-instance deployment and is unsafe behind multiple stateless
//! instances, where sessions would silently fragment across backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parley_common::CodeSnapshot;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A snapshot as held by the store: the client-supplied fields plus the
/// server-observed arrival time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSnapshot {
    #[serde(flatten)]
    pub snapshot: CodeSnapshot,
    /// Server clock at arrival, distinct from the client-supplied
    /// `timestamp` inside the snapshot.
    pub last_updated: DateTime<Utc>,
}

/// Storage seam for session snapshots.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Unconditionally overwrite the entry for the snapshot's session id,
    /// stamping `last_updated` from the server clock.
    ///
    /// Last `put` wins by arrival order at the store, NOT by the
    /// client-supplied `timestamp`. A network-delayed older edit can
    /// therefore overwrite a newer one; acceptable for a single-process
    /// deployment, and the reason an ordering-aware store must replace
    /// this one behind multiple instances.
    async fn put(&self, snapshot: CodeSnapshot) -> StoredSnapshot;

    /// Point lookup of the current snapshot for a session.
    async fn get(&self, session_id: &str) -> Option<StoredSnapshot>;

    /// All known session ids, for diagnostics.
    async fn list(&self) -> Vec<String>;
}

/// In-memory session store (RwLock for concurrent reads, rare writes).
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn put(&self, snapshot: CodeSnapshot) -> StoredSnapshot {
        let stored = StoredSnapshot {
            last_updated: Utc::now(),
            snapshot,
        };
        let mut entries = self.entries.write().await;
        entries.insert(stored.snapshot.session_id.clone(), stored.clone());
        tracing::debug!(
            session_id = %stored.snapshot.session_id,
            language = %stored.snapshot.language,
            bytes = stored.snapshot.code.len(),
            "Stored code snapshot"
        );
        stored
    }

    async fn get(&self, session_id: &str) -> Option<StoredSnapshot> {
        self.entries.read().await.get(session_id).cloned()
    }

    async fn list(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }
}
