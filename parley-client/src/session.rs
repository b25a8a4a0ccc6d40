//! Session identity
//!
//! Generates the opaque session token on first use and caches it for the
//! lifetime of this instance (the Rust analogue of a browser tab). The
//! token is never regenerated unless explicitly cleared.

use parley_common::session_id;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct SessionIdentity {
    cached: Mutex<Option<String>>,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session token, generating and caching it on first call.
    pub fn get(&self) -> String {
        let mut cached = self.cached.lock().unwrap();
        match cached.as_ref() {
            Some(token) => token.clone(),
            None => {
                let token = session_id::generate();
                tracing::debug!(session_id = %token, "Generated new session token");
                *cached = Some(token.clone());
                token
            }
        }
    }

    /// The cached token, if one has been generated.
    pub fn current(&self) -> Option<String> {
        self.cached.lock().unwrap().clone()
    }

    /// Drop the cached token; the next `get` starts a fresh session.
    pub fn clear(&self) {
        *self.cached.lock().unwrap() = None;
    }
}
