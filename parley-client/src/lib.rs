//! # Parley Client Library
//!
//! Client-side telemetry for the interview assistant:
//! - Session token generation and caching ([`SessionIdentity`])
//! - Edit-burst coalescing ([`TelemetryDebouncer`])
//! - Best-effort snapshot delivery with observable status
//!   ([`DeliveryClient`])
//!
//! Delivery is an autosave signal, not a durable channel: a pending
//! debounced delivery is lost when the debouncer is dropped, and a failed
//! send is simply dropped (the next edit-triggered delivery is the de facto
//! retry).

pub mod config;
pub mod debounce;
pub mod delivery;
pub mod session;

pub use config::ClientConfig;
pub use debounce::{SnapshotSink, TelemetryDebouncer};
pub use delivery::{DeliveryClient, DeliveryStatus};
pub use session::SessionIdentity;
