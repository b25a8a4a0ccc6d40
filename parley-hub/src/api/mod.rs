//! HTTP API handlers for parley-hub

pub mod auth;
pub mod health;
pub mod report;
pub mod webhook;

pub use auth::require_api_key;
pub use health::health_routes;
pub use report::generate_report;
pub use webhook::{get_code_update, post_code_update};
