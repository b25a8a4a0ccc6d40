//! Session token generation
//!
//! Tokens are opaque strings of the form `session_<unix-millis>_<suffix>`,
//! unique with overwhelming probability. They scope one interview's
//! snapshots and report and are generated client-side.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random alphanumeric suffix.
const SUFFIX_LEN: usize = 9;

/// Generate a fresh session token.
pub fn generate() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("session_{millis}_{suffix}")
}
