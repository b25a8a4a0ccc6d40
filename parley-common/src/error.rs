//! Common error types for Parley

use thiserror::Error;

/// Maximum number of characters of raw generator output preserved in a
/// [`Error::Parse`] diagnostic preview.
pub const PARSE_PREVIEW_CHARS: usize = 500;

/// Common result type for Parley operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Parley services
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing request fields (surfaced as 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad or missing API key (surfaced as 401)
    #[error("Auth error: {0}")]
    Auth(String),

    /// Requested session not found (surfaced as 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transcript or generation provider failure (surfaced as 502)
    #[error("Upstream error from {provider}: {detail}")]
    Upstream { provider: String, detail: String },

    /// Generator response could not be reduced to a valid report.
    /// Carries a bounded preview of the raw response for diagnostics;
    /// callers must surface it, never swallow it.
    #[error("Parse error: {detail}")]
    Parse { detail: String, preview: String },

    /// HTTP server errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a [`Error::Parse`] from a failure detail and the raw generator
    /// response, truncating the preview to [`PARSE_PREVIEW_CHARS`].
    pub fn parse_failure(detail: impl Into<String>, raw: &str) -> Self {
        Error::Parse {
            detail: detail.into(),
            preview: truncate_chars(raw, PARSE_PREVIEW_CHARS),
        }
    }

    /// Build an [`Error::Upstream`] for a named provider.
    pub fn upstream(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::Upstream {
            provider: provider.into(),
            detail: detail.into(),
        }
    }
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
