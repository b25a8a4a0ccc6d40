//! External collaborator seams for report synthesis
//!
//! The synthesis pipeline only sees these traits; the HTTP-backed clients
//! live in the submodules and any test can substitute its own impls.

pub mod generator;
pub mod transcript;

use async_trait::async_trait;
use parley_common::{Result, Transcript};

pub use generator::{ChatCompletionsGenerator, GeneratorConfig};
pub use transcript::{ConvaiTranscriptClient, TranscriptConfig};

/// Source of the interview conversation transcript.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the transcript of the most recent conversation held by the
    /// given voice agent. Any non-success upstream response is an
    /// [`parley_common::Error::Upstream`].
    async fn fetch(&self, agent_id: &str) -> Result<Transcript>;
}

/// Opaque natural-language completion call.
///
/// Nothing is guaranteed about the returned text beyond "likely contains a
/// JSON object somewhere" — extraction and validation happen downstream.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
