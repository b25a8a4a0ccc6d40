//! HTTP-backed transcript provider
//!
//! Talks to a conversational-voice API (ElevenLabs ConvAI wire shape):
//! list the agent's conversations, then fetch the most recent one's turns.

use async_trait::async_trait;
use parley_common::{Error, Result, Speaker, Transcript, TranscriptTurn};
use serde::Deserialize;
use std::time::Duration;

use super::TranscriptProvider;

const PROVIDER: &str = "transcript";

/// Configuration for the transcript client.
#[derive(Debug, Clone)]
pub struct TranscriptConfig {
    /// e.g. `https://api.elevenlabs.io/v1/convai`
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl TranscriptConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }
}

// Upstream wire types (only the fields we read).

#[derive(Debug, Deserialize)]
struct ConversationsPage {
    conversations: Vec<ConversationStub>,
}

#[derive(Debug, Deserialize)]
struct ConversationStub {
    conversation_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConversationDetail {
    #[serde(default)]
    pub(crate) transcript: Vec<UpstreamTurn>,
    pub(crate) analysis: Option<UpstreamAnalysis>,
    pub(crate) metadata: Option<UpstreamMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamTurn {
    pub(crate) role: String,
    pub(crate) message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamAnalysis {
    pub(crate) transcript_summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamMetadata {
    pub(crate) call_duration_secs: Option<u64>,
}

/// Transcript API client
pub struct ConvaiTranscriptClient {
    http_client: reqwest::Client,
    config: TranscriptConfig,
}

impl ConvaiTranscriptClient {
    pub fn new(config: TranscriptConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .header("xi-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| Error::upstream(PROVIDER, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::upstream(
                PROVIDER,
                format!("HTTP {status}: {detail}"),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| Error::upstream(PROVIDER, format!("invalid response body: {e}")))
    }
}

#[async_trait]
impl TranscriptProvider for ConvaiTranscriptClient {
    async fn fetch(&self, agent_id: &str) -> Result<Transcript> {
        let list_url = format!(
            "{}/conversations?agent_id={}",
            self.config.base_url, agent_id
        );
        let page: ConversationsPage = self.get_json(&list_url).await?;

        // Conversations are returned most-recent first.
        let conversation_id = page
            .conversations
            .first()
            .map(|c| c.conversation_id.clone())
            .ok_or_else(|| {
                Error::upstream(PROVIDER, format!("no conversations for agent {agent_id}"))
            })?;

        let detail_url = format!("{}/conversations/{}", self.config.base_url, conversation_id);
        let detail: ConversationDetail = self.get_json(&detail_url).await?;

        let transcript = convert_detail(detail);
        tracing::info!(
            agent_id = %agent_id,
            conversation_id = %conversation_id,
            turns = transcript.turns.len(),
            "Fetched conversation transcript"
        );
        Ok(transcript)
    }
}

/// Map the upstream conversation shape onto our transcript model.
///
/// Upstream role `agent` is the interviewer; anything else (normally
/// `user`) is treated as the candidate rather than failing the transcript.
/// Turns without message text are dropped.
pub(crate) fn convert_detail(detail: ConversationDetail) -> Transcript {
    let turns = detail
        .transcript
        .into_iter()
        .filter_map(|turn| {
            let message = turn.message?;
            let speaker = if turn.role == "agent" {
                Speaker::Interviewer
            } else {
                Speaker::Candidate
            };
            Some(TranscriptTurn { speaker, message })
        })
        .collect();

    Transcript {
        turns,
        summary: detail.analysis.and_then(|a| a.transcript_summary),
        duration_seconds: detail.metadata.and_then(|m| m.call_duration_secs),
    }
}
