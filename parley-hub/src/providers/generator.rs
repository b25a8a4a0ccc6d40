//! HTTP-backed report generator
//!
//! Single chat-completions call against an OpenAI-compatible endpoint.
//! The returned text is free-form; extraction happens in the synthesis
//! pipeline, not here.

use async_trait::async_trait;
use parley_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ReportGenerator;

const PROVIDER: &str = "generator";

/// Configuration for the generation client.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GeneratorConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Chat-completions generation client
pub struct ChatCompletionsGenerator {
    http_client: reqwest::Client,
    config: GeneratorConfig,
}

impl ChatCompletionsGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl ReportGenerator for ChatCompletionsGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = CompletionRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            // Low temperature: we want schema adherence, not creativity.
            temperature: 0.3,
        };

        tracing::debug!(model = %self.config.model, prompt_chars = prompt.len(), "Requesting completion");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
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

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream(PROVIDER, format!("invalid response body: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::upstream(PROVIDER, "completion returned no choices"))
    }
}
