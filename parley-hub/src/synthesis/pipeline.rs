//! Report synthesis pipeline
//!
//! Stage progression:
//! FetchingSnapshot → FetchingTranscript → Synthesizing → {Done | Failed}
//!
//! Stages execute sequentially and block on each upstream call. Snapshot
//! absence is tolerated (the report just loses code context); transcript
//! failure is fatal. A failed stage aborts the pipeline with the typed
//! error from that stage; nothing is retried here.

use std::fmt;
use std::sync::Arc;

use crate::providers::{ReportGenerator, TranscriptProvider};
use crate::store::SessionStore;
use crate::synthesis::{extract, prompt};
use parley_common::{EvaluationReport, Result};

/// Pipeline stage, used for logging and failure diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisStage {
    FetchingSnapshot,
    FetchingTranscript,
    Synthesizing,
}

impl fmt::Display for SynthesisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SynthesisStage::FetchingSnapshot => "fetching_snapshot",
            SynthesisStage::FetchingTranscript => "fetching_transcript",
            SynthesisStage::Synthesizing => "synthesizing",
        };
        f.write_str(name)
    }
}

/// Orchestrates snapshot lookup, transcript fetch, generation, and
/// extraction into one validated evaluation report.
pub struct ReportSynthesizer {
    store: Arc<dyn SessionStore>,
    transcript_provider: Arc<dyn TranscriptProvider>,
    generator: Arc<dyn ReportGenerator>,
}

impl ReportSynthesizer {
    pub fn new(
        store: Arc<dyn SessionStore>,
        transcript_provider: Arc<dyn TranscriptProvider>,
        generator: Arc<dyn ReportGenerator>,
    ) -> Self {
        Self {
            store,
            transcript_provider,
            generator,
        }
    }

    /// Run the full pipeline for one finished interview.
    pub async fn synthesize(&self, session_id: &str, agent_id: &str) -> Result<EvaluationReport> {
        tracing::info!(
            session_id = %session_id,
            agent_id = %agent_id,
            stage = %SynthesisStage::FetchingSnapshot,
            "Starting report synthesis"
        );
        let snapshot = self.store.get(session_id).await;
        if snapshot.is_none() {
            // Tolerated: the interview may have had no code component.
            tracing::info!(session_id = %session_id, "No code snapshot for session, proceeding without code context");
        }

        tracing::debug!(stage = %SynthesisStage::FetchingTranscript, agent_id = %agent_id, "Fetching transcript");
        let transcript = self
            .transcript_provider
            .fetch(agent_id)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    stage = %SynthesisStage::FetchingTranscript,
                    error = %e,
                    "Transcript fetch failed, aborting synthesis"
                );
            })?;

        tracing::debug!(
            stage = %SynthesisStage::Synthesizing,
            turns = transcript.turns.len(),
            has_code = snapshot.is_some(),
            "Invoking report generator"
        );
        let context = prompt::build_context(&transcript, snapshot.as_ref());
        let generation_prompt = prompt::build_prompt(&context);
        let raw = self
            .generator
            .complete(&generation_prompt)
            .await
            .inspect_err(|e| {
                tracing::error!(stage = %SynthesisStage::Synthesizing, error = %e, "Generation failed");
            })?;

        let report = extract::extract_report(&raw).inspect_err(|e| {
            tracing::error!(
                stage = %SynthesisStage::Synthesizing,
                error = %e,
                "Generator response did not yield a valid report"
            );
        })?;

        tracing::info!(
            session_id = %session_id,
            recommendation = ?report.recommendation,
            "Report synthesis complete"
        );
        Ok(report)
    }
}
