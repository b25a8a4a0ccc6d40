//! Shared data types for session telemetry and report synthesis
//!
//! Wire field names are camelCase (the webhook and report consumers are
//! JavaScript clients); Rust fields stay snake_case via serde renames.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Criteria that must be present, with in-range scores, in every
/// synthesized evaluation report.
pub const REQUIRED_CRITERIA: [&str; 3] = ["CodingSkills", "Communication", "AlgorithmicThinking"];

/// Inclusive score bounds for a criterion grade.
pub const SCORE_MIN: u8 = 1;
pub const SCORE_MAX: u8 = 10;

/// The most recently delivered code state for a session.
///
/// `timestamp` is the client-supplied ISO-8601 instant and is informational
/// only: the store orders overwrites by arrival, not by this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnapshot {
    pub code: String,
    pub language: String,
    pub timestamp: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CodeSnapshot {
    /// Build a snapshot draft stamped with the current instant.
    pub fn now(
        code: impl Into<String>,
        language: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            session_id: session_id.into(),
            user_id: None,
        }
    }
}

/// Who spoke a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Interviewer,
    Candidate,
}

/// One ordered turn of the interview conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub speaker: Speaker,
    pub message: String,
}

/// Conversation transcript as delivered by the upstream voice provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub turns: Vec<TranscriptTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
}

/// Score and feedback for one evaluation criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionGrade {
    pub score: u8,
    pub feedback: String,
}

/// Fixed-enum hiring outcome attached to a synthesized report.
///
/// Generators are free text, so common spaced spellings are accepted as
/// aliases on input; output always uses the canonical variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(alias = "Strong Hire", alias = "strong hire")]
    StrongHire,
    #[serde(alias = "hire")]
    Hire,
    #[serde(alias = "maybe")]
    Maybe,
    #[serde(alias = "No Hire", alias = "no hire")]
    NoHire,
}

/// Structured evaluation record synthesized from one interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub summary: String,
    /// Criterion name → grade. BTreeMap keeps serialized output stable.
    pub grades: BTreeMap<String, CriterionGrade>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendation: Recommendation,
    pub recommendation_reasoning: String,
}

impl EvaluationReport {
    /// Validate the report invariants: every required criterion present,
    /// every score within [SCORE_MIN, SCORE_MAX].
    ///
    /// Out-of-range scores are an error, never clamped.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for criterion in REQUIRED_CRITERIA {
            match self.grades.get(criterion) {
                None => return Err(format!("missing required criterion '{criterion}'")),
                Some(grade) if grade.score < SCORE_MIN || grade.score > SCORE_MAX => {
                    return Err(format!(
                        "criterion '{}' score {} outside range {}..={}",
                        criterion, grade.score, SCORE_MIN, SCORE_MAX
                    ));
                }
                Some(_) => {}
            }
        }
        // Extra criteria are tolerated but must still be in range.
        for (name, grade) in &self.grades {
            if grade.score < SCORE_MIN || grade.score > SCORE_MAX {
                return Err(format!(
                    "criterion '{}' score {} outside range {}..={}",
                    name, grade.score, SCORE_MIN, SCORE_MAX
                ));
            }
        }
        Ok(())
    }
}
