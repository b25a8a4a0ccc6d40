//! # Parley Common Library
//!
//! Shared code for the Parley interview-assistant services including:
//! - Snapshot and transcript data types
//! - Evaluation report schema and validation
//! - Common error taxonomy
//! - Session token generation

pub mod error;
pub mod session_id;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    CodeSnapshot, CriterionGrade, EvaluationReport, Recommendation, Speaker, Transcript,
    TranscriptTurn, REQUIRED_CRITERIA, SCORE_MAX, SCORE_MIN,
};
