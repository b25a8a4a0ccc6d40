//! Report synthesis: pipeline, prompt construction, response extraction

pub mod extract;
pub mod pipeline;
pub mod prompt;

pub use extract::extract_report;
pub use pipeline::{ReportSynthesizer, SynthesisStage};
