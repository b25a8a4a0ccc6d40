//! Composite context and prompt construction for report generation

use crate::store::StoredSnapshot;
use parley_common::{Speaker, Transcript, REQUIRED_CRITERIA, SCORE_MAX, SCORE_MIN};

/// Delimiters for the optional code section appended to the transcript.
const CODE_SECTION_BEGIN: &str = "--- CANDIDATE CODE";
const CODE_SECTION_END: &str = "--- END CANDIDATE CODE ---";

/// Build the composite context string: the conversation, optionally
/// followed by a clearly delimited section with the candidate's latest
/// code. Snapshot absence simply omits the code section.
pub fn build_context(transcript: &Transcript, snapshot: Option<&StoredSnapshot>) -> String {
    let mut context = String::new();

    for turn in &transcript.turns {
        let speaker = match turn.speaker {
            Speaker::Interviewer => "Interviewer",
            Speaker::Candidate => "Candidate",
        };
        context.push_str(speaker);
        context.push_str(": ");
        context.push_str(&turn.message);
        context.push('\n');
    }

    if let Some(stored) = snapshot {
        context.push('\n');
        context.push_str(&format!(
            "{} ({}) ---\n{}\n{}\n",
            CODE_SECTION_BEGIN, stored.snapshot.language, stored.snapshot.code, CODE_SECTION_END
        ));
    }

    context
}

/// Build the generation prompt around a composite context.
///
/// The instructions pin the exact JSON schema and forbid surrounding prose
/// or code fences; extraction still treats the response as adversarial.
pub fn build_prompt(context: &str) -> String {
    let criteria = REQUIRED_CRITERIA.join(", ");
    format!(
        "You are evaluating a technical interview. Below is the interview \
conversation{maybe_code} between an interviewer and a candidate.\n\
\n\
{context}\n\
\n\
Produce an evaluation with:\n\
- a short overall summary\n\
- a grade for each of these criteria: {criteria} \
(integer score {min}-{max} plus one sentence of feedback each)\n\
- a list of strengths\n\
- a list of areas for improvement\n\
- a hiring recommendation: one of \"StrongHire\", \"Hire\", \"Maybe\", \"NoHire\"\n\
- the reasoning behind that recommendation\n\
\n\
Respond with ONLY a JSON object in exactly this shape, with no surrounding \
prose and no markdown code fences:\n\
{{\"summary\": \"...\", \
\"grades\": {{\"CodingSkills\": {{\"score\": 1, \"feedback\": \"...\"}}, \
\"Communication\": {{\"score\": 1, \"feedback\": \"...\"}}, \
\"AlgorithmicThinking\": {{\"score\": 1, \"feedback\": \"...\"}}}}, \
\"strengths\": [\"...\"], \
\"areasForImprovement\": [\"...\"], \
\"recommendation\": \"Hire\", \
\"recommendationReasoning\": \"...\"}}",
        maybe_code = if context.contains(CODE_SECTION_BEGIN) {
            " and the candidate's final code"
        } else {
            ""
        },
        min = SCORE_MIN,
        max = SCORE_MAX,
    )
}
