//! Evaluation report extraction from free-form generator output
//!
//! The generator is instructed to return only a JSON object, but it is free
//! text and may ignore that. Extraction is therefore a two-stage parser
//! with a typed failure mode:
//!
//! 1. If the whole response is wrapped in a markdown code fence, strip it.
//! 2. Otherwise take the span from the first `{` to the last `}` as the
//!    candidate object.
//!
//! The candidate is then parsed and validated against the report
//! invariants. Any failure is a `Parse` error carrying a bounded preview of
//! the raw response — never a silently coerced default report.

use parley_common::{Error, EvaluationReport, Result};

/// Extract and validate an [`EvaluationReport`] from raw generator output.
pub fn extract_report(raw: &str) -> Result<EvaluationReport> {
    let trimmed = raw.trim();
    let candidate = strip_fence(trimmed).unwrap_or(trimmed);

    let span = brace_span(candidate)
        .ok_or_else(|| Error::parse_failure("no JSON object found in response", raw))?;

    let report: EvaluationReport = serde_json::from_str(span)
        .map_err(|e| Error::parse_failure(format!("response is not a valid report: {e}"), raw))?;

    report
        .validate()
        .map_err(|detail| Error::parse_failure(detail, raw))?;

    Ok(report)
}

/// If the entire text is one fenced block (```` ``` ```` or ```` ```json ````),
/// return its inner content. Returns None when the text is not wholly fenced;
/// partial fences are left for the brace scan.
fn strip_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let body = rest.strip_suffix("```")?;
    // Drop the info string ("json", "JSON", ...) on the opening line.
    let inner = match body.find('\n') {
        Some(idx) => &body[idx + 1..],
        None => body,
    };
    Some(inner.trim())
}

/// Bounded brace scan: the span from the first `{` to the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_common::Recommendation;

    const VALID_REPORT: &str = r#"{
        "summary": "Solid performance on a medium problem.",
        "grades": {
            "CodingSkills": {"score": 7, "feedback": "Clean, working code."},
            "Communication": {"score": 8, "feedback": "Narrated the approach well."},
            "AlgorithmicThinking": {"score": 6, "feedback": "Found O(n) after a hint."}
        },
        "strengths": ["Readable code", "Good test instincts"],
        "areasForImprovement": ["Edge-case analysis"],
        "recommendation": "Hire",
        "recommendationReasoning": "Consistent, hire-level signal."
    }"#;

    #[test]
    fn extracts_pure_json() {
        let report = extract_report(VALID_REPORT).unwrap();
        assert_eq!(report.recommendation, Recommendation::Hire);
        assert_eq!(report.grades["CodingSkills"].score, 7);
    }

    #[test]
    fn extracts_fenced_json() {
        let fenced = format!("```json\n{VALID_REPORT}\n```");
        let report = extract_report(&fenced).unwrap();
        assert_eq!(report.recommendation, Recommendation::Hire);
    }

    #[test]
    fn extracts_fenced_json_without_info_string() {
        let fenced = format!("```\n{VALID_REPORT}\n```");
        assert!(extract_report(&fenced).is_ok());
    }

    #[test]
    fn extracts_json_surrounded_by_prose() {
        let wrapped = format!(
            "Sure! Here is the evaluation you asked for:\n\n{VALID_REPORT}\n\nLet me know if you need anything else."
        );
        let report = extract_report(&wrapped).unwrap();
        assert_eq!(report.strengths.len(), 2);
    }

    #[test]
    fn missing_criterion_is_parse_error() {
        let partial = VALID_REPORT.replace("AlgorithmicThinking", "SomethingElse");
        let err = extract_report(&partial).unwrap_err();
        match err {
            Error::Parse { detail, .. } => assert!(detail.contains("AlgorithmicThinking")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_scores_are_parse_errors_not_clamped() {
        for bad in ["0", "11"] {
            let mutated = VALID_REPORT.replace("\"score\": 7", &format!("\"score\": {bad}"));
            let err = extract_report(&mutated).unwrap_err();
            assert!(matches!(err, Error::Parse { .. }), "score {bad} must fail");
        }
    }

    #[test]
    fn response_without_braces_is_parse_error() {
        let err = extract_report("I could not produce an evaluation, sorry.").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn reversed_braces_are_parse_error() {
        let err = extract_report("} nothing here {").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn parse_error_preserves_raw_preview() {
        let raw = "The candidate did { not finish } anything parseable";
        let err = extract_report(raw).unwrap_err();
        match err {
            Error::Parse { preview, .. } => assert_eq!(preview, raw),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn fence_with_no_object_is_parse_error() {
        let err = extract_report("```\njust words\n```").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
