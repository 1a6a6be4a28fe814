//! TextJudge: the capability the matcher delegates all model judgment to.
//!
//! `JobMatcher` holds an `Arc<dyn TextJudge>`, so the matcher never sees
//! prompts, vendors or wire formats. `LlmTextJudge` is the production adapter;
//! tests inject stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of the external judgment service. Never retried, never defaulted.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("text judge unavailable: {0}")]
    Unavailable(String),

    #[error("text judge returned malformed output: {0}")]
    MalformedOutput(String),

    #[error("compatibility score is not a number: {raw:?}")]
    ScoreCoercion { raw: String },
}

/// Compatibility verdict for one job/applicant pair.
/// `score` is model output: nominally 0.0 – 1.0 but never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compatibility {
    pub score: f64,
    pub reasoning: String,
}

#[async_trait]
pub trait TextJudge: Send + Sync {
    /// Extracts the skills mentioned in `text`.
    async fn extract_skills(&self, text: &str) -> Result<Vec<String>, JudgeError>;

    /// Judges how well an applicant profile fits a job.
    async fn score_compatibility(
        &self,
        job_text: &str,
        profile_text: &str,
    ) -> Result<Compatibility, JudgeError>;

    /// Proposes jobs from `listing_text` similar to the target, one free-text line each.
    async fn propose_similar(
        &self,
        target_text: &str,
        profile_text: &str,
        listing_text: &str,
    ) -> Result<Vec<String>, JudgeError>;
}

/// Coerces an untrusted score value into a finite float.
///
/// Accepts JSON numbers and numeric strings (`"0.8"`, `" 0.8 "`). Anything
/// else, including NaN and infinities, is a `ScoreCoercion` error.
pub fn coerce_score(raw: &serde_json::Value) -> Result<f64, JudgeError> {
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(score) if score.is_finite() => Ok(score),
        _ => Err(JudgeError::ScoreCoercion {
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_score(&json!(0.75)).unwrap(), 0.75);
        assert_eq!(coerce_score(&json!(1)).unwrap(), 1.0);
    }

    #[test]
    fn test_coerce_numeric_string() {
        assert_eq!(coerce_score(&json!(" 0.4 ")).unwrap(), 0.4);
    }

    #[test]
    fn test_coerce_keeps_out_of_range_values() {
        assert_eq!(coerce_score(&json!(85)).unwrap(), 85.0);
        assert_eq!(coerce_score(&json!("-0.2")).unwrap(), -0.2);
    }

    #[test]
    fn test_coerce_rejects_words() {
        let err = coerce_score(&json!("high")).unwrap_err();
        assert!(matches!(err, JudgeError::ScoreCoercion { .. }));
    }

    #[test]
    fn test_coerce_rejects_non_finite_and_null() {
        assert!(coerce_score(&json!("NaN")).is_err());
        assert!(coerce_score(&json!("inf")).is_err());
        assert!(coerce_score(&serde_json::Value::Null).is_err());
    }
}
