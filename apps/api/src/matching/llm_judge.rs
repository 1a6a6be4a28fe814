//! LlmTextJudge: the production `TextJudge`, backed by `LlmClient`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::llm_client::prompts::{fill, json_system};
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::judge::{coerce_score, Compatibility, JudgeError, TextJudge};
use crate::matching::prompts::{
    COMPATIBILITY_PREAMBLE, COMPATIBILITY_PROMPT, EXTRACT_SKILLS_PREAMBLE, EXTRACT_SKILLS_PROMPT,
    SIMILAR_JOBS_PREAMBLE, SIMILAR_JOBS_PROMPT,
};

#[derive(Debug, Deserialize)]
struct SkillsOutput {
    skills: Vec<String>,
}

/// The score stays a raw JSON value so numeric strings can be coerced.
#[derive(Debug, Deserialize)]
struct CompatibilityOutput {
    score: serde_json::Value,
    reasoning: String,
}

#[derive(Debug, Deserialize)]
struct SimilarJobsOutput {
    similar_jobs: Vec<String>,
}

pub struct LlmTextJudge {
    llm: LlmClient,
}

impl LlmTextJudge {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

impl From<LlmError> for JudgeError {
    fn from(err: LlmError) -> Self {
        if err.is_malformed_output() {
            JudgeError::MalformedOutput(err.to_string())
        } else {
            JudgeError::Unavailable(err.to_string())
        }
    }
}

#[async_trait]
impl TextJudge for LlmTextJudge {
    async fn extract_skills(&self, text: &str) -> Result<Vec<String>, JudgeError> {
        let prompt = fill(EXTRACT_SKILLS_PROMPT, &[("text", text)]);
        let output: SkillsOutput = self
            .llm
            .call_json(&prompt, &json_system(EXTRACT_SKILLS_PREAMBLE))
            .await?;
        debug!("Extracted {} skills", output.skills.len());
        Ok(output.skills)
    }

    async fn score_compatibility(
        &self,
        job_text: &str,
        profile_text: &str,
    ) -> Result<Compatibility, JudgeError> {
        let prompt = fill(
            COMPATIBILITY_PROMPT,
            &[("job", job_text), ("profile", profile_text)],
        );
        let output: CompatibilityOutput = self
            .llm
            .call_json(&prompt, &json_system(COMPATIBILITY_PREAMBLE))
            .await?;
        Ok(Compatibility {
            score: coerce_score(&output.score)?,
            reasoning: output.reasoning,
        })
    }

    async fn propose_similar(
        &self,
        target_text: &str,
        profile_text: &str,
        listing_text: &str,
    ) -> Result<Vec<String>, JudgeError> {
        let prompt = fill(
            SIMILAR_JOBS_PROMPT,
            &[
                ("target", target_text),
                ("profile", profile_text),
                ("listing", listing_text),
            ],
        );
        let output: SimilarJobsOutput = self
            .llm
            .call_json(&prompt, &json_system(SIMILAR_JOBS_PREAMBLE))
            .await?;
        Ok(output.similar_jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_parse_error_is_malformed_output() {
        let parse_err = serde_json::from_str::<SkillsOutput>("not json").unwrap_err();
        let err: JudgeError = LlmError::Parse(parse_err).into();
        assert!(matches!(err, JudgeError::MalformedOutput(_)));
    }

    #[test]
    fn test_llm_api_error_is_unavailable() {
        let err: JudgeError = LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        }
        .into();
        assert!(matches!(err, JudgeError::Unavailable(_)));
    }

    #[test]
    fn test_compatibility_output_accepts_string_score() {
        let output: CompatibilityOutput =
            serde_json::from_str(r#"{"score": "0.6", "reasoning": "Knows SQL"}"#).unwrap();
        assert_eq!(coerce_score(&output.score).unwrap(), 0.6);
    }

    #[test]
    fn test_similar_jobs_output_shape() {
        let output: SimilarJobsOutput = serde_json::from_str(
            r#"{"similar_jobs": ["Job ID: 3, Title: X", "no id here"]}"#,
        )
        .unwrap();
        assert_eq!(output.similar_jobs.len(), 2);
    }

    #[test]
    fn test_compatibility_prompt_keeps_job_text_literal() {
        let prompt = fill(
            COMPATIBILITY_PROMPT,
            &[
                ("job", "Write {profile} templates"),
                ("profile", "APPLICANT-PROFILE"),
            ],
        );
        assert!(prompt.contains("Write {profile} templates"));
        assert_eq!(prompt.matches("APPLICANT-PROFILE").count(), 1);
    }

    #[test]
    fn test_similar_jobs_prompt_lists_each_job_once() {
        let listing = "Job ID: 9, Title: Data Engineer, Description: Spark";
        let prompt = fill(
            SIMILAR_JOBS_PROMPT,
            &[
                ("target", "Analytics lead, see {listing}"),
                ("profile", "SQL"),
                ("listing", listing),
            ],
        );
        assert_eq!(prompt.matches("Job ID: 9").count(), 1);
    }
}
