//! Assessor: pluggable, trait-based LLM judgments about an applicant.
//!
//! `AssessmentManager` holds an `Arc<dyn Assessor>`; `LlmAssessor` is the
//! production backend.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::assessment::models::{
    CommunicationAssessment, PersonalityAssessment, TechnicalAssessment,
};
use crate::assessment::prompts::{
    CODE_PREAMBLE, CODE_PROMPT, COMMUNICATION_PREAMBLE, COMMUNICATION_PROMPT,
    PERSONALITY_PREAMBLE, PERSONALITY_PROMPT, QUESTION_PREAMBLE, QUESTION_PROMPT,
};
use crate::llm_client::prompts::{fill, json_system};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("nothing to assess: {0}")]
    EmptyInput(&'static str),
}

#[async_trait]
pub trait Assessor: Send + Sync {
    async fn evaluate_code(
        &self,
        code: &str,
        language: &str,
    ) -> Result<TechnicalAssessment, AssessmentError>;

    async fn generate_coding_question(
        &self,
        job_details: &str,
        difficulty: &str,
    ) -> Result<String, AssessmentError>;

    async fn evaluate_personality(
        &self,
        history: &str,
    ) -> Result<PersonalityAssessment, AssessmentError>;

    async fn evaluate_communication(
        &self,
        history: &str,
    ) -> Result<CommunicationAssessment, AssessmentError>;
}

#[derive(Debug, Deserialize)]
struct CodeOutput {
    assessment: String,
    score: i64,
}

#[derive(Debug, Deserialize)]
struct QuestionOutput {
    question: String,
}

pub struct LlmAssessor {
    llm: LlmClient,
}

impl LlmAssessor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Assessor for LlmAssessor {
    async fn evaluate_code(
        &self,
        code: &str,
        language: &str,
    ) -> Result<TechnicalAssessment, AssessmentError> {
        if code.trim().is_empty() {
            return Err(AssessmentError::EmptyInput("code submission is empty"));
        }
        let prompt = fill(CODE_PROMPT, &[("language", language), ("code", code)]);
        let output: CodeOutput = self
            .llm
            .call_json(&prompt, &json_system(CODE_PREAMBLE))
            .await?;
        Ok(TechnicalAssessment {
            language: language.to_string(),
            score: output.score,
            assessment: output.assessment,
        })
    }

    async fn generate_coding_question(
        &self,
        job_details: &str,
        difficulty: &str,
    ) -> Result<String, AssessmentError> {
        let prompt = fill(
            QUESTION_PROMPT,
            &[("job_details", job_details), ("difficulty", difficulty)],
        );
        let output: QuestionOutput = self
            .llm
            .call_json(&prompt, &json_system(QUESTION_PREAMBLE))
            .await?;
        Ok(output.question)
    }

    async fn evaluate_personality(
        &self,
        history: &str,
    ) -> Result<PersonalityAssessment, AssessmentError> {
        let prompt = fill(PERSONALITY_PROMPT, &[("history", history)]);
        Ok(self
            .llm
            .call_json(&prompt, &json_system(PERSONALITY_PREAMBLE))
            .await?)
    }

    async fn evaluate_communication(
        &self,
        history: &str,
    ) -> Result<CommunicationAssessment, AssessmentError> {
        let prompt = fill(COMMUNICATION_PROMPT, &[("history", history)]);
        Ok(self
            .llm
            .call_json(&prompt, &json_system(COMMUNICATION_PREAMBLE))
            .await?)
    }
}
