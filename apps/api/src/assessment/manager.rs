//! Assessment Manager: runs the technical, personality and communication
//! assessments for one applicant.
//!
//! The technical assessment only runs when the applicant's input contains a
//! fenced code block with a language tag. The other two always run on the
//! conversation history.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::info;

use crate::assessment::assessor::{AssessmentError, Assessor};
use crate::assessment::models::{ApplicantAssessments, CodeBlock};

fn code_block_regex() -> &'static Regex {
    static CODE_BLOCK: OnceLock<Regex> = OnceLock::new();
    CODE_BLOCK.get_or_init(|| {
        Regex::new(r"```(\w+)\r?\n([\s\S]+?)\r?\n```").expect("Invalid code block regex pattern")
    })
}

/// Finds the first fenced code block with a language tag.
pub fn extract_code_block(text: &str) -> Option<CodeBlock> {
    let caps = code_block_regex().captures(text)?;
    Some(CodeBlock {
        language: caps.get(1)?.as_str().to_string(),
        code: caps.get(2)?.as_str().to_string(),
    })
}

#[derive(Clone)]
pub struct AssessmentManager {
    assessor: Arc<dyn Assessor>,
}

impl AssessmentManager {
    pub fn new(assessor: Arc<dyn Assessor>) -> Self {
        Self { assessor }
    }

    pub fn assessor(&self) -> &dyn Assessor {
        self.assessor.as_ref()
    }

    pub async fn run_assessments(
        &self,
        user_input: &str,
        history: &str,
    ) -> Result<ApplicantAssessments, AssessmentError> {
        if history.trim().is_empty() {
            return Err(AssessmentError::EmptyInput("conversation history is empty"));
        }

        let technical = match extract_code_block(user_input) {
            Some(block) => Some(
                self.assessor
                    .evaluate_code(&block.code, &block.language)
                    .await?,
            ),
            None => None,
        };

        let personality = self.assessor.evaluate_personality(history).await?;
        let communication = self.assessor.evaluate_communication(history).await?;

        info!(
            "Assessments complete: technical={}, traits={}",
            technical.is_some(),
            personality.traits.len()
        );

        Ok(ApplicantAssessments {
            technical,
            personality: Some(personality),
            communication: Some(communication),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::models::{
        CommunicationAssessment, PersonalityAssessment, TechnicalAssessment,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct StubAssessor {
        code_calls: AtomicUsize,
    }

    #[async_trait]
    impl Assessor for StubAssessor {
        async fn evaluate_code(
            &self,
            code: &str,
            language: &str,
        ) -> Result<TechnicalAssessment, AssessmentError> {
            self.code_calls.fetch_add(1, Ordering::SeqCst);
            Ok(TechnicalAssessment {
                language: language.to_string(),
                score: code.lines().count() as i64,
                assessment: "Readable.".to_string(),
            })
        }

        async fn generate_coding_question(
            &self,
            _job_details: &str,
            difficulty: &str,
        ) -> Result<String, AssessmentError> {
            Ok(format!("A {difficulty} question"))
        }

        async fn evaluate_personality(
            &self,
            _history: &str,
        ) -> Result<PersonalityAssessment, AssessmentError> {
            Ok(PersonalityAssessment {
                traits: vec!["curious".to_string()],
                assessment: "Curious.".to_string(),
            })
        }

        async fn evaluate_communication(
            &self,
            _history: &str,
        ) -> Result<CommunicationAssessment, AssessmentError> {
            Ok(CommunicationAssessment {
                clarity: 7,
                coherence: 8,
                assessment: "Clear.".to_string(),
            })
        }
    }

    #[test]
    fn test_extract_code_block() {
        let block = extract_code_block("Here you go:\n```python\ndef f(x):\n    return x\n```\nthanks")
            .unwrap();
        assert_eq!(block.language, "python");
        assert_eq!(block.code, "def f(x):\n    return x");
    }

    #[test]
    fn test_extract_code_block_requires_language_tag() {
        assert!(extract_code_block("```\nprint(1)\n```").is_none());
        assert!(extract_code_block("no code at all").is_none());
    }

    #[tokio::test]
    async fn test_technical_runs_only_with_code_block() {
        let stub = Arc::new(StubAssessor::default());
        let manager = AssessmentManager::new(stub.clone());

        let without = manager
            .run_assessments("I like Rust", "Applicant: I like Rust")
            .await
            .unwrap();
        assert!(without.technical.is_none());
        assert!(without.personality.is_some());
        assert!(without.communication.is_some());
        assert_eq!(stub.code_calls.load(Ordering::SeqCst), 0);

        let with = manager
            .run_assessments("```rust\nfn main() {}\n```", "Applicant: see code")
            .await
            .unwrap();
        let technical = with.technical.unwrap();
        assert_eq!(technical.language, "rust");
        assert_eq!(stub.code_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_history_is_rejected() {
        let manager = AssessmentManager::new(Arc::new(StubAssessor::default()));
        let err = manager.run_assessments("hello", "  ").await.unwrap_err();
        assert!(matches!(err, AssessmentError::EmptyInput(_)));
    }
}
