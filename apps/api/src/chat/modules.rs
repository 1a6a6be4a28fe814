//! Chat modules. Each module decides whether it handles a message and, if so,
//! produces the assistant's reply. `Prescreener` asks them in order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::assessment::manager::extract_code_block;
use crate::chat::prompts::{
    CODE_REVIEW_PROMPT, CODE_REVIEW_SYSTEM, GENERAL_PROMPT, GENERAL_SYSTEM, PERSONALITY_PROMPT,
    PERSONALITY_SYSTEM,
};
use crate::llm_client::prompts::fill;
use crate::llm_client::{LlmClient, LlmError};

const PERSONALITY_TRIGGER: &str = "personality assessment";

/// Free-text reply generation, the only model capability the chat modules need.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl ReplyGenerator for LlmClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.call_text(prompt, system).await
    }
}

#[async_trait]
pub trait ChatModule: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means the module does not handle this message.
    async fn process(
        &self,
        history: &str,
        user_input: &str,
        job_details: &str,
    ) -> Result<Option<String>, LlmError>;
}

pub fn wants_personality_assessment(user_input: &str) -> bool {
    user_input.to_lowercase().contains(PERSONALITY_TRIGGER)
}

/// Reviews a fenced code block pasted into the chat.
pub struct CodeAssessmentModule {
    generator: Arc<dyn ReplyGenerator>,
}

impl CodeAssessmentModule {
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ChatModule for CodeAssessmentModule {
    fn name(&self) -> &'static str {
        "code_assessment"
    }

    async fn process(
        &self,
        _history: &str,
        user_input: &str,
        _job_details: &str,
    ) -> Result<Option<String>, LlmError> {
        let Some(block) = extract_code_block(user_input) else {
            return Ok(None);
        };
        let prompt = fill(
            CODE_REVIEW_PROMPT,
            &[
                ("language", block.language.as_str()),
                ("code", block.code.as_str()),
            ],
        );
        let review = self.generator.generate(&prompt, CODE_REVIEW_SYSTEM).await?;
        Ok(Some(format!("Code Assessment:\n{review}")))
    }
}

/// Answers explicit requests for a personality assessment.
pub struct PersonalityAssessmentModule {
    generator: Arc<dyn ReplyGenerator>,
}

impl PersonalityAssessmentModule {
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ChatModule for PersonalityAssessmentModule {
    fn name(&self) -> &'static str {
        "personality_assessment"
    }

    async fn process(
        &self,
        history: &str,
        user_input: &str,
        _job_details: &str,
    ) -> Result<Option<String>, LlmError> {
        if !wants_personality_assessment(user_input) {
            return Ok(None);
        }
        let prompt = fill(
            PERSONALITY_PROMPT,
            &[("history", history), ("user_input", user_input)],
        );
        let assessment = self.generator.generate(&prompt, PERSONALITY_SYSTEM).await?;
        Ok(Some(format!("Personality Assessment:\n{assessment}")))
    }
}

/// Fallback: always replies.
pub struct GeneralConversationModule {
    generator: Arc<dyn ReplyGenerator>,
}

impl GeneralConversationModule {
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ChatModule for GeneralConversationModule {
    fn name(&self) -> &'static str {
        "general_conversation"
    }

    async fn process(
        &self,
        history: &str,
        user_input: &str,
        job_details: &str,
    ) -> Result<Option<String>, LlmError> {
        let prompt = fill(
            GENERAL_PROMPT,
            &[
                ("job_details", job_details),
                ("history", history),
                ("user_input", user_input),
            ],
        );
        Ok(Some(self.generator.generate(&prompt, GENERAL_SYSTEM).await?))
    }
}
