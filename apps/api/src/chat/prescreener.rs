//! Prescreener: routes each applicant message through the chat modules and
//! returns the first reply.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::chat::modules::{
    ChatModule, CodeAssessmentModule, GeneralConversationModule, PersonalityAssessmentModule,
    ReplyGenerator,
};
use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("no chat module produced a reply")]
    NoReply,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub module: &'static str,
    pub response: String,
}

pub struct Prescreener {
    modules: Vec<Arc<dyn ChatModule>>,
}

impl Prescreener {
    pub fn new(modules: Vec<Arc<dyn ChatModule>>) -> Self {
        Self { modules }
    }

    /// Code review first, then personality requests, then general conversation.
    pub fn with_generator(generator: Arc<dyn ReplyGenerator>) -> Self {
        let modules: Vec<Arc<dyn ChatModule>> = vec![
            Arc::new(CodeAssessmentModule::new(generator.clone())),
            Arc::new(PersonalityAssessmentModule::new(generator.clone())),
            Arc::new(GeneralConversationModule::new(generator)),
        ];
        Self::new(modules)
    }

    pub async fn respond(
        &self,
        history: &str,
        user_input: &str,
        job_details: &str,
    ) -> Result<ChatReply, ChatError> {
        for module in &self.modules {
            if let Some(response) = module.process(history, user_input, job_details).await? {
                debug!("Chat reply produced by {}", module.name());
                return Ok(ChatReply {
                    module: module.name(),
                    response,
                });
            }
        }
        Err(ChatError::NoReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubModule {
        name: &'static str,
        trigger: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StubModule {
        fn new(name: &'static str, trigger: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                name,
                trigger,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ChatModule for StubModule {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn process(
            &self,
            _history: &str,
            user_input: &str,
            _job_details: &str,
        ) -> Result<Option<String>, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.trigger {
                Some(word) if !user_input.contains(word) => Ok(None),
                _ => Ok(Some(format!("{} says hi", self.name))),
            }
        }
    }

    #[tokio::test]
    async fn test_first_matching_module_wins() {
        let code = StubModule::new("code", Some("```"));
        let general = StubModule::new("general", None);
        let prescreener = Prescreener::new(vec![
            code.clone() as Arc<dyn ChatModule>,
            general.clone() as Arc<dyn ChatModule>,
        ]);

        let reply = prescreener
            .respond("", "```rust\nfn main() {}\n```", "Job Title: SRE")
            .await
            .unwrap();
        assert_eq!(reply.module, "code");
        assert_eq!(general.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_through_to_general() {
        let code = StubModule::new("code", Some("```"));
        let general = StubModule::new("general", None);
        let prescreener = Prescreener::new(vec![
            code.clone() as Arc<dyn ChatModule>,
            general.clone() as Arc<dyn ChatModule>,
        ]);

        let reply = prescreener
            .respond("", "Tell me about the team", "Job Title: SRE")
            .await
            .unwrap();
        assert_eq!(reply.module, "general");
        assert_eq!(reply.response, "general says hi");
        assert_eq!(code.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_reply_is_an_error() {
        let code: Arc<dyn ChatModule> = StubModule::new("code", Some("```"));
        let prescreener = Prescreener::new(vec![code]);
        let err = prescreener.respond("", "hello", "").await.unwrap_err();
        assert!(matches!(err, ChatError::NoReply));
    }

    struct EchoGenerator;

    #[async_trait]
    impl ReplyGenerator for EchoGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn test_default_modules_prefer_code_review() {
        let prescreener = Prescreener::with_generator(Arc::new(EchoGenerator));
        let reply = prescreener
            .respond(
                "",
                "Personality assessment too, please:\n```go\nfunc main() {}\n```",
                "",
            )
            .await
            .unwrap();
        assert_eq!(reply.module, "code_assessment");
        assert_eq!(reply.response, "Code Assessment:\nok");
    }

    #[tokio::test]
    async fn test_default_modules_then_personality_then_general() {
        let prescreener = Prescreener::with_generator(Arc::new(EchoGenerator));

        let personality = prescreener
            .respond("", "I'd like a personality assessment", "")
            .await
            .unwrap();
        assert_eq!(personality.module, "personality_assessment");

        let general = prescreener
            .respond("", "How big is the team?", "")
            .await
            .unwrap();
        assert_eq!(general.module, "general_conversation");
        assert_eq!(general.response, "ok");
    }
}
