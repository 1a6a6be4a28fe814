// Job matching: TF-IDF skill similarity blended with a judged compatibility score.
// The judge is a trait object so tests and alternative scorers can stand in for the LLM.

pub mod handlers;
pub mod judge;
pub mod llm_judge;
pub mod matcher;
pub mod parser;
pub mod prompts;
pub mod similarity;
