use serde::{Deserialize, Serialize};

/// Verdict on a code submission. Scores are on a 0 – 10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAssessment {
    pub language: String,
    pub score: i64,
    pub assessment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityAssessment {
    pub traits: Vec<String>,
    pub assessment: String,
}

/// Clarity and coherence are each on a 0 – 10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationAssessment {
    pub clarity: i64,
    pub coherence: i64,
    pub assessment: String,
}

/// Everything the assistant has concluded about one applicant.
/// Stored as JSONB next to the profile text built from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantAssessments {
    #[serde(default)]
    pub technical: Option<TechnicalAssessment>,
    #[serde(default)]
    pub personality: Option<PersonalityAssessment>,
    #[serde(default)]
    pub communication: Option<CommunicationAssessment>,
}

/// A fenced code block found in a chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}
