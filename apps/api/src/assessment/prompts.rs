// All LLM prompt templates for the assessment module.

pub const CODE_PREAMBLE: &str = "Assess a code submission for correctness, clarity and idiomatic use of its language.";

/// Replace `{language}` and `{code}` before sending.
pub const CODE_PROMPT: &str = r#"Assess the following {language} code submitted by a job applicant.

Return a JSON object with this EXACT schema:
{
  "assessment": "Three to five sentences on correctness, style and edge cases.",
  "score": 7
}

"score" is an integer from 0 (unusable) to 10 (excellent).

CODE:
{code}"#;

pub const QUESTION_PREAMBLE: &str = "Write a short coding question that tests skills a job requires.";

/// Replace `{job_details}` and `{difficulty}` before sending.
pub const QUESTION_PROMPT: &str = r#"Write one {difficulty} coding question for an applicant to the job below.
The question must be answerable in under 30 minutes in a chat window.

Return a JSON object with this EXACT schema:
{
  "question": "The full question text, including any input/output examples."
}

JOB:
{job_details}"#;

pub const PERSONALITY_PREAMBLE: &str = "Infer workplace-relevant personality traits from a conversation.";

/// Replace `{history}` before sending.
pub const PERSONALITY_PROMPT: &str = r#"Read the prescreening conversation below and describe the applicant's personality as it relates to work.

Return a JSON object with this EXACT schema:
{
  "traits": ["collaborative", "detail-oriented"],
  "assessment": "Two to four sentences grounded in what the applicant wrote."
}

Use short single-word or hyphenated traits. Base every trait on the applicant's own messages.

CONVERSATION:
{history}"#;

pub const COMMUNICATION_PREAMBLE: &str = "Rate how clearly and coherently an applicant communicates.";

/// Replace `{history}` before sending.
pub const COMMUNICATION_PROMPT: &str = r#"Rate the applicant's written communication in the prescreening conversation below.

Return a JSON object with this EXACT schema:
{
  "clarity": 8,
  "coherence": 7,
  "assessment": "Two to three sentences explaining the ratings."
}

"clarity" and "coherence" are integers from 0 to 10. Rate only the applicant's messages.

CONVERSATION:
{history}"#;
