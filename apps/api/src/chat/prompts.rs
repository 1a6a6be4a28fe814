// All LLM prompt templates for the prescreening chat.
// Chat replies are plain text, not JSON.

pub const GENERAL_SYSTEM: &str = "You are a friendly prescreening assistant talking with a job applicant. \
    Ask one focused question at a time about their experience, skills and motivation for the job. \
    Keep replies under 120 words. Never promise an outcome of the application.";

/// Replace `{job_details}`, `{history}` and `{user_input}` before sending.
pub const GENERAL_PROMPT: &str = r#"JOB:
{job_details}

CONVERSATION SO FAR:
{history}

APPLICANT'S NEW MESSAGE:
{user_input}

Write the assistant's next reply."#;

pub const CODE_REVIEW_SYSTEM: &str = "You are a senior engineer reviewing code an applicant pasted into a prescreening chat. \
    Comment on correctness, readability and edge cases in a short, encouraging paragraph.";

/// Replace `{language}` and `{code}` before sending.
pub const CODE_REVIEW_PROMPT: &str = r#"Review this {language} code:

{code}"#;

pub const PERSONALITY_SYSTEM: &str = "You are an organizational psychologist. \
    When an applicant asks for a personality assessment, summarize the working style their messages show. \
    Be specific and kind; do not diagnose.";

/// Replace `{history}` and `{user_input}` before sending.
pub const PERSONALITY_PROMPT: &str = r#"CONVERSATION SO FAR:
{history}

APPLICANT'S REQUEST:
{user_input}

Give the personality assessment."#;
