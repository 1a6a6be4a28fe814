// All LLM prompt templates for the matching module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Preamble for skill extraction.
pub const EXTRACT_SKILLS_PREAMBLE: &str =
    "Extract the concrete skills (languages, frameworks, tools, domains, soft skills) a text mentions.";

/// Skill extraction prompt. Replace `{text}` before sending.
pub const EXTRACT_SKILLS_PROMPT: &str = r#"List every skill mentioned in the text below.

Return a JSON object with this EXACT schema:
{
  "skills": ["Python", "SQL", "stakeholder communication"]
}

Rules:
- One skill per array element, as it appears in the text (no explanations).
- Do NOT add skills that are not mentioned.
- Return an empty array if the text mentions no skills.

TEXT:
{text}"#;

/// Preamble for compatibility scoring.
pub const COMPATIBILITY_PREAMBLE: &str =
    "Determine the compatibility between a job and an applicant.";

/// Compatibility prompt. Replace `{job}` and `{profile}` before sending.
pub const COMPATIBILITY_PROMPT: &str = r#"Determine the compatibility between the job and the applicant below.

Return a JSON object with this EXACT schema:
{
  "score": 0.72,
  "reasoning": "Two or three sentences explaining the score."
}

Rules:
- "score" is a number from 0.0 (no fit) to 1.0 (perfect fit).
- "reasoning" cites the requirements the applicant meets and misses.

JOB:
{job}

APPLICANT PROFILE:
{profile}"#;

/// Preamble for similar-job proposals.
pub const SIMILAR_JOBS_PREAMBLE: &str =
    "Select open jobs similar to a target job that would also suit an applicant.";

/// Similar-job prompt. Replace `{target}`, `{profile}` and `{listing}` before sending.
pub const SIMILAR_JOBS_PROMPT: &str = r#"Given the target job and the applicant profile, select the jobs from the listing that are similar to the target job and suit the applicant.

Return a JSON object with this EXACT schema:
{
  "similar_jobs": [
    "Job ID: 3, Title: Backend Engineer, Reason: same stack, applicant knows SQL"
  ]
}

Rules:
- Every entry MUST start with "Job ID: <id>" using an id from the listing.
- Order entries from most to least similar.
- Return an empty array if nothing in the listing is similar.

TARGET JOB:
{target}

APPLICANT PROFILE:
{profile}

JOB LISTING:
{listing}"#;
