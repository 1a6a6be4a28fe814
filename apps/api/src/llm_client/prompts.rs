// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Role fragment shared by every recruiter-facing prompt.
pub const RECRUITER_ROLE: &str = "You are an experienced technical recruiter \
    prescreening applicants for open positions. Judge only from the text you are given; \
    never invent experience the applicant did not describe.";

/// Builds a system prompt from a task-specific preamble plus the JSON-only rule.
pub fn json_system(preamble: &str) -> String {
    format!("{RECRUITER_ROLE} {preamble} {JSON_ONLY_SYSTEM}")
}

/// Fills `{name}` placeholders in a template. Unknown placeholders are left as-is.
///
/// Substitution is a single left-to-right pass over the template; inserted
/// values are never scanned again, so a value containing `{name}` stays literal.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match replacement {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_all_occurrences() {
        let out = fill("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{missing}", &[("a", "x")]), "{missing}");
    }

    #[test]
    fn test_fill_does_not_expand_placeholders_inside_values() {
        let out = fill(
            "JOB: {job}\nPROFILE: {profile}",
            &[("job", "Write {profile} templates"), ("profile", "Rust dev")],
        );
        assert_eq!(out, "JOB: Write {profile} templates\nPROFILE: Rust dev");
    }

    #[test]
    fn test_fill_keeps_json_braces() {
        let template = "Schema:\n{\n  \"score\": 0.5\n}\nJob: {job}";
        assert_eq!(
            fill(template, &[("job", "SRE")]),
            "Schema:\n{\n  \"score\": 0.5\n}\nJob: SRE"
        );
    }

    #[test]
    fn test_fill_handles_doubled_braces_and_unicode() {
        assert_eq!(fill("{{name}} é {name}", &[("name", "ü")]), "{ü} é ü");
    }

    #[test]
    fn test_json_system_contains_json_rule() {
        let system = json_system("Score the fit.");
        assert!(system.contains("Score the fit."));
        assert!(system.contains("valid JSON only"));
    }
}
