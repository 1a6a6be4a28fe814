//! Recovers job ids from the similar-job lines proposed by the text judge.
//!
//! Expected line shape: `Job ID: <int>, Title: <title>, ...`. Parsing is per
//! line; the finder decides what to do with a line that does not parse.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("no job id in line: {0:?}")]
    MissingJobId(String),

    #[error("job id out of range in line: {0:?}")]
    InvalidJobId(String),
}

fn job_id_regex() -> &'static Regex {
    static JOB_ID: OnceLock<Regex> = OnceLock::new();
    JOB_ID.get_or_init(|| {
        Regex::new(r"(?i)\bjob\s*id\s*[:#]?\s*(\d+)").expect("Invalid job id regex pattern")
    })
}

/// Extracts the job id from one proposed line.
pub fn parse_job_id(line: &str) -> Result<i64, ParseError> {
    let digits = job_id_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ParseError::MissingJobId(line.to_string()))?;

    digits
        .as_str()
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidJobId(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_line() {
        assert_eq!(parse_job_id("Job ID: 3, Title: X"), Ok(3));
    }

    #[test]
    fn test_parse_tolerates_case_and_spacing() {
        assert_eq!(parse_job_id("- job id:42 | Title: Data Engineer"), Ok(42));
        assert_eq!(parse_job_id("JOB ID #7, Title: SRE"), Ok(7));
    }

    #[test]
    fn test_parse_missing_id() {
        let err = parse_job_id("Title: Backend Engineer, strong overlap").unwrap_err();
        assert!(matches!(err, ParseError::MissingJobId(_)));
    }

    #[test]
    fn test_parse_non_numeric_id() {
        assert!(parse_job_id("Job ID: three, Title: X").is_err());
    }

    #[test]
    fn test_parse_overflowing_id() {
        let err = parse_job_id("Job ID: 99999999999999999999999, Title: X").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJobId(_)));
    }
}
