use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::matching::matcher::Job;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub employer_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    /// Job details as handed to the chat assistant and question generator.
    pub fn details(&self) -> String {
        format!("Job Title: {}\nDescription: {}", self.title, self.description)
    }
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub applicant_id: i64,
    pub job_id: i64,
    pub status: String,
    pub score: f64,
    pub compatibility: f64,
    pub skill_similarity: f64,
    pub reasoning: String,
    pub applied_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> JobRow {
        JobRow {
            id: 4,
            employer_id: 9,
            title: "Platform Engineer".to_string(),
            description: "Kubernetes, Terraform".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_details_format() {
        assert_eq!(
            row().details(),
            "Job Title: Platform Engineer\nDescription: Kubernetes, Terraform"
        );
    }

    #[test]
    fn test_row_into_job_keeps_id_and_text() {
        let job: Job = row().into();
        assert_eq!(job.id, 4);
        assert_eq!(job.text(), "Platform Engineer Kubernetes, Terraform");
    }

    #[test]
    fn test_status_serde_matches_column_values() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
