use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::matching::matcher::Applicant;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantProfileRow {
    pub applicant_id: i64,
    pub profile_text: String,
    pub assessments: Value,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicantProfileRow> for Applicant {
    fn from(row: ApplicantProfileRow) -> Self {
        Applicant {
            id: row.applicant_id,
            profile: row.profile_text,
        }
    }
}
