use serde_json::Value;
use sqlx::PgPool;

use crate::models::applicant::ApplicantProfileRow;

pub async fn get_profile(
    pool: &PgPool,
    applicant_id: i64,
) -> Result<Option<ApplicantProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantProfileRow>(
        "SELECT * FROM applicant_profiles WHERE applicant_id = $1",
    )
    .bind(applicant_id)
    .fetch_optional(pool)
    .await
}

pub async fn upsert_profile(
    pool: &PgPool,
    applicant_id: i64,
    profile_text: &str,
    assessments: &Value,
) -> Result<ApplicantProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicantProfileRow>(
        r#"
        INSERT INTO applicant_profiles (applicant_id, profile_text, assessments)
        VALUES ($1, $2, $3)
        ON CONFLICT (applicant_id) DO UPDATE
        SET profile_text = EXCLUDED.profile_text,
            assessments = EXCLUDED.assessments,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(applicant_id)
    .bind(profile_text)
    .bind(assessments)
    .fetch_one(pool)
    .await
}
