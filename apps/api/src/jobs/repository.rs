use sqlx::PgPool;

use crate::matching::matcher::MatchResult;
use crate::models::job::{ApplicationRow, ApplicationStatus, JobRow};

pub struct NewJob<'a> {
    pub employer_id: i64,
    pub title: &'a str,
    pub description: &'a str,
}

pub async fn create_job(pool: &PgPool, job: NewJob<'_>) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (employer_id, title, description)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(job.employer_id)
    .bind(job.title)
    .bind(job.description)
    .fetch_one(pool)
    .await
}

pub async fn get_job(pool: &PgPool, job_id: i64) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// All open jobs, oldest first so rankings have a stable input order.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn list_jobs_for_employer(
    pool: &PgPool,
    employer_id: i64,
) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE employer_id = $1 ORDER BY id")
        .bind(employer_id)
        .fetch_all(pool)
        .await
}

pub async fn random_job(pool: &PgPool) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY random() LIMIT 1")
        .fetch_optional(pool)
        .await
}

/// Edits a job that nobody has applied to yet. `None` when the job is missing
/// or already has scored applications.
pub async fn update_unmatched_job(
    pool: &PgPool,
    job_id: i64,
    title: &str,
    description: &str,
) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs
        SET title = $2, description = $3, updated_at = now()
        WHERE id = $1
          AND NOT EXISTS (SELECT 1 FROM applications WHERE job_id = $1)
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(title)
    .bind(description)
    .fetch_optional(pool)
    .await
}

pub async fn delete_job(pool: &PgPool, job_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Records (or re-scores) an application. Re-applying resets the status to pending.
pub async fn upsert_application(
    pool: &PgPool,
    applicant_id: i64,
    job_id: i64,
    result: &MatchResult,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (applicant_id, job_id, status, score, compatibility, skill_similarity, reasoning)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (applicant_id, job_id) DO UPDATE
        SET status = EXCLUDED.status,
            score = EXCLUDED.score,
            compatibility = EXCLUDED.compatibility,
            skill_similarity = EXCLUDED.skill_similarity,
            reasoning = EXCLUDED.reasoning,
            applied_at = now()
        RETURNING *
        "#,
    )
    .bind(applicant_id)
    .bind(job_id)
    .bind(ApplicationStatus::Pending.as_str())
    .bind(result.score)
    .bind(result.compatibility)
    .bind(result.skill_similarity)
    .bind(&result.reasoning)
    .fetch_one(pool)
    .await
}

/// Applications for a job, best score first, ties by application id.
pub async fn list_applications(
    pool: &PgPool,
    job_id: i64,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE job_id = $1 ORDER BY score DESC, id",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
}

pub async fn get_application(
    pool: &PgPool,
    application_id: i64,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
        .bind(application_id)
        .fetch_optional(pool)
        .await
}

pub async fn set_application_status(
    pool: &PgPool,
    application_id: i64,
    status: ApplicationStatus,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(application_id)
    .bind(status.as_str())
    .fetch_one(pool)
    .await
}
