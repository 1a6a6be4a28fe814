//! Axum route handlers for jobs and applications.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::handlers::load_applicant;
use crate::errors::AppError;
use crate::jobs::repository::{self, NewJob};
use crate::matching::matcher::Job;
use crate::models::job::{ApplicationRow, ApplicationStatus, JobRow};
use crate::models::user::UserRole;
use crate::state::AppState;
use crate::users::handlers::require_role;

const MAX_TITLE_CHARS: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobPayload {
    pub employer_id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct EmployerQuery {
    pub employer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub employer_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub job_id: i64,
    pub difficulty: String,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub applicant_id: i64,
}

/// Employers may only move an application out of `pending`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Accepted,
    Rejected,
}

impl From<ReviewDecision> for ApplicationStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Accepted => ApplicationStatus::Accepted,
            ReviewDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub employer_id: i64,
    pub status: ReviewDecision,
}

#[derive(Debug, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub meets_threshold: bool,
}

impl ApplicationView {
    fn new(application: ApplicationRow, threshold: f64) -> Self {
        Self {
            meets_threshold: application.score >= threshold,
            application,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_job_payload(payload: &JobPayload) -> Result<(), AppError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "title cannot exceed {MAX_TITLE_CHARS} characters"
        )));
    }
    if payload.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub(crate) async fn load_job(state: &AppState, job_id: i64) -> Result<JobRow, AppError> {
    repository::get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

async fn load_owned_job(
    state: &AppState,
    job_id: i64,
    employer_id: i64,
) -> Result<JobRow, AppError> {
    require_role(state, employer_id, UserRole::Employer).await?;
    let job = load_job(state, job_id).await?;
    if job.employer_id != employer_id {
        return Err(AppError::Forbidden);
    }
    Ok(job)
}

fn updated_or_conflict(job_id: i64, updated: Option<JobRow>) -> Result<JobRow, AppError> {
    updated.ok_or_else(|| {
        AppError::Conflict(format!(
            "Job {job_id} already has applications scored against it and can no longer be edited"
        ))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Job handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(payload): Json<JobPayload>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    validate_job_payload(&payload)?;
    require_role(&state, payload.employer_id, UserRole::Employer).await?;

    let job = repository::create_job(
        &state.db,
        NewJob {
            employer_id: payload.employer_id,
            title: payload.title.trim(),
            description: payload.description.trim(),
        },
    )
    .await?;

    info!("Job {} created by employer {}", job.id, job.employer_id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
///
/// All open jobs, or one employer's jobs when `employer_id` is given.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = match params.employer_id {
        Some(employer_id) => repository::list_jobs_for_employer(&state.db, employer_id).await?,
        None => repository::list_jobs(&state.db).await?,
    };
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<JobRow>, AppError> {
    Ok(Json(load_job(&state, job_id).await?))
}

/// PUT /api/v1/jobs/:id
///
/// Only jobs without applications can be edited; stored scores stay tied to
/// the text they were computed from.
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Json(payload): Json<JobPayload>,
) -> Result<Json<JobRow>, AppError> {
    validate_job_payload(&payload)?;
    load_owned_job(&state, job_id, payload.employer_id).await?;

    let updated = repository::update_unmatched_job(
        &state.db,
        job_id,
        payload.title.trim(),
        payload.description.trim(),
    )
    .await?;
    Ok(Json(updated_or_conflict(job_id, updated)?))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<EmployerQuery>,
) -> Result<StatusCode, AppError> {
    load_owned_job(&state, job_id, params.employer_id).await?;
    repository::delete_job(&state.db, job_id).await?;
    info!("Job {job_id} deleted by employer {}", params.employer_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/jobs/:id/coding-question
///
/// Generates a coding question for the job. `difficulty` defaults to "medium".
pub async fn handle_coding_question(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<QuestionQuery>,
) -> Result<Json<QuestionResponse>, AppError> {
    let job = load_job(&state, job_id).await?;
    let difficulty = params
        .difficulty
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "medium".to_string());

    let question = state
        .assessments
        .assessor()
        .generate_coding_question(&job.details(), &difficulty)
        .await?;

    Ok(Json(QuestionResponse {
        job_id,
        difficulty,
        question,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Application handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:id/applications
///
/// Scores the applicant's stored profile against the job and records the application.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationView>), AppError> {
    require_role(&state, request.applicant_id, UserRole::Applicant).await?;
    let job: Job = load_job(&state, job_id).await?.into();
    let applicant = load_applicant(&state, request.applicant_id).await?;

    let result = state.matcher.match_job(&job, &applicant).await?;
    let application =
        repository::upsert_application(&state.db, applicant.id, job.id, &result).await?;

    info!(
        "Applicant {} applied to job {}: score={:.3}",
        applicant.id, job.id, application.score
    );
    Ok((
        StatusCode::CREATED,
        Json(ApplicationView::new(
            application,
            state.config.match_threshold,
        )),
    ))
}

/// GET /api/v1/jobs/:id/applications
///
/// The job's applications ranked by score, for the owning employer.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<EmployerQuery>,
) -> Result<Json<Vec<ApplicationView>>, AppError> {
    load_owned_job(&state, job_id, params.employer_id).await?;

    let threshold = state.config.match_threshold;
    let applications = repository::list_applications(&state.db, job_id)
        .await?
        .into_iter()
        .map(|a| ApplicationView::new(a, threshold))
        .collect();
    Ok(Json(applications))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_review_application(
    State(state): State<AppState>,
    Path(application_id): Path<i64>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ApplicationView>, AppError> {
    let application = repository::get_application(&state.db, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;
    load_owned_job(&state, application.job_id, request.employer_id).await?;

    let updated =
        repository::set_application_status(&state.db, application_id, request.status.into())
            .await?;
    Ok(Json(ApplicationView::new(
        updated,
        state.config.match_threshold,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use chrono::Utc;

    fn payload(title: &str, description: &str) -> JobPayload {
        JobPayload {
            employer_id: 1,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn application(score: f64) -> ApplicationRow {
        ApplicationRow {
            id: 1,
            applicant_id: 2,
            job_id: 3,
            status: "pending".to_string(),
            score,
            compatibility: score,
            skill_similarity: score,
            reasoning: "fits".to_string(),
            applied_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        assert!(validate_job_payload(&payload("  ", "Build APIs")).is_err());
    }

    #[test]
    fn test_validate_rejects_long_title() {
        let title = "x".repeat(MAX_TITLE_CHARS + 1);
        assert!(validate_job_payload(&payload(&title, "Build APIs")).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        assert!(validate_job_payload(&payload("SRE", "\n")).is_err());
    }

    #[test]
    fn test_validate_accepts_reasonable_job() {
        assert!(validate_job_payload(&payload("SRE", "Keep prod up")).is_ok());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(ApplicationView::new(application(0.7), 0.7).meets_threshold);
        assert!(!ApplicationView::new(application(0.69), 0.7).meets_threshold);
    }

    #[test]
    fn test_review_decision_rejects_pending() {
        let parsed = serde_json::from_str::<ReviewDecision>(r#""pending""#);
        assert!(parsed.is_err());
        let accepted: ReviewDecision = serde_json::from_str(r#""accepted""#).unwrap();
        assert_eq!(
            ApplicationStatus::from(accepted),
            ApplicationStatus::Accepted
        );
    }

    #[test]
    fn test_application_view_serializes_flat() {
        let value = serde_json::to_value(ApplicationView::new(application(0.9), 0.7)).unwrap();
        assert_eq!(value["job_id"], 3);
        assert_eq!(value["meets_threshold"], true);
    }

    #[test]
    fn test_job_with_applications_cannot_be_edited() {
        let err = updated_or_conflict(3, None).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::CONFLICT
        );

        let row = JobRow {
            id: 3,
            employer_id: 1,
            title: "SRE".to_string(),
            description: "Keep prod up".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(updated_or_conflict(3, Some(row)).unwrap().title, "SRE");
    }
}
