//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::handlers::load_applicant;
use crate::errors::AppError;
use crate::jobs::handlers::load_job;
use crate::jobs::repository::list_jobs;
use crate::matching::matcher::{Job, MatchResult, RankedMatch};
use crate::state::AppState;

const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job_id: i64,
    pub applicant_id: i64,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub job: Job,
    pub applicant_id: i64,
    #[serde(flatten)]
    pub result: MatchResult,
    pub meets_threshold: bool,
}

#[derive(Debug, Deserialize)]
pub struct SimilarJobsRequest {
    pub applicant_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankedJobsResponse {
    pub applicant_id: i64,
    pub matches: Vec<RankedMatch>,
}

async fn load_all_jobs(state: &AppState) -> Result<Vec<Job>, AppError> {
    Ok(list_jobs(&state.db)
        .await?
        .into_iter()
        .map(Job::from)
        .collect())
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let job: Job = load_job(&state, request.job_id).await?.into();
    let applicant = load_applicant(&state, request.applicant_id).await?;

    let result = state.matcher.match_job(&job, &applicant).await?;
    let meets_threshold = result.score >= state.config.match_threshold;

    Ok(Json(MatchResponse {
        job,
        applicant_id: applicant.id,
        result,
        meets_threshold,
    }))
}

/// POST /api/v1/jobs/:id/similar
///
/// Jobs similar to the target that also suit the applicant, best first.
pub async fn handle_similar_jobs(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Json(request): Json<SimilarJobsRequest>,
) -> Result<Json<RankedJobsResponse>, AppError> {
    let target: Job = load_job(&state, job_id).await?.into();
    let applicant = load_applicant(&state, request.applicant_id).await?;
    let candidates = load_all_jobs(&state).await?;

    let matches = state
        .matcher
        .find_similar_jobs(&target, &applicant, &candidates)
        .await?;

    info!(
        "Found {} similar jobs for job {} / applicant {}",
        matches.len(),
        target.id,
        applicant.id
    );
    Ok(Json(RankedJobsResponse {
        applicant_id: applicant.id,
        matches,
    }))
}

/// GET /api/v1/applicants/:id/recommendations
///
/// The applicant's best `top_n` jobs (default 5).
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(applicant_id): Path<i64>,
    Query(params): Query<RecommendationQuery>,
) -> Result<Json<RankedJobsResponse>, AppError> {
    let top_n = params.top_n.unwrap_or(DEFAULT_TOP_N);
    if top_n == 0 {
        return Err(AppError::Validation("top_n must be at least 1".to_string()));
    }

    let applicant = load_applicant(&state, applicant_id).await?;
    let jobs = load_all_jobs(&state).await?;

    let matches = state
        .matcher
        .get_job_recommendations(&applicant, &jobs, top_n)
        .await?;

    Ok(Json(RankedJobsResponse {
        applicant_id,
        matches,
    }))
}
