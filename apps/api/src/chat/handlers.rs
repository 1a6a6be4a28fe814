use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chat::history::{format_history, ChatTurn};
use crate::errors::AppError;
use crate::jobs::handlers::load_job;
use crate::jobs::repository::random_job;
use crate::models::user::UserRole;
use crate::state::AppState;
use crate::users::handlers::require_role;

const NO_JOB_DETAILS: &str = "No job details available";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub applicant_id: i64,
    pub user_input: String,
    /// Job the applicant is being screened for. A random open job when absent.
    pub job_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub module: &'static str,
}

async fn job_details(state: &AppState, job_id: Option<i64>) -> Result<String, AppError> {
    let job = match job_id {
        Some(id) => Some(load_job(state, id).await?),
        None => random_job(&state.db).await?,
    };
    Ok(job
        .map(|j| j.details())
        .unwrap_or_else(|| NO_JOB_DETAILS.to_string()))
}

/// POST /api/v1/chat
///
/// One prescreening turn: replies to the applicant and appends both messages
/// to their transcript.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.user_input.trim().is_empty() {
        return Err(AppError::Validation(
            "user_input cannot be empty".to_string(),
        ));
    }

    require_role(&state, request.applicant_id, UserRole::Applicant).await?;

    let details = job_details(&state, request.job_id).await?;
    let _turn = state.history.lock_turn(request.applicant_id).await;
    let turns = state.history.load(request.applicant_id).await?;
    let history = format_history(&turns);

    let reply = state
        .prescreener
        .respond(&history, &request.user_input, &details)
        .await?;

    state
        .history
        .append(
            request.applicant_id,
            &[
                ChatTurn::applicant(request.user_input),
                ChatTurn::assistant(reply.response.clone()),
            ],
        )
        .await?;

    info!(
        "Chat turn for applicant {} handled by {}",
        request.applicant_id, reply.module
    );
    Ok(Json(ChatResponse {
        response: reply.response,
        module: reply.module,
    }))
}

/// GET /api/v1/applicants/:id/chat
pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(applicant_id): Path<i64>,
) -> Result<Json<Vec<ChatTurn>>, AppError> {
    Ok(Json(state.history.load(applicant_id).await?))
}

/// DELETE /api/v1/applicants/:id/chat
pub async fn handle_clear_history(
    State(state): State<AppState>,
    Path(applicant_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.history.clear(applicant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
