use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::assessment::models::ApplicantAssessments;
use crate::assessment::profile::{build_profile, merge_assessments};
use crate::assessment::repository::{get_profile, upsert_profile};
use crate::chat::history::{format_history, latest_code_submission};
use crate::errors::AppError;
use crate::matching::matcher::Applicant;
use crate::models::applicant::ApplicantProfileRow;
use crate::models::user::UserRole;
use crate::state::AppState;
use crate::users::handlers::require_role;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub applicant_id: i64,
    pub profile_text: String,
    pub assessments: ApplicantAssessments,
}

impl TryFrom<ApplicantProfileRow> for ProfileResponse {
    type Error = serde_json::Error;

    fn try_from(row: ApplicantProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            applicant_id: row.applicant_id,
            profile_text: row.profile_text,
            assessments: serde_json::from_value(row.assessments)?,
        })
    }
}

/// Loads an applicant's assessed profile for matching.
pub(crate) async fn load_applicant(
    state: &AppState,
    applicant_id: i64,
) -> Result<Applicant, AppError> {
    get_profile(&state.db, applicant_id)
        .await?
        .map(Applicant::from)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Applicant {applicant_id} has no assessed profile yet"
            ))
        })
}

/// POST /api/v1/applicants/:id/assessments
///
/// Assesses the applicant from their chat transcript and stores the profile.
pub async fn handle_run_assessments(
    State(state): State<AppState>,
    Path(applicant_id): Path<i64>,
) -> Result<Json<ProfileResponse>, AppError> {
    require_role(&state, applicant_id, UserRole::Applicant).await?;
    let turns = state.history.load(applicant_id).await?;
    if turns.is_empty() {
        return Err(AppError::Validation(format!(
            "Applicant {applicant_id} has no chat history to assess"
        )));
    }

    let history = format_history(&turns);
    let code_submission = latest_code_submission(&turns).unwrap_or_default();
    let latest = state
        .assessments
        .run_assessments(code_submission, &history)
        .await?;

    let previous = match get_profile(&state.db, applicant_id).await? {
        Some(row) => match serde_json::from_value::<ApplicantAssessments>(row.assessments) {
            Ok(assessments) => Some(assessments),
            Err(e) => {
                warn!("Discarding unreadable stored assessments for applicant {applicant_id}: {e}");
                None
            }
        },
        None => None,
    };
    let assessments = merge_assessments(previous, latest);
    let profile_text = build_profile(&assessments);

    let stored_assessments = serde_json::to_value(&assessments)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode assessments: {e}")))?;
    upsert_profile(&state.db, applicant_id, &profile_text, &stored_assessments).await?;

    info!("Profile updated for applicant {applicant_id}");
    Ok(Json(ProfileResponse {
        applicant_id,
        profile_text,
        assessments,
    }))
}

/// GET /api/v1/applicants/:id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(applicant_id): Path<i64>,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = get_profile(&state.db, applicant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for applicant {applicant_id}")))?;
    let response = ProfileResponse::try_from(row)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored assessments are corrupt: {e}")))?;
    Ok(Json(response))
}
