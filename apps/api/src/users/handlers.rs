//! Axum route handlers for users, plus the role gate other handlers call.

use std::sync::OnceLock;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::user::{UserRole, UserRow};
use crate::state::AppState;
use crate::users::repository;

const MAX_EMAIL_CHARS: usize = 120;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub role: UserRole,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex pattern")
    })
}

/// Trimmed, lowercased email, or a validation error.
fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if email.chars().count() > MAX_EMAIL_CHARS {
        return Err(AppError::Validation(format!(
            "email cannot exceed {MAX_EMAIL_CHARS} characters"
        )));
    }
    if !email_regex().is_match(&email) {
        return Err(AppError::Validation("email is not a valid address".to_string()));
    }
    Ok(email)
}

/// Unknown users and users holding another role are both refused.
fn ensure_role(user: Option<&UserRow>, required: UserRole) -> Result<(), AppError> {
    match user.and_then(UserRow::role) {
        Some(role) if role == required => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

/// Loads `user_id` and checks it holds `required`.
pub(crate) async fn require_role(
    state: &AppState,
    user_id: i64,
    required: UserRole,
) -> Result<UserRow, AppError> {
    let user = repository::get_user(&state.db, user_id).await?;
    if let Err(err) = ensure_role(user.as_ref(), required) {
        warn!("User {user_id} refused: {required} role required");
        return Err(err);
    }
    user.ok_or(AppError::Forbidden)
}

/// POST /api/v1/users
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    let email = normalize_email(&request.email)?;

    let user = match repository::create_user(&state.db, &email, request.role).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(AppError::Conflict(
                "Email already registered. Please use a different email.".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    info!("User {} registered as {}", user.id, request.role);
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserRow>, AppError> {
    repository::get_user(&state.db, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: &str) -> UserRow {
        UserRow {
            id: 1,
            email: "dev@example.com".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matching_role_passes() {
        assert!(ensure_role(Some(&user("employer")), UserRole::Employer).is_ok());
        assert!(ensure_role(Some(&user("applicant")), UserRole::Applicant).is_ok());
    }

    #[test]
    fn test_applicant_cannot_act_as_employer() {
        let err = ensure_role(Some(&user("applicant")), UserRole::Employer).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_employer_cannot_chat_or_apply() {
        let err = ensure_role(Some(&user("employer")), UserRole::Applicant).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_unknown_user_or_role_is_forbidden() {
        assert!(matches!(
            ensure_role(None, UserRole::Applicant),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            ensure_role(Some(&user("admin")), UserRole::Employer),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Dev@Example.COM ").unwrap(),
            "dev@example.com"
        );
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("two@@example.com").is_err());
        let long = format!("{}@example.com", "x".repeat(MAX_EMAIL_CHARS));
        assert!(normalize_email(&long).is_err());
    }

    #[test]
    fn test_register_request_rejects_unknown_role() {
        let parsed = serde_json::from_str::<RegisterRequest>(
            r#"{"email": "a@b.io", "role": "admin"}"#,
        );
        assert!(parsed.is_err());
    }
}
