pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::chat::handlers as chat;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/users", post(users::handle_register))
        .route("/api/v1/users/:id", get(users::handle_get_user))
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .route(
            "/api/v1/jobs/:id/coding-question",
            get(jobs::handle_coding_question),
        )
        // Applications
        .route(
            "/api/v1/jobs/:id/applications",
            post(jobs::handle_apply).get(jobs::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(jobs::handle_review_application),
        )
        // Matching
        .route("/api/v1/match", post(matching::handle_match))
        .route(
            "/api/v1/jobs/:id/similar",
            post(matching::handle_similar_jobs),
        )
        .route(
            "/api/v1/applicants/:id/recommendations",
            get(matching::handle_recommendations),
        )
        // Assessment
        .route(
            "/api/v1/applicants/:id/assessments",
            post(assessment::handle_run_assessments),
        )
        .route(
            "/api/v1/applicants/:id/profile",
            get(assessment::handle_get_profile),
        )
        // Chat
        .route("/api/v1/chat", post(chat::handle_chat))
        .route(
            "/api/v1/applicants/:id/chat",
            get(chat::handle_get_history).delete(chat::handle_clear_history),
        )
        .with_state(state)
}
