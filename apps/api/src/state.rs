use std::sync::Arc;

use sqlx::PgPool;

use crate::assessment::manager::AssessmentManager;
use crate::chat::history::ChatHistoryStore;
use crate::chat::prescreener::Prescreener;
use crate::config::Config;
use crate::matching::matcher::JobMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every service is built once in `main`; nothing here is a global.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis-backed chat transcripts.
    pub history: ChatHistoryStore,
    pub config: Config,
    /// Job matcher over the injected text judge. Default: `LlmTextJudge`.
    pub matcher: JobMatcher,
    pub assessments: AssessmentManager,
    pub prescreener: Arc<Prescreener>,
}
