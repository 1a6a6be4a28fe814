mod assessment;
mod chat;
mod config;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::assessor::LlmAssessor;
use crate::assessment::manager::AssessmentManager;
use crate::chat::history::ChatHistoryStore;
use crate::chat::prescreener::Prescreener;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::matching::llm_judge::LlmTextJudge;
use crate::matching::matcher::JobMatcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Prescreen API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url, config.db_max_connections).await?;

    let history =
        ChatHistoryStore::connect(&config.redis_url, config.chat_history_ttl_secs).await?;
    info!(
        "Redis chat history initialized (ttl {}s)",
        config.chat_history_ttl_secs
    );

    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        db,
        history,
        config: config.clone(),
        matcher: JobMatcher::new(Arc::new(LlmTextJudge::new(llm.clone()))),
        assessments: AssessmentManager::new(Arc::new(LlmAssessor::new(llm.clone()))),
        prescreener: Arc::new(Prescreener::with_generator(Arc::new(llm))),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(
        "Listening on {addr} (match threshold {})",
        config.match_threshold
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
