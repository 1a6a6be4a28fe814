use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub db_max_connections: u32,
    pub llm_timeout_secs: u64,
    /// Chat transcripts expire this long after the last turn.
    pub chat_history_ttl_secs: u64,
    /// Composite score at or above which an application is flagged as a match.
    pub match_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_threshold = optional_env("MATCH_THRESHOLD", 0.7_f64)?;
        if !(0.0..=1.0).contains(&match_threshold) {
            bail!("MATCH_THRESHOLD must be between 0.0 and 1.0, got {match_threshold}");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: optional_env("PORT", 8080_u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            db_max_connections: optional_env("DB_MAX_CONNECTIONS", 10_u32)?,
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS", 120_u64)?,
            chat_history_ttl_secs: optional_env("CHAT_HISTORY_TTL_SECS", 86_400_u64)?,
            match_threshold,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
