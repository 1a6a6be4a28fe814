//! Chat transcripts in Redis: one list per applicant, JSON turns, TTL refreshed
//! on every append.

use redis::aio::ConnectionManager;
use tokio::sync::OwnedMutexGuard;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::assessment::manager::extract_code_block;
use crate::chat::turn_lock::TurnLocks;

/// Only the most recent turns are replayed to the model.
const MAX_HISTORY_TURNS: isize = 40;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("corrupt chat turn: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    Applicant,
    Assistant,
}

impl ChatRole {
    fn label(&self) -> &'static str {
        match self {
            ChatRole::Applicant => "Applicant",
            ChatRole::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn applicant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Applicant,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Renders turns as the plain-text transcript the prompts expect.
pub fn format_history(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role.label(), t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The most recent applicant message that carries a fenced code block.
pub fn latest_code_submission(turns: &[ChatTurn]) -> Option<&str> {
    turns
        .iter()
        .rev()
        .filter(|t| t.role == ChatRole::Applicant)
        .find(|t| extract_code_block(&t.content).is_some())
        .map(|t| t.content.as_str())
}

fn history_key(applicant_id: i64) -> String {
    format!("prescreen:chat:{applicant_id}")
}

/// Cloning is cheap: clones share one Redis connection manager and one set of
/// per-applicant turn locks.
#[derive(Clone)]
pub struct ChatHistoryStore {
    conn: ConnectionManager,
    ttl_secs: u64,
    turn_locks: TurnLocks,
}

impl ChatHistoryStore {
    /// Opens the single connection manager every clone of the store reuses.
    /// It reconnects on its own after Redis drops the connection.
    pub async fn connect(redis_url: &str, ttl_secs: u64) -> Result<Self, HistoryError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            ttl_secs,
            turn_locks: TurnLocks::default(),
        })
    }

    /// Serializes load, reply and append for one applicant within this process.
    pub async fn lock_turn(&self, applicant_id: i64) -> OwnedMutexGuard<()> {
        self.turn_locks.lock(applicant_id).await
    }

    pub async fn load(&self, applicant_id: i64) -> Result<Vec<ChatTurn>, HistoryError> {
        let mut conn = self.conn.clone();
        let raw: Vec<String> = redis::cmd("LRANGE")
            .arg(history_key(applicant_id))
            .arg(-MAX_HISTORY_TURNS)
            .arg(-1)
            .query_async(&mut conn)
            .await?;

        raw.iter()
            .map(|entry| serde_json::from_str(entry).map_err(HistoryError::from))
            .collect()
    }

    pub async fn append(&self, applicant_id: i64, turns: &[ChatTurn]) -> Result<(), HistoryError> {
        if turns.is_empty() {
            return Ok(());
        }
        let payloads = turns
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        let key = history_key(applicant_id);

        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .cmd("RPUSH")
            .arg(&key)
            .arg(payloads)
            .ignore()
            .cmd("EXPIRE")
            .arg(&key)
            .arg(self.ttl_secs)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;

        debug!("Appended {} chat turns for applicant {applicant_id}", turns.len());
        Ok(())
    }

    pub async fn clear(&self, applicant_id: i64) -> Result<(), HistoryError> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(history_key(applicant_id))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}
