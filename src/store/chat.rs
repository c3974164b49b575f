/**
 * Session Chat Log
 *
 * Database operations for the per-session chat sub-collection. Message
 * ids come from the database, so they are unique and monotonic; the
 * broadcast side always re-reads the persisted message rather than
 * echoing client input.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::model::{ChatMessage, Role};

#[derive(sqlx::FromRow)]
struct ChatRow {
    message_id: i64,
    user_id: String,
    user_name: String,
    role: String,
    message: String,
    timestamp: DateTime<Utc>,
}

impl ChatRow {
    fn into_message(self) -> Result<ChatMessage, ApiError> {
        let role = Role::parse_str(&self.role).ok_or_else(|| {
            ApiError::internal(format!("Invalid role '{}' in chat log", self.role))
        })?;
        Ok(ChatMessage {
            message_id: self.message_id,
            user_id: self.user_id,
            user_name: self.user_name,
            role,
            message: self.message,
            timestamp: self.timestamp,
        })
    }
}

/// Persistent chat log, one stream of messages per session
#[derive(Clone)]
pub struct ChatLog {
    pool: SqlitePool,
}

impl ChatLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a message and return the persisted record
    ///
    /// # Returns
    /// The stored message with its assigned id and timestamp
    pub async fn append(
        &self,
        session_id: &str,
        user_id: &str,
        user_name: &str,
        role: Role,
        message: &str,
    ) -> Result<ChatMessage, ApiError> {
        let timestamp = Utc::now();

        let message_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO session_chat (session_id, user_id, user_name, role, message, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING message_id
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .bind(user_name)
        .bind(role.as_str())
        .bind(message)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(ChatMessage {
            message_id,
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            role,
            message: message.to_string(),
            timestamp,
        })
    }

    /// All messages for a session in chronological order
    pub async fn list(&self, session_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let rows = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT message_id, user_id, user_name, role, message, timestamp
            FROM session_chat
            WHERE session_id = ?
            ORDER BY message_id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ChatRow::into_message).collect()
    }
}
