use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::session::Role;

/// A persisted in-session chat message
///
/// `message_id` is assigned by the chat log on append and is unique and
/// monotonic within a session, so clients can sort and deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message_id: i64,
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
