/**
 * Live Session Handler Types
 *
 * Request and response types for the live-session HTTP surface. Wire
 * field names are camelCase to match the web client.
 */

use serde::{Deserialize, Serialize};

use crate::model::{ChatMessage, LiveSession, Material};

/// Schedule request
///
/// Required fields arrive as `Option` so a missing field and a blank
/// one get the same validation response instead of a deserialization
/// error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSessionRequest {
    /// Session title shown in listings
    #[serde(default)]
    pub session_title: Option<String>,
    /// One-line description
    #[serde(default)]
    pub short_description: Option<String>,
    /// Optional course linkage, stored as an opaque reference
    #[serde(default)]
    pub course_id: Option<String>,
    /// Heading shown on the session screen
    #[serde(default)]
    pub session_heading: Option<String>,
    /// Scheduled date, RFC 3339 or `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// Display time slot, stored verbatim
    #[serde(default)]
    pub time: Option<String>,
}

/// Returned by the schedule handler
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSessionResponse {
    pub message: String,
    pub session_id: String,
}

/// Change-slide request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSlideRequest {
    #[serde(default)]
    pub slide_index: Option<i64>,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<LiveSession>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: LiveSession,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderstoodCountResponse {
    pub understood_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub chat: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct MaterialsResponse {
    pub materials: Vec<Material>,
}

/// Returned by the material upload handler
#[derive(Debug, Serialize)]
pub struct UploadMaterialsResponse {
    pub message: String,
    pub materials: Vec<Material>,
}
