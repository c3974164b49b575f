/**
 * Live Session Data Structures
 *
 * This module defines the live session document and its supporting types.
 * A session is created in the scheduled state, started and ended by the
 * owning teacher, and accumulates participants, materials, and an
 * understood counter while active.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participant role within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    /// Stable string form used in the database and in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Parse the stored string form back into a role
    pub fn parse_str(value: &str) -> Option<Role> {
        match value {
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported connection quality from a client
///
/// Only teacher-reported `poor` quality triggers a warning broadcast;
/// everything else is logged and dropped. Unrecognized values map to
/// `Unknown` so older clients cannot break event parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkQuality {
    Poor,
    Fair,
    Good,
    Excellent,
    #[serde(other)]
    Unknown,
}

/// A material file attached to a session
///
/// Materials are uploaded by the teacher over HTTP, stored under the
/// media root, and announced to connected clients. The `url` is the
/// path students fetch the file from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub file_name: String,
    pub url: String,
    pub upload_time: DateTime<Utc>,
    pub size: i64,
}

/// A live class session document
///
/// # Lifecycle
///
/// * scheduled - `is_active == false`, `started_at == None`
/// * active - `is_active == true`, `started_at` set
/// * ended - `is_active == false`, `ended_at` set
///
/// `participants` has set semantics (a student joining twice appears
/// once) and `understood_count` only moves through atomic increments,
/// so concurrent taps from different students all land.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSession {
    pub session_id: String,
    pub teacher_id: String,
    pub org_id: String,
    pub course_id: Option<String>,
    pub session_title: String,
    pub short_description: String,
    pub session_heading: String,
    pub scheduled_date: DateTime<Utc>,
    /// Display time as entered by the teacher (e.g. "10:30 AM")
    pub scheduled_time: String,
    pub is_active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub current_slide_index: i64,
    pub participants: Vec<String>,
    pub understood_count: i64,
    pub materials: Vec<Material>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::parse_str("teacher"), Some(Role::Teacher));
        assert_eq!(Role::parse_str("student"), Some(Role::Student));
        assert_eq!(Role::parse_str("admin"), None);
        assert_eq!(Role::Teacher.as_str(), "teacher");
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Student).unwrap();
        assert_eq!(json, "\"student\"");
        let role: Role = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, Role::Teacher);
    }

    #[test]
    fn test_network_quality_unknown_values() {
        let quality: NetworkQuality = serde_json::from_str("\"terrible\"").unwrap();
        assert_eq!(quality, NetworkQuality::Unknown);
        let quality: NetworkQuality = serde_json::from_str("\"poor\"").unwrap();
        assert_eq!(quality, NetworkQuality::Poor);
    }

    #[test]
    fn test_material_wire_form_is_camel_case() {
        let material = Material {
            file_name: "notes.pdf".to_string(),
            url: "/media/live-sessions/abc/notes.pdf".to_string(),
            upload_time: Utc::now(),
            size: 1024,
        };
        let json = serde_json::to_value(&material).unwrap();
        assert!(json.get("fileName").is_some());
        assert!(json.get("uploadTime").is_some());
        assert!(json.get("file_name").is_none());
    }
}
