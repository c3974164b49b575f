/**
 * Signaling Wire Protocol
 *
 * This module defines the realtime event protocol between clients and
 * the signaling router. Every frame on the socket is a JSON envelope:
 *
 * ```json
 * { "event": "join-session", "data": { "sessionId": "...", ... } }
 * ```
 *
 * Event names are kebab-case, payload fields camelCase. Incoming text
 * deserializes into `ClientEvent` at ingress; anything that does not
 * parse is logged and dropped. Outgoing frames serialize from
 * `ServerEvent`, so handlers never build ad-hoc JSON.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ChatMessage, Material, NetworkQuality, Role};
use crate::signaling::ConnId;

/// A WebRTC session description as relayed between peers
///
/// `kind` is "offer" or "answer" on the wire; the SDP body is rewritten
/// by the codec constraint transform before relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: String,
    pub sdp: String,
}

/// Events a client may send to the router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Join an active session; identity must match the connection token
    JoinSession {
        session_id: String,
        user_id: String,
        user_name: String,
        role: Role,
    },
    /// Teacher moves the deck to a new slide
    ChangeSlide {
        session_id: String,
        slide_index: i64,
        #[serde(default)]
        slide_image: Option<String>,
    },
    /// Teacher announces a freshly uploaded slide image
    SlideUploaded {
        session_id: String,
        slide_url: String,
        slide_index: i64,
    },
    /// Relay an offer to one peer connection
    WebrtcOffer {
        session_id: String,
        target_conn_id: ConnId,
        offer: SessionDescription,
    },
    /// Relay an answer to one peer connection
    WebrtcAnswer {
        session_id: String,
        target_conn_id: ConnId,
        answer: SessionDescription,
    },
    /// Relay an ICE candidate to one peer connection, untouched
    WebrtcIceCandidate {
        session_id: String,
        target_conn_id: ConnId,
        candidate: serde_json::Value,
    },
    /// Student asks to be called by the session's teacher
    RequestTeacherStream { session_id: String },
    /// Post a chat message to the session
    SendChatMessage { session_id: String, message: String },
    /// Tap the shared understood counter
    Understood { session_id: String },
    /// Self-reported connection quality
    NetworkQualityReport {
        session_id: String,
        quality: NetworkQuality,
        #[serde(default)]
        stats: Option<serde_json::Value>,
    },
    /// Rejoin after a transport drop
    ReconnectToSession {
        session_id: String,
        user_id: String,
        user_name: String,
    },
    /// Relay a material notice to the session
    MaterialUploaded {
        session_id: String,
        material: Material,
    },
}

impl ClientEvent {
    /// Event name as it appears on the wire, for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinSession { .. } => "join-session",
            Self::ChangeSlide { .. } => "change-slide",
            Self::SlideUploaded { .. } => "slide-uploaded",
            Self::WebrtcOffer { .. } => "webrtc-offer",
            Self::WebrtcAnswer { .. } => "webrtc-answer",
            Self::WebrtcIceCandidate { .. } => "webrtc-ice-candidate",
            Self::RequestTeacherStream { .. } => "request-teacher-stream",
            Self::SendChatMessage { .. } => "send-chat-message",
            Self::Understood { .. } => "understood",
            Self::NetworkQualityReport { .. } => "network-quality-report",
            Self::ReconnectToSession { .. } => "reconnect-to-session",
            Self::MaterialUploaded { .. } => "material-uploaded",
        }
    }
}

/// Events the router sends to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Someone joined the session (sent to the whole session, joiner included)
    UserJoined {
        user_id: String,
        user_name: String,
        role: Role,
        participant_count: i64,
    },
    /// The current slide changed; `seq` orders deliveries per session
    SlideChanged {
        slide_index: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slide_image: Option<String>,
        changed_by: String,
        seq: u64,
    },
    /// A new slide image is available to fetch
    NewSlideAvailable {
        slide_url: String,
        slide_index: i64,
        uploaded_by: String,
        timestamp: DateTime<Utc>,
    },
    /// Relayed offer, SDP already constrained
    WebrtcOffer {
        offer: SessionDescription,
        from_conn_id: ConnId,
    },
    /// Relayed answer, SDP already constrained
    WebrtcAnswer {
        answer: SessionDescription,
        from_conn_id: ConnId,
    },
    /// Relayed ICE candidate
    WebrtcIceCandidate {
        candidate: serde_json::Value,
        from_conn_id: ConnId,
    },
    /// Delivered to the teacher when a student wants the stream
    StudentRequestingStream { student_conn_id: ConnId },
    /// A persisted chat message
    ChatMessage(ChatMessage),
    /// The understood counter moved; carries the persisted value
    UnderstoodCountUpdated { understood_count: i64, seq: u64 },
    /// Teacher-side network trouble, fanned out to the session
    NetworkQualityWarning {
        message: String,
        severity: String,
        timestamp: DateTime<Utc>,
    },
    /// A participant re-established their connection
    UserReconnected {
        user_id: String,
        user_name: String,
        timestamp: DateTime<Utc>,
    },
    /// A participant's connection went away
    UserLeft {
        user_id: String,
        user_name: String,
        role: Role,
    },
    /// Materials uploaded through the HTTP API
    MaterialUploaded {
        session_id: String,
        material: Material,
    },
    /// Material notice relayed from a client
    NewMaterial { material: Material },
    /// Request-scoped failure, sent only to the originator
    Error { message: String },
}

impl ServerEvent {
    /// Event name as it appears on the wire, for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserJoined { .. } => "user-joined",
            Self::SlideChanged { .. } => "slide-changed",
            Self::NewSlideAvailable { .. } => "new-slide-available",
            Self::WebrtcOffer { .. } => "webrtc-offer",
            Self::WebrtcAnswer { .. } => "webrtc-answer",
            Self::WebrtcIceCandidate { .. } => "webrtc-ice-candidate",
            Self::StudentRequestingStream { .. } => "student-requesting-stream",
            Self::ChatMessage(..) => "chat-message",
            Self::UnderstoodCountUpdated { .. } => "understood-count-updated",
            Self::NetworkQualityWarning { .. } => "network-quality-warning",
            Self::UserReconnected { .. } => "user-reconnected",
            Self::UserLeft { .. } => "user-left",
            Self::MaterialUploaded { .. } => "material-uploaded",
            Self::NewMaterial { .. } => "new-material",
            Self::Error { .. } => "error",
        }
    }
}
