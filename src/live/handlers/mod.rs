//! Live Session Handlers Module
//!
//! This module contains all HTTP handlers for the live-session
//! endpoints. Handlers are organized into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── schedule.rs  - Session scheduling handler
//! ├── lifecycle.rs - Start and end transition handlers
//! ├── slides.rs    - Slide control handler
//! ├── materials.rs - Material upload handler
//! ├── queries.rs   - Teacher read handlers
//! └── student.rs   - Student read handlers
//! ```
//!
//! # Handlers
//!
//! Teacher surface (requires the teacher role; per-id routes require
//! ownership):
//!
//! - **`schedule_session`** - POST /api/teacher/live-session/schedule
//! - **`start_session`** - POST /api/teacher/live-session/start/{id}
//! - **`end_session`** - POST /api/teacher/live-session/end/{id}
//! - **`upload_materials`** - POST /api/teacher/live-session/upload-material/{id}
//! - **`change_slide`** - POST /api/teacher/live-session/change-slide/{id}
//! - **`list_sessions`** - GET /api/teacher/live-session
//! - **`get_session`** - GET /api/teacher/live-session/{id}
//! - **`get_understood_count`** - GET /api/teacher/live-session/{id}/understood
//! - **`get_session_chat`** - GET /api/teacher/live-session/{id}/chat
//!
//! Student surface (requires the student role; reads only):
//!
//! - **`get_available_sessions`** - GET /api/student/live-session/available
//! - **`get_all_sessions`** - GET /api/student/live-session/all
//! - **`get_session_details`** - GET /api/student/live-session/{id}
//! - **`get_session_materials`** - GET /api/student/live-session/{id}/materials
//! - **`get_session_chat`** - GET /api/student/live-session/{id}/chat

/// Request and response types
pub mod types;

/// Session scheduling handler
pub mod schedule;

/// Start and end transition handlers
pub mod lifecycle;

/// Slide control handler
pub mod slides;

/// Material upload handler
pub mod materials;

/// Teacher read handlers
pub mod queries;

/// Student read handlers
pub mod student;

// Re-export commonly used types
pub use types::{
    ChangeSlideRequest, ChatHistoryResponse, MaterialsResponse, MessageResponse,
    ScheduleSessionRequest, ScheduleSessionResponse, SessionResponse, SessionsResponse,
    UnderstoodCountResponse, UploadMaterialsResponse,
};
