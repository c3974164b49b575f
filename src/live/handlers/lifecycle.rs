/**
 * Session Lifecycle Handlers
 *
 * Start and end transitions for live sessions. Both fetch the session
 * first so the caller gets the right failure: 404 for unknown sessions,
 * 403 when the session belongs to another teacher, 400 when the session
 * is already in the requested state. The transition itself is a
 * conditional update, so two concurrent starts race safely and exactly
 * one wins.
 */

use axum::extract::{Path, State};
use axum::response::Json;

use crate::error::ApiError;
use crate::live::handlers::types::MessageResponse;
use crate::middleware::AuthUser;
use crate::server::AppState;

/// Start a live session (POST /api/teacher/live-session/start/{id})
///
/// Marks the session active and stamps its start time.
///
/// # Errors
///
/// * `404 Not Found` - If the session does not exist
/// * `403 Forbidden` - If the caller does not own the session
/// * `400 Bad Request` - If the session is already active
pub async fn start_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let session = state.store.get(&id).await?;
    if session.teacher_id != user.user_id {
        return Err(ApiError::forbidden("Unauthorized"));
    }

    state.store.start(&id).await?;
    tracing::info!("[LiveSession] Session {} started by {}", id, user.user_id);

    Ok(Json(MessageResponse {
        message: "Live session started".to_string(),
    }))
}

/// End a live session (POST /api/teacher/live-session/end/{id})
///
/// Marks the session inactive and stamps its end time.
///
/// # Errors
///
/// * `404 Not Found` - If the session does not exist
/// * `403 Forbidden` - If the caller does not own the session
/// * `400 Bad Request` - If the session is not active
pub async fn end_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let session = state.store.get(&id).await?;
    if session.teacher_id != user.user_id {
        return Err(ApiError::forbidden("Unauthorized"));
    }

    state.store.end(&id).await?;
    tracing::info!("[LiveSession] Session {} ended by {}", id, user.user_id);

    Ok(Json(MessageResponse {
        message: "Live session ended".to_string(),
    }))
}
