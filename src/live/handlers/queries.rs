/**
 * Teacher Query Handlers
 *
 * Read endpoints for the teacher dashboard: session listings, single
 * session documents, the understood counter and the chat history. All
 * per-id reads require the caller to own the session.
 */

use axum::extract::{Path, State};
use axum::response::Json;

use crate::error::ApiError;
use crate::live::handlers::types::{
    ChatHistoryResponse, SessionResponse, SessionsResponse, UnderstoodCountResponse,
};
use crate::middleware::AuthUser;
use crate::model::LiveSession;
use crate::server::AppState;

/// Fetch a session and reject callers who do not own it
async fn owned_session(
    state: &AppState,
    session_id: &str,
    teacher_id: &str,
) -> Result<LiveSession, ApiError> {
    let session = state.store.get(session_id).await?;
    if session.teacher_id != teacher_id {
        return Err(ApiError::forbidden("Unauthorized"));
    }
    Ok(session)
}

/// List the caller's sessions (GET /api/teacher/live-session)
///
/// Newest first.
pub async fn list_sessions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<SessionsResponse>, ApiError> {
    let sessions = state.store.list_by_teacher(&user.user_id).await?;
    Ok(Json(SessionsResponse { sessions }))
}

/// Fetch one owned session (GET /api/teacher/live-session/{id})
///
/// # Errors
///
/// * `404 Not Found` - If the session does not exist
/// * `403 Forbidden` - If the caller does not own the session
pub async fn get_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = owned_session(&state, &id, &user.user_id).await?;
    Ok(Json(SessionResponse { session }))
}

/// Read the understood counter (GET /api/teacher/live-session/{id}/understood)
pub async fn get_understood_count(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UnderstoodCountResponse>, ApiError> {
    let session = owned_session(&state, &id, &user.user_id).await?;
    Ok(Json(UnderstoodCountResponse {
        understood_count: session.understood_count,
    }))
}

/// Read the chat history (GET /api/teacher/live-session/{id}/chat)
pub async fn get_session_chat(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ChatHistoryResponse>, ApiError> {
    owned_session(&state, &id, &user.user_id).await?;
    let chat = state.chat.list(&id).await?;
    Ok(Json(ChatHistoryResponse { chat }))
}
