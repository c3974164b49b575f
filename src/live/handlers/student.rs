/**
 * Student Query Handlers
 *
 * Read endpoints for the student app. Listings are scoped to the
 * caller's organization; per-id reads only require that the session
 * exists, matching how students receive session ids (from their own
 * org's listings or a join link).
 */

use axum::extract::{Path, State};
use axum::response::Json;

use crate::error::ApiError;
use crate::live::handlers::types::{
    ChatHistoryResponse, MaterialsResponse, SessionResponse, SessionsResponse,
};
use crate::middleware::AuthUser;
use crate::server::AppState;

/// List joinable sessions (GET /api/student/live-session/available)
///
/// Active sessions in the caller's organization.
pub async fn get_available_sessions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<SessionsResponse>, ApiError> {
    let sessions = state.store.list_active_by_org(&user.org_id).await?;
    Ok(Json(SessionsResponse { sessions }))
}

/// List recent org sessions (GET /api/student/live-session/all)
///
/// Newest first, capped at 50.
pub async fn get_all_sessions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<SessionsResponse>, ApiError> {
    let sessions = state.store.list_by_org(&user.org_id, 50).await?;
    Ok(Json(SessionsResponse { sessions }))
}

/// Fetch one session document (GET /api/student/live-session/{id})
///
/// # Errors
///
/// * `404 Not Found` - If the session does not exist
pub async fn get_session_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.store.get(&id).await?;
    Ok(Json(SessionResponse { session }))
}

/// List session materials (GET /api/student/live-session/{id}/materials)
pub async fn get_session_materials(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MaterialsResponse>, ApiError> {
    state.store.get(&id).await?;
    let materials = state.store.materials(&id).await?;
    Ok(Json(MaterialsResponse { materials }))
}

/// Read the chat history (GET /api/student/live-session/{id}/chat)
pub async fn get_session_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatHistoryResponse>, ApiError> {
    state.store.get(&id).await?;
    let chat = state.chat.list(&id).await?;
    Ok(Json(ChatHistoryResponse { chat }))
}
