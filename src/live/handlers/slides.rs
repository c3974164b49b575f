/**
 * Slide Control Handler
 *
 * HTTP path for moving the deck, used by teacher dashboards that are
 * not on the WebSocket. Persists the new index and pushes the same
 * `slide-changed` broadcast the socket path produces, with the shared
 * per-session sequence number so clients can discard stale updates
 * regardless of which path they arrived from.
 */

use axum::extract::{Path, State};
use axum::response::Json;

use crate::error::ApiError;
use crate::live::handlers::types::{ChangeSlideRequest, MessageResponse};
use crate::middleware::AuthUser;
use crate::server::AppState;
use crate::signaling::protocol::ServerEvent;

/// Change the current slide (POST /api/teacher/live-session/change-slide/{id})
///
/// # Errors
///
/// * `400 Bad Request` - If slideIndex is missing or the session is not
///   active
/// * `404 Not Found` - If the session does not exist
/// * `403 Forbidden` - If the caller does not own the session
pub async fn change_slide(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<ChangeSlideRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Some(slide_index) = request.slide_index else {
        return Err(ApiError::validation("Slide index is required"));
    };

    let session = state.store.get(&id).await?;
    if session.teacher_id != user.user_id {
        return Err(ApiError::forbidden("Unauthorized"));
    }
    if !session.is_active {
        return Err(ApiError::invalid_state("Session not active"));
    }

    state.store.set_current_slide(&id, slide_index).await?;

    let seq = state.signaling.next_seq(&id);
    state.signaling.broadcast_to_session(
        &id,
        ServerEvent::SlideChanged {
            slide_index,
            slide_image: None,
            changed_by: user.name,
            seq,
        },
    );

    Ok(Json(MessageResponse {
        message: "Slide changed successfully".to_string(),
    }))
}
