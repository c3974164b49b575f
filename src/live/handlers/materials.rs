/**
 * Material Upload Handler
 *
 * Multipart upload endpoint for session materials. Files are buffered
 * out of the multipart stream first, then checked against the session,
 * then written under the media root and recorded as Material rows. Each
 * stored file is announced to the live session through the signaling
 * layer as a `material-uploaded` broadcast.
 */

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::response::Json;

use crate::error::ApiError;
use crate::live::handlers::types::UploadMaterialsResponse;
use crate::middleware::AuthUser;
use crate::server::AppState;
use crate::signaling::protocol::ServerEvent;

/// Upload session materials (POST /api/teacher/live-session/upload-material/{id})
///
/// Accepts one or more files in multipart fields named `files`. Fields
/// with any other name are ignored.
///
/// # Returns
///
/// `200 OK` with `{ message, materials }` listing the stored files
///
/// # Errors
///
/// * `400 Bad Request` - If no files were uploaded, the multipart
///   payload is malformed, or the session is not active
/// * `404 Not Found` - If the session does not exist
/// * `403 Forbidden` - If the caller does not own the session
pub async fn upload_materials(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadMaterialsResponse>, ApiError> {
    let mut uploads: Vec<(String, Bytes)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("file").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(e.to_string()))?;
        uploads.push((file_name, data));
    }

    if uploads.is_empty() {
        return Err(ApiError::validation("No files uploaded"));
    }

    let session = state.store.get(&id).await?;
    if session.teacher_id != user.user_id {
        return Err(ApiError::forbidden("Unauthorized"));
    }
    if !session.is_active {
        return Err(ApiError::invalid_state("Session not active"));
    }

    let mut materials = Vec::with_capacity(uploads.len());
    for (file_name, data) in uploads {
        let material = state.materials.save(&id, &file_name, &data).await?;
        state.store.add_material(&id, &material).await?;
        state.signaling.broadcast_to_session(
            &id,
            ServerEvent::MaterialUploaded {
                session_id: id.clone(),
                material: material.clone(),
            },
        );
        materials.push(material);
    }

    tracing::info!(
        "[LiveSession] {} material(s) uploaded to session {} by {}",
        materials.len(),
        id,
        user.user_id
    );

    Ok(Json(UploadMaterialsResponse {
        message: "Materials uploaded successfully".to_string(),
        materials,
    }))
}
