//! Note image handlers.
//!
//! Image deletion keeps the original AJAX contract: a JSON success
//! envelope rather than an empty response.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use hushnote_core::AttachImageRequest;

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::AppState;

/// Attach an image to an owned note.
///
/// POST /api/v1/notes/{id}/images
#[utoipa::path(post, path = "/api/v1/notes/{id}/images", tag = "Images",
    request_body = AttachImageRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 404, description = "Note not found")))]
pub async fn attach_image(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(note_id): Path<Uuid>,
    Json(body): Json<AttachImageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image_id = state.images.attach(note_id, auth.user_id, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": image_id })),
    ))
}

/// Physically delete a note image.
///
/// DELETE /api/v1/images/{id}
#[utoipa::path(delete, path = "/api/v1/images/{id}", tag = "Images",
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Image not found")))]
pub async fn delete_image(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(image_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.images.delete(image_id, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
