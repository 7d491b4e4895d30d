//! Note listing and CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use hushnote_core::{
    AnnotatedNote, AttachImageRequest, CreateNoteRequest, Note, NoteFilter, NoteImage,
    NoteListing, UpdateNoteRequest,
};

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::query_types::{selected, ListQuery};
use crate::AppState;

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

/// Body for creating a note, with optional initial images.
#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
pub struct CreateNoteBody {
    #[serde(flatten)]
    pub note: CreateNoteRequest,
    #[serde(default)]
    pub images: Vec<AttachImageRequest>,
}

/// A note listing with facets and the dropdown echo values.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct NoteListingResponse {
    pub notes: Vec<AnnotatedNote>,
    pub all_tags: Vec<String>,
    pub all_colors: Vec<String>,
    pub selected_tag: String,
    pub selected_color: String,
    pub hidden: bool,
}

impl NoteListingResponse {
    fn new(listing: NoteListing, filter: &NoteFilter) -> Self {
        Self {
            selected_tag: selected(&filter.tag),
            selected_color: selected(&filter.color),
            notes: listing.notes,
            all_tags: listing.all_tags,
            all_colors: listing.all_colors,
            hidden: listing.hidden,
        }
    }
}

/// A single note with its raw image set (edit-form view).
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct NoteDetailResponse {
    #[serde(flatten)]
    pub note: Note,
    pub images: Vec<NoteImage>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// List visible notes with facets.
///
/// GET /api/v1/notes
#[utoipa::path(get, path = "/api/v1/notes", tag = "Notes",
    params(ListQuery),
    responses((status = 200, description = "Success", body = NoteListingResponse)))]
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<NoteListingResponse>, ApiError> {
    let filter = query.into_filter();
    let listing = state.controller.list_visible(auth.user_id, &filter).await?;
    Ok(Json(NoteListingResponse::new(listing, &filter)))
}

/// List hidden notes; requires the session to be unlocked via PIN.
///
/// GET /api/v1/notes/hidden
#[utoipa::path(get, path = "/api/v1/notes/hidden", tag = "Notes",
    params(ListQuery),
    responses(
        (status = 200, description = "Success", body = NoteListingResponse),
        (status = 403, description = "Hidden notes are locked for this session")))]
pub async fn list_hidden_notes(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<NoteListingResponse>, ApiError> {
    let filter = query.into_filter();
    let listing = state
        .controller
        .list_hidden(auth.user_id, &auth.session, &filter)
        .await?;
    Ok(Json(NoteListingResponse::new(listing, &filter)))
}

/// Create a note (optionally with initial images).
///
/// POST /api/v1/notes
#[utoipa::path(post, path = "/api/v1/notes", tag = "Notes",
    request_body = CreateNoteBody,
    responses((status = 201, description = "Created")))]
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(body): Json<CreateNoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let note_id = state.notes.insert(auth.user_id, body.note).await?;
    for image in body.images {
        state.images.attach(note_id, auth.user_id, image).await?;
    }
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": note_id })),
    ))
}

/// Fetch a single note with its images.
///
/// GET /api/v1/notes/{id}
#[utoipa::path(get, path = "/api/v1/notes/{id}", tag = "Notes",
    responses(
        (status = 200, description = "Success", body = NoteDetailResponse),
        (status = 404, description = "Note not found")))]
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<NoteDetailResponse>, ApiError> {
    let note = state.notes.fetch(id, auth.user_id).await?;
    let images = state.images.list_for_note(note.id).await?;
    Ok(Json(NoteDetailResponse { note, images }))
}

/// Replace a note's editable fields.
///
/// PUT /api/v1/notes/{id}
#[utoipa::path(put, path = "/api/v1/notes/{id}", tag = "Notes",
    request_body = UpdateNoteRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Note not found")))]
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<StatusCode, ApiError> {
    state.notes.update(id, auth.user_id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Soft-delete a note.
///
/// DELETE /api/v1/notes/{id}
#[utoipa::path(delete, path = "/api/v1/notes/{id}", tag = "Notes",
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Note not found")))]
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.notes.soft_delete(id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
