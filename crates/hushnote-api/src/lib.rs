//! # hushnote-api
//!
//! HTTP API server for hushnote.
//!
//! Wires the core controller, gate, and repositories to an axum router.
//! The binary in `main.rs` runs this over PostgreSQL; tests run the same
//! router over the in-memory repositories.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod query_types;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use utoipa::OpenApi;

use hushnote_core::{
    NoteFilterEngine, NoteImageRepository, NoteRepository, NoteVisibilityController, PinGate,
    PinHasher, ProfileRepository, SessionStore,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<NoteVisibilityController>,
    pub gate: Arc<PinGate>,
    pub notes: Arc<dyn NoteRepository>,
    pub images: Arc<dyn NoteImageRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl AppState {
    /// Wire the application state from its collaborators.
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        images: Arc<dyn NoteImageRepository>,
        profiles: Arc<dyn ProfileRepository>,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<dyn PinHasher>,
    ) -> Self {
        let gate = Arc::new(PinGate::new(hasher, profiles.clone()));
        let controller = Arc::new(NoteVisibilityController::new(
            NoteFilterEngine::new(notes.clone()),
            gate.clone(),
            images.clone(),
            sessions,
        ));
        Self {
            controller,
            gate,
            notes,
            images,
            profiles,
        }
    }
}

/// OpenAPI documentation, served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hushnote API",
        description = "Personal notes with a PIN-gated hidden partition"
    ),
    paths(
        handlers::notes::list_notes,
        handlers::notes::list_hidden_notes,
        handlers::notes::create_note,
        handlers::notes::get_note,
        handlers::notes::update_note,
        handlers::notes::delete_note,
        handlers::images::attach_image,
        handlers::images::delete_image,
        handlers::pin::verify_pin,
        handlers::pin::lock_session,
        handlers::profile::get_profile,
        handlers::profile::profile_intent,
    ),
    components(schemas(
        hushnote_core::Note,
        hushnote_core::NoteImage,
        hushnote_core::CreateNoteRequest,
        hushnote_core::UpdateNoteRequest,
        hushnote_core::AttachImageRequest,
        hushnote_core::AnnotatedNote,
        hushnote_core::AnnotatedImage,
        handlers::notes::CreateNoteBody,
        handlers::notes::NoteListingResponse,
        handlers::notes::NoteDetailResponse,
        handlers::pin::VerifyPinBody,
        handlers::pin::VerifyPinResponse,
        handlers::profile::ProfileIntent,
        handlers::profile::ProfileResponse,
        handlers::profile::IntentOutcome,
    )),
    tags(
        (name = "Notes", description = "Note listings and CRUD"),
        (name = "Images", description = "Note image attachments"),
        (name = "Pin", description = "Hidden-notes PIN gate"),
        (name = "Profile", description = "Profile and intent dispatch")
    )
)]
pub struct ApiDoc;

/// Build the API router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json))
        .route(
            "/api/v1/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/api/v1/notes/hidden",
            get(handlers::notes::list_hidden_notes),
        )
        .route(
            "/api/v1/notes/:id",
            get(handlers::notes::get_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        .route(
            "/api/v1/notes/:id/images",
            post(handlers::images::attach_image),
        )
        .route("/api/v1/images/:id", delete(handlers::images::delete_image))
        .route("/api/v1/pin/verify", post(handlers::pin::verify_pin))
        .route("/api/v1/profile", get(handlers::profile::get_profile))
        .route(
            "/api/v1/profile/intent",
            post(handlers::profile::profile_intent),
        )
        .route("/api/v1/session/lock", post(handlers::pin::lock_session))
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Serve the generated OpenAPI spec.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
