//! Core data models for hushnote.
//!
//! These types are shared across all hushnote crates and represent
//! the core domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A user's note.
///
/// Notes are owned exclusively by their creating user. `is_hidden` places a
/// note in the PIN-gated partition; `is_deleted` is a soft-delete marker.
/// Soft-deleted notes are excluded from every query in this system but are
/// never physically removed here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct Note {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    pub color: Option<String>,
    pub is_hidden: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An image attached to a note.
///
/// `image_ref` is an opaque storage key; file storage mechanics live
/// outside this system. Intrinsic dimensions are optional; images with
/// unknown or non-positive dimensions take no part in layout computation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct NoteImage {
    pub id: Uuid,
    pub note_id: Uuid,
    pub image_ref: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Request for creating a new note.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub is_hidden: bool,
}

/// Request for replacing a note's editable fields.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    pub color: Option<String>,
    pub is_hidden: bool,
}

/// Request for attaching an image to a note.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AttachImageRequest {
    pub image_ref: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

// =============================================================================
// PROFILE TYPES
// =============================================================================

/// Per-user profile holding the secondary credential.
///
/// `pin_hash` is a PHC-format string (never the plaintext PIN); `None` means
/// the user has not set a PIN yet, in which case PIN verification always
/// fails. The hash is never serialized outward.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub pin_hash: Option<String>,
    pub picture_ref: Option<String>,
}

impl Profile {
    /// Whether a PIN has ever been set for this profile.
    pub fn pin_set(&self) -> bool {
        self.pin_hash.is_some()
    }
}

// =============================================================================
// SESSION TYPES
// =============================================================================

/// Opaque identifier of an authenticated session.
///
/// Issued and destroyed by the primary authentication layer (an external
/// collaborator); this system only keys per-session flags off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
