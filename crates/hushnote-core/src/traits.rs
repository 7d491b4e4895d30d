//! Core traits for hushnote abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::filter::NoteFilter;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// A fully-scoped note query: one owner, one partition, one set of criteria.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    /// Owner the query is restricted to.
    pub owner: Uuid,
    /// Which partition to query: hidden (`true`) or visible (`false`).
    pub hidden: bool,
    /// Filter criteria applied within the partition.
    pub filter: NoteFilter,
}

/// Repository for note CRUD and partition-scoped queries.
///
/// Every query excludes soft-deleted notes. List results are ordered by
/// `updated_at` descending; ties keep the store's insertion order.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note for the given owner.
    async fn insert(&self, owner: Uuid, req: CreateNoteRequest) -> Result<Uuid>;

    /// Replace a note's editable fields, refreshing `updated_at`.
    async fn update(&self, id: Uuid, owner: Uuid, req: UpdateNoteRequest) -> Result<()>;

    /// Fetch a note, owner-scoped.
    async fn fetch(&self, id: Uuid, owner: Uuid) -> Result<Note>;

    /// List the notes matching a query, most recently updated first.
    async fn list(&self, query: &NoteQuery) -> Result<Vec<Note>>;

    /// Distinct non-empty tags within the owner+hidden partition, with the
    /// color constraint applied when present. The search term is never
    /// applied to facets.
    async fn distinct_tags(
        &self,
        owner: Uuid,
        hidden: bool,
        color: Option<&str>,
    ) -> Result<Vec<String>>;

    /// Distinct non-empty colors within the owner+hidden partition, with the
    /// tag constraint applied when present.
    async fn distinct_colors(
        &self,
        owner: Uuid,
        hidden: bool,
        tag: Option<&str>,
    ) -> Result<Vec<String>>;

    /// Soft-delete a note (sets `is_deleted`; never physically removes).
    async fn soft_delete(&self, id: Uuid, owner: Uuid) -> Result<()>;
}

// =============================================================================
// NOTE IMAGE REPOSITORY
// =============================================================================

/// Repository for note image attachments.
///
/// Unlike notes, image deletion is immediate and physical.
#[async_trait]
pub trait NoteImageRepository: Send + Sync {
    /// Attach an image to a note the owner holds.
    async fn attach(&self, note_id: Uuid, owner: Uuid, req: AttachImageRequest) -> Result<Uuid>;

    /// All images attached to one note.
    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<NoteImage>>;

    /// Images for a batch of notes, grouped by note id.
    async fn list_for_notes(&self, note_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<NoteImage>>>;

    /// Physically delete an image, owner-scoped through its note.
    async fn delete(&self, image_id: Uuid, owner: Uuid) -> Result<()>;
}

// =============================================================================
// PROFILE REPOSITORY
// =============================================================================

/// Repository for per-user profiles (the PIN credential store).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the user's profile, creating an empty one on first access.
    async fn fetch(&self, user_id: Uuid) -> Result<Profile>;

    /// Unconditionally store a new PIN hash.
    async fn set_pin_hash(&self, user_id: Uuid, hash: &str) -> Result<()>;

    /// Compare-and-swap the PIN hash: the write succeeds only if the stored
    /// hash still equals `current_hash`. Returns whether the swap happened.
    ///
    /// This closes the lost-update race between two concurrent PIN resets
    /// for the same profile.
    async fn replace_pin_hash(
        &self,
        user_id: Uuid,
        current_hash: &str,
        new_hash: &str,
    ) -> Result<bool>;
}

// =============================================================================
// CREDENTIAL HASHER
// =============================================================================

/// Hasher for the secondary (PIN) credential.
///
/// `verify` must compare in constant time internally; the plaintext never
/// persists beyond the call.
pub trait PinHasher: Send + Sync {
    /// Hash a plaintext PIN into an opaque storable string.
    fn hash(&self, raw: &str) -> Result<String>;

    /// Verify a plaintext PIN against a stored hash.
    fn verify(&self, raw: &str, hash: &str) -> bool;
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Per-session flag storage, keyed by the primary-auth session identity.
///
/// The flag lives exactly as long as the underlying session: it is set on
/// successful PIN verification and cleared on logout/lock. There is no
/// automatic re-lock timeout.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Whether the session has unlocked the hidden partition.
    async fn hidden_unlocked(&self, session: &SessionId) -> Result<bool>;

    /// Set the hidden-partition unlock flag.
    async fn set_hidden_unlocked(&self, session: &SessionId, unlocked: bool) -> Result<()>;

    /// Drop all flags for a session (logout / session destruction).
    async fn clear(&self, session: &SessionId) -> Result<()>;
}
