//! Orchestration of the gate, engine, and layout normalizer for one
//! "list notes" request.
//!
//! This is the only point where the three components are composed;
//! presentation itself lives outside this crate.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::engine::{FilteredNotes, NoteFilterEngine};
use crate::error::{Error, Result};
use crate::filter::NoteFilter;
use crate::layout;
use crate::models::{Note, NoteImage, SessionId};
use crate::pin::PinGate;
use crate::traits::{NoteImageRepository, SessionStore};

/// An image with its computed display layout.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AnnotatedImage {
    #[serde(flatten)]
    pub image: NoteImage,
    pub scaled_height: u32,
    pub half_diff: u32,
}

/// A note with its layout-annotated image set.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AnnotatedNote {
    #[serde(flatten)]
    pub note: Note,
    pub images: Vec<AnnotatedImage>,
    /// Tallest scaled image height for this note (0 without valid images).
    pub max_height: u32,
}

/// The combined bundle returned for a list request.
#[derive(Debug, Clone, Serialize)]
pub struct NoteListing {
    pub notes: Vec<AnnotatedNote>,
    pub all_tags: Vec<String>,
    pub all_colors: Vec<String>,
    pub hidden: bool,
}

/// Composes the PIN gate, the filter engine, and the layout normalizer.
pub struct NoteVisibilityController {
    engine: NoteFilterEngine,
    gate: Arc<PinGate>,
    images: Arc<dyn NoteImageRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl NoteVisibilityController {
    /// Wire the controller from its collaborators.
    pub fn new(
        engine: NoteFilterEngine,
        gate: Arc<PinGate>,
        images: Arc<dyn NoteImageRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            engine,
            gate,
            images,
            sessions,
        }
    }

    /// List the visible partition.
    pub async fn list_visible(&self, owner: Uuid, filter: &NoteFilter) -> Result<NoteListing> {
        self.list(owner, false, filter).await
    }

    /// List the hidden partition.
    ///
    /// Requires the session to be UNLOCKED; a locked session is rejected
    /// before any hidden note or facet is touched, so nothing leaks.
    pub async fn list_hidden(
        &self,
        owner: Uuid,
        session: &SessionId,
        filter: &NoteFilter,
    ) -> Result<NoteListing> {
        if !self.sessions.hidden_unlocked(session).await? {
            return Err(Error::AuthFailed(
                "enter the correct PIN to view hidden notes".to_string(),
            ));
        }
        self.list(owner, true, filter).await
    }

    /// Verify a submitted PIN; on success mark the session UNLOCKED.
    ///
    /// Returns whether the session is now unlocked. A wrong PIN is a normal
    /// `false`; the caller decides how to surface it.
    pub async fn unlock_hidden(
        &self,
        owner: Uuid,
        session: &SessionId,
        raw_pin: &str,
    ) -> Result<bool> {
        let ok = self.gate.verify(owner, raw_pin).await?;
        if ok {
            self.sessions.set_hidden_unlocked(session, true).await?;
            debug!(
                subsystem = "core",
                component = "visibility",
                op = "unlock",
                user_id = %owner,
                "Hidden partition unlocked for session"
            );
        }
        Ok(ok)
    }

    /// Return the session to LOCKED (logout hook).
    pub async fn lock(&self, session: &SessionId) -> Result<()> {
        self.sessions.clear(session).await
    }

    async fn list(&self, owner: Uuid, hidden: bool, filter: &NoteFilter) -> Result<NoteListing> {
        let FilteredNotes {
            notes,
            all_tags,
            all_colors,
        } = self.engine.run(owner, hidden, filter).await?;

        let ids: Vec<Uuid> = notes.iter().map(|n| n.id).collect();
        let mut images_by_note = self.images.list_for_notes(&ids).await?;

        let notes = notes
            .into_iter()
            .map(|note| {
                let images = images_by_note.remove(&note.id).unwrap_or_default();
                annotate(note, images)
            })
            .collect();

        Ok(NoteListing {
            notes,
            all_tags,
            all_colors,
            hidden,
        })
    }
}

/// Attach per-image layout to a note's image set.
fn annotate(note: Note, images: Vec<NoteImage>) -> AnnotatedNote {
    let note_layout = layout::normalize(&images);
    let images = images
        .into_iter()
        .zip(note_layout.images)
        .map(|(image, l)| AnnotatedImage {
            image,
            scaled_height: l.scaled_height,
            half_diff: l.half_diff,
        })
        .collect();
    AnnotatedNote {
        note,
        images,
        max_height: note_layout.max_height,
    }
}
