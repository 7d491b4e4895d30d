//! In-memory reference implementations of the repository traits.
//!
//! These back the engine, gate, and controller tests across the workspace
//! and double as the executable reference for the filter semantics: the
//! list query delegates to [`NoteFilter::matches`](crate::filter::NoteFilter),
//! which the SQL layer must agree with.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::*;
use crate::traits::*;

// =============================================================================
// NOTES
// =============================================================================

/// In-memory note repository.
#[derive(Default)]
pub struct MemoryNoteRepository {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNoteRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift a note's `updated_at` into the past (test ordering control).
    pub async fn backdate(&self, id: Uuid, by: Duration) {
        let mut notes = self.notes.write().await;
        if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
            note.updated_at = note.updated_at - by;
        }
    }
}

/// Case-insensitive equality used by the facet constraint.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, owner: Uuid, req: CreateNoteRequest) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.notes.write().await.push(Note {
            id,
            owner,
            title: req.title,
            description: req.description,
            tag: req.tag,
            color: req.color,
            is_hidden: req.is_hidden,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update(&self, id: Uuid, owner: Uuid, req: UpdateNoteRequest) -> Result<()> {
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id && n.owner == owner && !n.is_deleted)
            .ok_or(Error::NoteNotFound(id))?;
        note.title = req.title;
        note.description = req.description;
        note.tag = req.tag;
        note.color = req.color;
        note.is_hidden = req.is_hidden;
        note.updated_at = Utc::now();
        Ok(())
    }

    async fn fetch(&self, id: Uuid, owner: Uuid) -> Result<Note> {
        self.notes
            .read()
            .await
            .iter()
            .find(|n| n.id == id && n.owner == owner && !n.is_deleted)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn list(&self, query: &NoteQuery) -> Result<Vec<Note>> {
        let mut result: Vec<Note> = self
            .notes
            .read()
            .await
            .iter()
            .filter(|n| {
                n.owner == query.owner
                    && !n.is_deleted
                    && n.is_hidden == query.hidden
                    && query.filter.matches(n)
            })
            .cloned()
            .collect();
        // Stable sort: equal timestamps keep insertion order.
        result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(result)
    }

    async fn distinct_tags(
        &self,
        owner: Uuid,
        hidden: bool,
        color: Option<&str>,
    ) -> Result<Vec<String>> {
        let notes = self.notes.read().await;
        let values: BTreeSet<String> = notes
            .iter()
            .filter(|n| n.owner == owner && !n.is_deleted && n.is_hidden == hidden)
            .filter(|n| match color {
                Some(c) => n.color.as_deref().is_some_and(|v| eq_ignore_case(v, c)),
                None => true,
            })
            .filter_map(|n| n.tag.clone())
            .filter(|t| !t.is_empty())
            .collect();
        Ok(values.into_iter().collect())
    }

    async fn distinct_colors(
        &self,
        owner: Uuid,
        hidden: bool,
        tag: Option<&str>,
    ) -> Result<Vec<String>> {
        let notes = self.notes.read().await;
        let values: BTreeSet<String> = notes
            .iter()
            .filter(|n| n.owner == owner && !n.is_deleted && n.is_hidden == hidden)
            .filter(|n| match tag {
                Some(t) => n.tag.as_deref().is_some_and(|v| eq_ignore_case(v, t)),
                None => true,
            })
            .filter_map(|n| n.color.clone())
            .filter(|c| !c.is_empty())
            .collect();
        Ok(values.into_iter().collect())
    }

    async fn soft_delete(&self, id: Uuid, owner: Uuid) -> Result<()> {
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id && n.owner == owner && !n.is_deleted)
            .ok_or(Error::NoteNotFound(id))?;
        note.is_deleted = true;
        Ok(())
    }
}

// =============================================================================
// NOTE IMAGES
// =============================================================================

/// In-memory note image repository.
///
/// Holds a handle to the note repository so ownership can be enforced the
/// way the SQL layer does it with a join.
pub struct MemoryNoteImageRepository {
    notes: Arc<MemoryNoteRepository>,
    images: RwLock<Vec<NoteImage>>,
}

impl MemoryNoteImageRepository {
    /// Create an image repository over the given note store.
    pub fn new(notes: Arc<MemoryNoteRepository>) -> Self {
        Self {
            notes,
            images: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NoteImageRepository for MemoryNoteImageRepository {
    async fn attach(&self, note_id: Uuid, owner: Uuid, req: AttachImageRequest) -> Result<Uuid> {
        // Ownership check through the note.
        self.notes.fetch(note_id, owner).await?;

        let id = Uuid::new_v4();
        self.images.write().await.push(NoteImage {
            id,
            note_id,
            image_ref: req.image_ref,
            width: req.width,
            height: req.height,
        });
        Ok(id)
    }

    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<NoteImage>> {
        Ok(self
            .images
            .read()
            .await
            .iter()
            .filter(|img| img.note_id == note_id)
            .cloned()
            .collect())
    }

    async fn list_for_notes(&self, note_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<NoteImage>>> {
        let images = self.images.read().await;
        let mut grouped: HashMap<Uuid, Vec<NoteImage>> = HashMap::new();
        for img in images.iter() {
            if note_ids.contains(&img.note_id) {
                grouped.entry(img.note_id).or_default().push(img.clone());
            }
        }
        Ok(grouped)
    }

    async fn delete(&self, image_id: Uuid, owner: Uuid) -> Result<()> {
        let note_id = {
            let images = self.images.read().await;
            images
                .iter()
                .find(|img| img.id == image_id)
                .map(|img| img.note_id)
                .ok_or(Error::ImageNotFound(image_id))?
        };

        // Owner scoping through the image's note.
        self.notes
            .fetch(note_id, owner)
            .await
            .map_err(|_| Error::ImageNotFound(image_id))?;

        self.images.write().await.retain(|img| img.id != image_id);
        Ok(())
    }
}

// =============================================================================
// PROFILES
// =============================================================================

/// In-memory profile repository.
#[derive(Default)]
pub struct MemoryProfileRepository {
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl MemoryProfileRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn fetch(&self, user_id: Uuid) -> Result<Profile> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles
            .entry(user_id)
            .or_insert_with(|| Profile {
                user_id,
                pin_hash: None,
                picture_ref: None,
            })
            .clone())
    }

    async fn set_pin_hash(&self, user_id: Uuid, hash: &str) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        profiles
            .entry(user_id)
            .or_insert_with(|| Profile {
                user_id,
                pin_hash: None,
                picture_ref: None,
            })
            .pin_hash = Some(hash.to_string());
        Ok(())
    }

    async fn replace_pin_hash(
        &self,
        user_id: Uuid,
        current_hash: &str,
        new_hash: &str,
    ) -> Result<bool> {
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(&user_id) {
            Some(profile) if profile.pin_hash.as_deref() == Some(current_hash) => {
                profile.pin_hash = Some(new_hash.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// =============================================================================
// SESSIONS
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct SessionFlags {
    hidden_unlocked: bool,
}

/// In-process session flag store.
///
/// Session flags are ephemeral: they live exactly as long as the process
/// serving the session. This is the store the server itself runs
/// with, not only a test double.
#[derive(Default)]
pub struct MemorySessionStore {
    flags: RwLock<HashMap<SessionId, SessionFlags>>,
}

impl MemorySessionStore {
    /// Create an empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn hidden_unlocked(&self, session: &SessionId) -> Result<bool> {
        Ok(self
            .flags
            .read()
            .await
            .get(session)
            .map(|f| f.hidden_unlocked)
            .unwrap_or(false))
    }

    async fn set_hidden_unlocked(&self, session: &SessionId, unlocked: bool) -> Result<()> {
        self.flags
            .write()
            .await
            .entry(*session)
            .or_default()
            .hidden_unlocked = unlocked;
        Ok(())
    }

    async fn clear(&self, session: &SessionId) -> Result<()> {
        self.flags.write().await.remove(session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_req(title: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            title: title.to_string(),
            description: String::new(),
            tag: None,
            color: None,
            is_hidden: false,
        }
    }

    #[tokio::test]
    async fn test_fetch_is_owner_scoped() {
        let repo = MemoryNoteRepository::new();
        let owner = Uuid::new_v4();
        let id = repo.insert(owner, note_req("mine")).await.unwrap();

        assert!(repo.fetch(id, owner).await.is_ok());
        let err = repo.fetch(id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::NoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let repo = MemoryNoteRepository::new();
        let owner = Uuid::new_v4();
        let id = repo.insert(owner, note_req("v1")).await.unwrap();
        repo.backdate(id, Duration::minutes(5)).await;
        let before = repo.fetch(id, owner).await.unwrap().updated_at;

        repo.update(
            id,
            owner,
            UpdateNoteRequest {
                title: "v2".to_string(),
                description: String::new(),
                tag: None,
                color: None,
                is_hidden: false,
            },
        )
        .await
        .unwrap();

        let after = repo.fetch(id, owner).await.unwrap();
        assert_eq!(after.title, "v2");
        assert!(after.updated_at > before);
    }

    #[tokio::test]
    async fn test_soft_deleted_note_cannot_be_deleted_again() {
        let repo = MemoryNoteRepository::new();
        let owner = Uuid::new_v4();
        let id = repo.insert(owner, note_req("gone")).await.unwrap();

        repo.soft_delete(id, owner).await.unwrap();
        let err = repo.soft_delete(id, owner).await.unwrap_err();
        assert!(matches!(err, Error::NoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_image_delete_is_owner_scoped() {
        let notes = Arc::new(MemoryNoteRepository::new());
        let images = MemoryNoteImageRepository::new(notes.clone());
        let owner = Uuid::new_v4();
        let note_id = notes.insert(owner, note_req("with image")).await.unwrap();
        let image_id = images
            .attach(
                note_id,
                owner,
                AttachImageRequest {
                    image_ref: "img/1.png".to_string(),
                    width: Some(100),
                    height: Some(100),
                },
            )
            .await
            .unwrap();

        let err = images.delete(image_id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::ImageNotFound(_)));

        images.delete(image_id, owner).await.unwrap();
        assert!(images.list_for_note(note_id).await.unwrap().is_empty());

        // Physically gone: a second delete is a miss.
        let err = images.delete(image_id, owner).await.unwrap_err();
        assert!(matches!(err, Error::ImageNotFound(_)));
    }

    #[tokio::test]
    async fn test_attach_requires_owned_note() {
        let notes = Arc::new(MemoryNoteRepository::new());
        let images = MemoryNoteImageRepository::new(notes.clone());
        let owner = Uuid::new_v4();
        let note_id = notes.insert(owner, note_req("mine")).await.unwrap();

        let err = images
            .attach(
                note_id,
                Uuid::new_v4(),
                AttachImageRequest {
                    image_ref: "img/1.png".to_string(),
                    width: None,
                    height: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_profile_fetch_creates_empty_profile() {
        let repo = MemoryProfileRepository::new();
        let user = Uuid::new_v4();
        let profile = repo.fetch(user).await.unwrap();
        assert_eq!(profile.user_id, user);
        assert!(profile.pin_hash.is_none());
    }

    #[tokio::test]
    async fn test_session_flags_default_locked_and_clear() {
        let store = MemorySessionStore::new();
        let session = SessionId(Uuid::new_v4());

        assert!(!store.hidden_unlocked(&session).await.unwrap());

        store.set_hidden_unlocked(&session, true).await.unwrap();
        assert!(store.hidden_unlocked(&session).await.unwrap());

        store.clear(&session).await.unwrap();
        assert!(!store.hidden_unlocked(&session).await.unwrap());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = MemorySessionStore::new();
        let a = SessionId(Uuid::new_v4());
        let b = SessionId(Uuid::new_v4());

        store.set_hidden_unlocked(&a, true).await.unwrap();
        assert!(store.hidden_unlocked(&a).await.unwrap());
        assert!(!store.hidden_unlocked(&b).await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_pin_hash_is_compare_and_swap() {
        let repo = MemoryProfileRepository::new();
        let user = Uuid::new_v4();
        repo.set_pin_hash(user, "old").await.unwrap();

        assert!(!repo.replace_pin_hash(user, "stale", "new").await.unwrap());
        assert_eq!(
            repo.fetch(user).await.unwrap().pin_hash.as_deref(),
            Some("old")
        );

        assert!(repo.replace_pin_hash(user, "old", "new").await.unwrap());
        assert_eq!(
            repo.fetch(user).await.unwrap().pin_hash.as_deref(),
            Some("new")
        );
    }
}
