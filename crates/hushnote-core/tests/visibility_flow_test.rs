//! End-to-end flow tests for the visibility controller: PIN gate, session
//! unlock lifecycle, partition isolation, and layout annotation composed
//! over the in-memory repositories.

use std::sync::Arc;

use uuid::Uuid;

use hushnote_core::{
    AttachImageRequest, CreateNoteRequest, Error, MemoryNoteImageRepository, MemoryNoteRepository,
    MemoryProfileRepository, MemorySessionStore, NoteFilter, NoteFilterEngine,
    NoteImageRepository, NoteRepository, NoteVisibilityController, PinGate, PinHasher, Result,
    SessionId,
};

/// Transparent hasher; real Argon2 hashing is covered in hushnote-crypto.
struct FakeHasher;

impl PinHasher for FakeHasher {
    fn hash(&self, raw: &str) -> Result<String> {
        Ok(format!("fake${raw}"))
    }

    fn verify(&self, raw: &str, hash: &str) -> bool {
        hash == format!("fake${raw}")
    }
}

struct Harness {
    controller: NoteVisibilityController,
    gate: Arc<PinGate>,
    notes: Arc<MemoryNoteRepository>,
    images: Arc<MemoryNoteImageRepository>,
    owner: Uuid,
    session: SessionId,
}

fn harness() -> Harness {
    let notes = Arc::new(MemoryNoteRepository::new());
    let images = Arc::new(MemoryNoteImageRepository::new(notes.clone()));
    let profiles = Arc::new(MemoryProfileRepository::new());
    let sessions = Arc::new(MemorySessionStore::new());

    let gate = Arc::new(PinGate::new(Arc::new(FakeHasher), profiles));
    let controller = NoteVisibilityController::new(
        NoteFilterEngine::new(notes.clone()),
        gate.clone(),
        images.clone(),
        sessions,
    );

    Harness {
        controller,
        gate,
        notes,
        images,
        owner: Uuid::new_v4(),
        session: SessionId(Uuid::new_v4()),
    }
}

fn note(title: &str, tag: Option<&str>, hidden: bool) -> CreateNoteRequest {
    CreateNoteRequest {
        title: title.to_string(),
        description: format!("{title} body"),
        tag: tag.map(String::from),
        color: None,
        is_hidden: hidden,
    }
}

#[tokio::test]
async fn hidden_listing_requires_unlock() {
    let h = harness();
    h.notes
        .insert(h.owner, note("Secret", Some("work"), true))
        .await
        .unwrap();

    // Locked session: rejected, nothing leaks.
    let err = h
        .controller
        .list_hidden(h.owner, &h.session, &NoteFilter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AuthFailed(_)));

    // Unlock with the correct PIN, then the listing works.
    h.gate.set_pin(h.owner, "123456").await.unwrap();
    assert!(h
        .controller
        .unlock_hidden(h.owner, &h.session, "123456")
        .await
        .unwrap());

    let listing = h
        .controller
        .list_hidden(h.owner, &h.session, &NoteFilter::new())
        .await
        .unwrap();
    assert!(listing.hidden);
    assert_eq!(listing.notes.len(), 1);
    assert_eq!(listing.notes[0].note.title, "Secret");
}

#[tokio::test]
async fn wrong_pin_does_not_unlock() {
    let h = harness();
    h.gate.set_pin(h.owner, "123456").await.unwrap();

    assert!(!h
        .controller
        .unlock_hidden(h.owner, &h.session, "000000")
        .await
        .unwrap());

    let err = h
        .controller
        .list_hidden(h.owner, &h.session, &NoteFilter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AuthFailed(_)));
}

#[tokio::test]
async fn unlock_without_pin_set_always_fails() {
    let h = harness();

    assert!(!h
        .controller
        .unlock_hidden(h.owner, &h.session, "123456")
        .await
        .unwrap());
}

#[tokio::test]
async fn unlock_persists_until_lock() {
    let h = harness();
    h.gate.set_pin(h.owner, "123456").await.unwrap();
    h.controller
        .unlock_hidden(h.owner, &h.session, "123456")
        .await
        .unwrap();

    // Repeated hidden listings need no re-verification.
    for _ in 0..3 {
        h.controller
            .list_hidden(h.owner, &h.session, &NoteFilter::new())
            .await
            .unwrap();
    }

    // Logout returns the session to LOCKED.
    h.controller.lock(&h.session).await.unwrap();
    let err = h
        .controller
        .list_hidden(h.owner, &h.session, &NoteFilter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AuthFailed(_)));
}

#[tokio::test]
async fn unlock_is_scoped_to_one_session() {
    let h = harness();
    h.gate.set_pin(h.owner, "123456").await.unwrap();
    h.controller
        .unlock_hidden(h.owner, &h.session, "123456")
        .await
        .unwrap();

    let other_session = SessionId(Uuid::new_v4());
    let err = h
        .controller
        .list_hidden(h.owner, &other_session, &NoteFilter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AuthFailed(_)));
}

#[tokio::test]
async fn visible_listing_excludes_hidden_notes_and_facets() {
    let h = harness();
    h.notes
        .insert(h.owner, note("Groceries", Some("home"), false))
        .await
        .unwrap();
    h.notes
        .insert(h.owner, note("Secret", Some("work"), true))
        .await
        .unwrap();

    let listing = h
        .controller
        .list_visible(h.owner, &NoteFilter::new())
        .await
        .unwrap();
    assert!(!listing.hidden);
    assert_eq!(listing.notes.len(), 1);
    assert_eq!(listing.notes[0].note.title, "Groceries");
    assert_eq!(listing.all_tags, vec!["home"]);
}

#[tokio::test]
async fn listing_carries_image_layout() {
    let h = harness();
    let note_id = h
        .notes
        .insert(h.owner, note("Photos", None, false))
        .await
        .unwrap();
    for (w, hgt) in [(100, 100), (100, 200)] {
        h.images
            .attach(
                note_id,
                h.owner,
                AttachImageRequest {
                    image_ref: format!("img/{w}x{hgt}.png"),
                    width: Some(w),
                    height: Some(hgt),
                },
            )
            .await
            .unwrap();
    }

    let listing = h
        .controller
        .list_visible(h.owner, &NoteFilter::new())
        .await
        .unwrap();
    let annotated = &listing.notes[0];
    assert_eq!(annotated.max_height, 806);
    assert_eq!(annotated.images.len(), 2);

    let tallest = annotated
        .images
        .iter()
        .find(|i| i.scaled_height == 806)
        .unwrap();
    assert_eq!(tallest.half_diff, 0);
    let shorter = annotated
        .images
        .iter()
        .find(|i| i.scaled_height == 403)
        .unwrap();
    assert_eq!(shorter.half_diff, 202); // (806 - 403) / 2 = 201.5 → 202
}

#[tokio::test]
async fn malformed_pin_at_unlock_is_a_validation_error() {
    let h = harness();
    h.gate.set_pin(h.owner, "123456").await.unwrap();

    let err = h
        .controller
        .unlock_hidden(h.owner, &h.session, "12345")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
