//! Integration tests for the PostgreSQL repositories.
//!
//! These require a provisioned database; they are skipped when
//! `DATABASE_URL` is not set so the rest of the suite runs standalone.

use uuid::Uuid;

use hushnote_core::{
    AttachImageRequest, CreateNoteRequest, Error, NoteFilter, NoteImageRepository, NoteQuery,
    NoteRepository, ProfileRepository,
};
use hushnote_db::Database;

async fn connect() -> Option<Database> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = Database::connect(&url)
        .await
        .expect("Failed to connect to database");
    Some(db)
}

fn note_req(title: &str, tag: Option<&str>, color: Option<&str>, hidden: bool) -> CreateNoteRequest {
    CreateNoteRequest {
        title: title.to_string(),
        description: format!("{title} body"),
        tag: tag.map(String::from),
        color: color.map(String::from),
        is_hidden: hidden,
    }
}

#[tokio::test]
async fn test_note_partition_filter_and_facets() {
    let Some(db) = connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let owner = Uuid::new_v4();

    db.notes
        .insert(owner, note_req("Groceries", Some("home"), Some("#ff0000"), false))
        .await
        .unwrap();
    db.notes
        .insert(owner, note_req("Secret", Some("work"), Some("#00ff00"), true))
        .await
        .unwrap();
    db.notes
        .insert(owner, note_req("Todo", Some("home"), Some("#0000ff"), false))
        .await
        .unwrap();

    let query = NoteQuery {
        owner,
        hidden: false,
        filter: NoteFilter::new().with_tag("HOME"),
    };
    let notes = db.notes.list(&query).await.unwrap();
    let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Groceries"));
    assert!(titles.contains(&"Todo"));

    let colors = db
        .notes
        .distinct_colors(owner, false, Some("home"))
        .await
        .unwrap();
    assert_eq!(colors, vec!["#0000ff", "#ff0000"]);

    // The hidden partition never bleeds into visible facets.
    let tags = db.notes.distinct_tags(owner, false, None).await.unwrap();
    assert_eq!(tags, vec!["home"]);
}

#[tokio::test]
async fn test_search_matches_tag_and_escapes_wildcards() {
    let Some(db) = connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let owner = Uuid::new_v4();

    db.notes
        .insert(owner, note_req("Groceries", Some("errands"), None, false))
        .await
        .unwrap();
    db.notes
        .insert(owner, note_req("Discount 50% off", None, None, false))
        .await
        .unwrap();

    // OR-across-fields: the term only appears in the tag.
    let query = NoteQuery {
        owner,
        hidden: false,
        filter: NoteFilter::new().with_search("errand"),
    };
    assert_eq!(db.notes.list(&query).await.unwrap().len(), 1);

    // `%` in the term is literal, not a wildcard.
    let query = NoteQuery {
        owner,
        hidden: false,
        filter: NoteFilter::new().with_search("50% off"),
    };
    let notes = db.notes.list(&query).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Discount 50% off");
}

#[tokio::test]
async fn test_soft_delete_excludes_everywhere() {
    let Some(db) = connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let owner = Uuid::new_v4();
    let id = db
        .notes
        .insert(owner, note_req("Ephemeral", Some("tmp"), Some("#123456"), false))
        .await
        .unwrap();

    db.notes.soft_delete(id, owner).await.unwrap();

    let err = db.notes.fetch(id, owner).await.unwrap_err();
    assert!(matches!(err, Error::NoteNotFound(_)));
    assert!(db
        .notes
        .distinct_tags(owner, false, None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_image_attach_and_physical_delete() {
    let Some(db) = connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let owner = Uuid::new_v4();
    let note_id = db
        .notes
        .insert(owner, note_req("With image", None, None, false))
        .await
        .unwrap();

    let image_id = db
        .images
        .attach(
            note_id,
            owner,
            AttachImageRequest {
                image_ref: "img/a.png".to_string(),
                width: Some(640),
                height: Some(480),
            },
        )
        .await
        .unwrap();

    assert_eq!(db.images.list_for_note(note_id).await.unwrap().len(), 1);

    // A stranger cannot delete through someone else's note.
    let err = db.images.delete(image_id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::ImageNotFound(_)));

    db.images.delete(image_id, owner).await.unwrap();
    assert!(db.images.list_for_note(note_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_pin_hash_compare_and_swap() {
    let Some(db) = connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let user = Uuid::new_v4();

    // First access creates the row.
    let profile = db.profiles.fetch(user).await.unwrap();
    assert!(profile.pin_hash.is_none());

    db.profiles.set_pin_hash(user, "hash-one").await.unwrap();
    assert!(!db
        .profiles
        .replace_pin_hash(user, "stale", "hash-two")
        .await
        .unwrap());
    assert!(db
        .profiles
        .replace_pin_hash(user, "hash-one", "hash-two")
        .await
        .unwrap());

    let profile = db.profiles.fetch(user).await.unwrap();
    assert_eq!(profile.pin_hash.as_deref(), Some("hash-two"));
}
