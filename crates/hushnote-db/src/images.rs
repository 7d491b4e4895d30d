//! Note image repository implementation.
//!
//! Image deletion is immediate and physical; there is no soft-delete for
//! attachments. Ownership is enforced through a join to the parent note.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use hushnote_core::{AttachImageRequest, Error, NoteImage, NoteImageRepository, Result};

/// PostgreSQL implementation of NoteImageRepository.
#[derive(Clone)]
pub struct PgNoteImageRepository {
    pool: Pool<Postgres>,
}

impl PgNoteImageRepository {
    /// Create a new PgNoteImageRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteImageRepository for PgNoteImageRepository {
    async fn attach(&self, note_id: Uuid, owner: Uuid, req: AttachImageRequest) -> Result<Uuid> {
        let id = Uuid::new_v4();
        // Ownership enforced in the same statement: the insert only happens
        // when a live note with this owner exists.
        let result = sqlx::query(
            "INSERT INTO note_image (id, note_id, image_ref, width, height) \
             SELECT $1, n.id, $3, $4, $5 FROM note n \
             WHERE n.id = $2 AND n.owner = $6 AND n.is_deleted = FALSE",
        )
        .bind(id)
        .bind(note_id)
        .bind(&req.image_ref)
        .bind(req.width)
        .bind(req.height)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(note_id));
        }
        Ok(id)
    }

    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<NoteImage>> {
        sqlx::query_as::<_, NoteImage>(
            "SELECT id, note_id, image_ref, width, height \
             FROM note_image WHERE note_id = $1 ORDER BY id",
        )
        .bind(note_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)
    }

    async fn list_for_notes(&self, note_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<NoteImage>>> {
        if note_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let images = sqlx::query_as::<_, NoteImage>(
            "SELECT id, note_id, image_ref, width, height \
             FROM note_image WHERE note_id = ANY($1) ORDER BY id",
        )
        .bind(note_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut grouped: HashMap<Uuid, Vec<NoteImage>> = HashMap::new();
        for img in images {
            grouped.entry(img.note_id).or_default().push(img);
        }
        Ok(grouped)
    }

    async fn delete(&self, image_id: Uuid, owner: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM note_image i USING note n \
             WHERE i.id = $1 AND i.note_id = n.id AND n.owner = $2",
        )
        .bind(image_id)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::ImageNotFound(image_id));
        }
        Ok(())
    }
}
