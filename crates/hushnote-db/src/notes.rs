//! Note repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use hushnote_core::{
    CreateNoteRequest, Error, Note, NoteQuery, NoteRepository, Result, UpdateNoteRequest,
};

use crate::escape_like;

const NOTE_COLUMNS: &str =
    "id, owner, title, description, tag, color, is_hidden, is_deleted, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository.
///
/// Filter semantics mirror `NoteFilter::matches`: `LOWER(..) = LOWER(..)`
/// for the exact tag/color constraints and `ILIKE` with escaped wildcards
/// for the OR-across-fields search.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, owner: Uuid, req: CreateNoteRequest) -> Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO note (id, owner, title, description, tag, color, is_hidden) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(owner)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.tag)
        .bind(&req.color)
        .bind(req.is_hidden)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(id)
    }

    async fn update(&self, id: Uuid, owner: Uuid, req: UpdateNoteRequest) -> Result<()> {
        let result = sqlx::query(
            "UPDATE note \
             SET title = $3, description = $4, tag = $5, color = $6, is_hidden = $7, \
                 updated_at = now() \
             WHERE id = $1 AND owner = $2 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(owner)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.tag)
        .bind(&req.color)
        .bind(req.is_hidden)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }

    async fn fetch(&self, id: Uuid, owner: Uuid) -> Result<Note> {
        sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM note \
             WHERE id = $1 AND owner = $2 AND is_deleted = FALSE"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))
    }

    async fn list(&self, query: &NoteQuery) -> Result<Vec<Note>> {
        let mut sql = format!(
            "SELECT {NOTE_COLUMNS} FROM note \
             WHERE owner = $1 AND is_deleted = FALSE AND is_hidden = $2 "
        );
        let mut param_idx = 3;

        if query.filter.tag.is_some() {
            sql.push_str(&format!("AND LOWER(tag) = LOWER(${param_idx}) "));
            param_idx += 1;
        }
        if query.filter.color.is_some() {
            sql.push_str(&format!("AND LOWER(color) = LOWER(${param_idx}) "));
            param_idx += 1;
        }
        let search_pattern = query.filter.search.as_deref().and_then(|s| {
            if s.trim().is_empty() {
                None
            } else {
                Some(format!("%{}%", escape_like(s)))
            }
        });
        if search_pattern.is_some() {
            sql.push_str(&format!(
                "AND (title ILIKE ${param_idx} ESCAPE '\\' \
                 OR description ILIKE ${param_idx} ESCAPE '\\' \
                 OR tag ILIKE ${param_idx} ESCAPE '\\') "
            ));
        }
        sql.push_str("ORDER BY updated_at DESC");

        let mut q = sqlx::query_as::<_, Note>(&sql)
            .bind(query.owner)
            .bind(query.hidden);
        if let Some(tag) = &query.filter.tag {
            q = q.bind(tag);
        }
        if let Some(color) = &query.filter.color {
            q = q.bind(color);
        }
        if let Some(pattern) = &search_pattern {
            q = q.bind(pattern);
        }

        q.fetch_all(&self.pool).await.map_err(Error::Database)
    }

    async fn distinct_tags(
        &self,
        owner: Uuid,
        hidden: bool,
        color: Option<&str>,
    ) -> Result<Vec<String>> {
        let mut sql = String::from(
            "SELECT DISTINCT tag FROM note \
             WHERE owner = $1 AND is_deleted = FALSE AND is_hidden = $2 \
             AND tag IS NOT NULL AND tag <> '' ",
        );
        if color.is_some() {
            sql.push_str("AND LOWER(color) = LOWER($3) ");
        }
        sql.push_str("ORDER BY tag");

        let mut q = sqlx::query_scalar::<_, String>(&sql)
            .bind(owner)
            .bind(hidden);
        if let Some(color) = color {
            q = q.bind(color);
        }
        q.fetch_all(&self.pool).await.map_err(Error::Database)
    }

    async fn distinct_colors(
        &self,
        owner: Uuid,
        hidden: bool,
        tag: Option<&str>,
    ) -> Result<Vec<String>> {
        let mut sql = String::from(
            "SELECT DISTINCT color FROM note \
             WHERE owner = $1 AND is_deleted = FALSE AND is_hidden = $2 \
             AND color IS NOT NULL AND color <> '' ",
        );
        if tag.is_some() {
            sql.push_str("AND LOWER(tag) = LOWER($3) ");
        }
        sql.push_str("ORDER BY color");

        let mut q = sqlx::query_scalar::<_, String>(&sql)
            .bind(owner)
            .bind(hidden);
        if let Some(tag) = tag {
            q = q.bind(tag);
        }
        q.fetch_all(&self.pool).await.map_err(Error::Database)
    }

    async fn soft_delete(&self, id: Uuid, owner: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE note SET is_deleted = TRUE \
             WHERE id = $1 AND owner = $2 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }
}
