//! Profile repository implementation (the PIN credential store).

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use hushnote_core::{Error, Profile, ProfileRepository, Result};

/// PostgreSQL implementation of ProfileRepository.
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: Pool<Postgres>,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn fetch(&self, user_id: Uuid) -> Result<Profile> {
        // First access creates the empty row; profiles exist one-per-user.
        sqlx::query("INSERT INTO profile (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        sqlx::query_as::<_, Profile>(
            "SELECT user_id, pin_hash, picture_ref FROM profile WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)
    }

    async fn set_pin_hash(&self, user_id: Uuid, hash: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO profile (user_id, pin_hash) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET pin_hash = EXCLUDED.pin_hash",
        )
        .bind(user_id)
        .bind(hash)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn replace_pin_hash(
        &self,
        user_id: Uuid,
        current_hash: &str,
        new_hash: &str,
    ) -> Result<bool> {
        // Single-statement compare-and-swap: the write only lands if the
        // stored hash is still the one the caller verified against.
        let result = sqlx::query(
            "UPDATE profile SET pin_hash = $3 WHERE user_id = $1 AND pin_hash = $2",
        )
        .bind(user_id)
        .bind(current_hash)
        .bind(new_hash)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() == 1)
    }
}
