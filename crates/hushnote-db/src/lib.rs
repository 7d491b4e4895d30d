//! # hushnote-db
//!
//! PostgreSQL database layer for hushnote.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for notes, note images, and profiles
//! - Partition-scoped filtered note queries with facet (distinct-value)
//!   support
//!
//! ## Example
//!
//! ```rust,ignore
//! use hushnote_db::Database;
//! use hushnote_core::{CreateNoteRequest, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/hushnote").await?;
//!
//!     let note_id = db.notes.insert(owner, CreateNoteRequest {
//!         title: "Groceries".to_string(),
//!         description: "milk and eggs".to_string(),
//!         tag: Some("home".to_string()),
//!         color: Some("#ff0000".to_string()),
//!         is_hidden: false,
//!     }).await?;
//!
//!     println!("Created note: {}", note_id);
//!     Ok(())
//! }
//! ```

pub mod images;
pub mod notes;
pub mod pool;
pub mod profiles;

// Re-export core types
pub use hushnote_core::*;

// Re-export repository implementations
pub use images::PgNoteImageRepository;
pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use profiles::PgProfileRepository;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository for CRUD and partition-scoped queries.
    pub notes: PgNoteRepository,
    /// Note image repository.
    pub images: PgNoteImageRepository,
    /// Profile repository (PIN credential store).
    pub profiles: PgProfileRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            images: PgNoteImageRepository::new(pool.clone()),
            profiles: PgProfileRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
