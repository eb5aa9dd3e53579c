//! # scribe-db
//!
//! PostgreSQL database layer for scribe.
//!
//! This crate provides:
//! - Connection pool management
//! - Idempotent creation of the `note` table
//! - The PostgreSQL [`NoteRepository`] implementation
//!
//! ## Example
//!
//! ```rust,ignore
//! use scribe_db::{CreateNote, Database, NoteRepository, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect_with_config("postgres://localhost/scribe", PoolConfig::default()).await?;
//!     db.ensure_schema().await?;
//!
//!     let note = db.notes.insert(CreateNote {
//!         title: "Groceries".to_string(),
//!         content: "milk, eggs".to_string(),
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```
pub mod notes;
pub mod pool;
pub mod schema;

// Test fixtures for integration tests
// Always compiled so integration tests (in tests/) of dependent crates can use them
pub mod test_fixtures;

// Re-export core types
pub use scribe_core::*;

pub use notes::PgNoteRepository;
pub use pool::{create_pool_with_config, log_pool_metrics, PoolConfig};
pub use schema::ensure_schema;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context: the shared pool plus repositories over it.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository for CRUD operations.
    pub notes: PgNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Create the note table if it is missing.
    pub async fn ensure_schema(&self) -> Result<()> {
        ensure_schema(&self.pool).await
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
