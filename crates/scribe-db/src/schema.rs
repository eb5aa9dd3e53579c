//! Table bootstrap.
//!
//! There are no migrations: the single `note` table is created if missing
//! before the server accepts traffic.

use sqlx::PgPool;
use tracing::info;

use scribe_core::{Error, Result};

/// DDL for the note table. Safe to run repeatedly.
pub const CREATE_NOTE_TABLE: &str = "CREATE TABLE IF NOT EXISTS note (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL
)";

/// Create the note table if it does not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_NOTE_TABLE)
        .execute(pool)
        .await
        .map_err(Error::Database)?;

    info!(
        subsystem = "database",
        component = "schema",
        op = "ensure",
        db_table = "note",
        "Note table ready"
    );
    Ok(())
}
