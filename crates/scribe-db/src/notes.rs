//! Note repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Transaction};
use tracing::debug;

use scribe_core::{CreateNote, Error, Note, NoteRepository, Result, UpdateNote, Window};

use crate::escape_like;

/// PostgreSQL implementation of NoteRepository.
///
/// Each trait method runs in its own transaction: committed on success,
/// rolled back and returned to the pool when dropped on any error path.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(Error::Database)
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: CreateNote) -> Result<Note> {
        let mut tx = self.begin().await?;
        let note = self.insert_tx(&mut tx, req).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn list(&self, window: Window) -> Result<Vec<Note>> {
        let mut tx = self.begin().await?;
        let notes = self.list_tx(&mut tx, window).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(notes)
    }

    async fn fetch(&self, id: i64) -> Result<Note> {
        let mut tx = self.begin().await?;
        let note = self.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn update(&self, id: i64, req: UpdateNote) -> Result<Note> {
        let mut tx = self.begin().await?;
        let note = self.update_tx(&mut tx, id, req).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn delete(&self, id: i64) -> Result<Note> {
        let mut tx = self.begin().await?;
        let note = self.delete_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>> {
        let mut tx = self.begin().await?;
        let notes = self.search_tx(&mut tx, query).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(notes)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Note>> {
        let mut tx = self.begin().await?;
        let notes = self.recent_tx(&mut tx, limit).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(notes)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

// =============================================================================
// TRANSACTION-AWARE VARIANTS
// =============================================================================

/// Transaction-aware variants.
///
/// These accept an existing transaction so several operations can be
/// composed inside one unit of work.
impl PgNoteRepository {
    /// Insert a note within an existing transaction.
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        req: CreateNote,
    ) -> Result<Note> {
        let start = Instant::now();
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO note (title, content) VALUES ($1, $2) RETURNING id, title, content",
        )
        .bind(&req.title)
        .bind(&req.content)
        .fetch_one(&mut **tx)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "insert",
            note_id = note.id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Note inserted"
        );
        Ok(note)
    }

    /// List notes in insertion order within an existing transaction.
    ///
    /// A `NULL` limit is `LIMIT ALL` in PostgreSQL.
    pub async fn list_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: Window,
    ) -> Result<Vec<Note>> {
        let start = Instant::now();
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, title, content FROM note ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(window.offset)
        .bind(window.limit)
        .fetch_all(&mut **tx)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "list",
            offset = window.offset,
            limit = ?window.limit,
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Notes listed"
        );
        Ok(notes)
    }

    /// Fetch a note within an existing transaction.
    pub async fn fetch_tx(&self, tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<Note> {
        sqlx::query_as::<_, Note>("SELECT id, title, content FROM note WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))
    }

    /// Apply a partial update within an existing transaction.
    ///
    /// The row is locked and checked for existence before any field is
    /// applied; only fields present in `req` change.
    pub async fn update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        req: UpdateNote,
    ) -> Result<Note> {
        let start = Instant::now();
        let mut note =
            sqlx::query_as::<_, Note>("SELECT id, title, content FROM note WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(Error::Database)?
                .ok_or(Error::NoteNotFound(id))?;

        if req.is_empty() {
            return Ok(note);
        }
        req.apply_to(&mut note);

        let note = sqlx::query_as::<_, Note>(
            "UPDATE note SET title = $1, content = $2 WHERE id = $3 RETURNING id, title, content",
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(id)
        .fetch_one(&mut **tx)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "update",
            note_id = id,
            title_changed = req.title.is_some(),
            content_changed = req.content.is_some(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Note updated"
        );
        Ok(note)
    }

    /// Delete a note within an existing transaction, returning the removed row.
    pub async fn delete_tx(&self, tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<Note> {
        let note = sqlx::query_as::<_, Note>(
            "DELETE FROM note WHERE id = $1 RETURNING id, title, content",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "delete",
            note_id = id,
            "Note deleted"
        );
        Ok(note)
    }

    /// Substring search over title and content within an existing transaction.
    ///
    /// `query` is matched literally: LIKE wildcards in it are escaped.
    /// Case sensitivity follows the column collation.
    pub async fn search_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        query: &str,
    ) -> Result<Vec<Note>> {
        let start = Instant::now();
        let pattern = format!("%{}%", escape_like(query));
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, title, content FROM note
             WHERE title LIKE $1 ESCAPE '\\' OR content LIKE $1 ESCAPE '\\'
             ORDER BY id",
        )
        .bind(&pattern)
        .fetch_all(&mut **tx)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "search",
            query = %query,
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Notes searched"
        );
        Ok(notes)
    }

    /// Newest notes first within an existing transaction.
    pub async fn recent_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<Note>> {
        let window = Window::first(limit);
        sqlx::query_as::<_, Note>("SELECT id, title, content FROM note ORDER BY id DESC LIMIT $1")
            .bind(window.limit)
            .fetch_all(&mut **tx)
            .await
            .map_err(Error::Database)
    }
}
