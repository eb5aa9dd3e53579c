//! Core traits for scribe abstractions.
//!
//! The HTTP layer talks to storage only through [`NoteRepository`], so the
//! PostgreSQL implementation and the in-memory mock are interchangeable.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CreateNote, Note, UpdateNote, Window};

/// Repository for note CRUD operations.
///
/// Every method is one unit of work against the store. Methods addressing a
/// single id return [`crate::Error::NoteNotFound`] when no row matches.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note; the store assigns its id.
    async fn insert(&self, req: CreateNote) -> Result<Note>;

    /// List notes in insertion order, restricted to `window`.
    async fn list(&self, window: Window) -> Result<Vec<Note>>;

    /// Fetch a single note.
    async fn fetch(&self, id: i64) -> Result<Note>;

    /// Apply a partial update. The note must exist before any field changes.
    async fn update(&self, id: i64, req: UpdateNote) -> Result<Note>;

    /// Remove a note, returning its state just before removal.
    async fn delete(&self, id: i64) -> Result<Note>;

    /// Notes whose title or content contains `query` as a substring.
    async fn search(&self, query: &str) -> Result<Vec<Note>>;

    /// Most recently created notes first.
    async fn recent(&self, limit: i64) -> Result<Vec<Note>>;

    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}
