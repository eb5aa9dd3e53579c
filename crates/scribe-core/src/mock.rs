//! In-memory note repository for deterministic testing.
//!
//! Mirrors the PostgreSQL repository's observable behavior: ids start at 1
//! and are never reused, listing is in id order, search is a case-sensitive
//! substring match over title and content. PostgreSQL `TEXT` cannot hold
//! NUL, so text containing `\0` fails here with a store error as well.
//!
//! Only compiled under the `mock` feature (and this crate's own tests).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scribe_core::{CreateNote, MockNoteRepository, NoteRepository};
//!
//! let repo = MockNoteRepository::new();
//! let note = repo
//!     .insert(CreateNote { title: "A".into(), content: "B".into() })
//!     .await?;
//! assert_eq!(note.id, 1);
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{CreateNote, Note, UpdateNote, Window};
use crate::traits::NoteRepository;

#[derive(Debug, Default)]
struct MockStore {
    notes: Vec<Note>,
    last_id: i64,
}

/// Mock note repository backed by a `Vec`.
#[derive(Clone, Default)]
pub struct MockNoteRepository {
    store: Arc<Mutex<MockStore>>,
    fail_with: Option<Arc<str>>,
}

impl MockNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail as if the store were unreachable.
    pub fn failing(message: &str) -> Self {
        Self {
            store: Arc::default(),
            fail_with: Some(Arc::from(message)),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, MockStore>> {
        if let Some(message) = &self.fail_with {
            return Err(Error::Database(sqlx::Error::Protocol(message.to_string())));
        }
        // A poisoned lock only means another test thread panicked mid-write.
        Ok(self.store.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

fn check_text<'a>(fields: impl IntoIterator<Item = &'a str>) -> Result<()> {
    if fields.into_iter().any(|f| f.contains('\0')) {
        return Err(Error::Database(sqlx::Error::Protocol(
            "invalid byte sequence for encoding \"UTF8\": 0x00".to_string(),
        )));
    }
    Ok(())
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn insert(&self, req: CreateNote) -> Result<Note> {
        let mut store = self.store()?;
        check_text([req.title.as_str(), req.content.as_str()])?;
        store.last_id += 1;
        let note = Note {
            id: store.last_id,
            title: req.title,
            content: req.content,
        };
        store.notes.push(note.clone());
        Ok(note)
    }

    async fn list(&self, window: Window) -> Result<Vec<Note>> {
        let store = self.store()?;
        Ok(window.slice(store.notes.iter().cloned()))
    }

    async fn fetch(&self, id: i64) -> Result<Note> {
        let store = self.store()?;
        store
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn update(&self, id: i64, req: UpdateNote) -> Result<Note> {
        let mut store = self.store()?;
        let note = store
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;
        check_text(req.title.iter().chain(req.content.iter()).map(String::as_str))?;
        req.apply_to(note);
        Ok(note.clone())
    }

    async fn delete(&self, id: i64) -> Result<Note> {
        let mut store = self.store()?;
        let pos = store
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;
        Ok(store.notes.remove(pos))
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>> {
        let store = self.store()?;
        Ok(store
            .notes
            .iter()
            .filter(|n| n.title.contains(query) || n.content.contains(query))
            .cloned()
            .collect())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Note>> {
        let store = self.store()?;
        Ok(Window::first(limit).slice(store.notes.iter().rev().cloned()))
    }

    async fn ping(&self) -> Result<()> {
        self.store().map(|_| ())
    }
}
