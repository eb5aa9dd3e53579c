//! Note data contracts.
//!
//! `Note` is the persisted record and the response shape. `CreateNote` and
//! `UpdateNote` are the inbound contracts, validated by deserialization before
//! anything reaches the store.

use serde::{Deserialize, Serialize};

/// Default page size for listing notes.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Default number of notes returned by the recent view.
pub const DEFAULT_RECENT_LIMIT: i64 = 5;

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Store-assigned identifier, never changes after creation.
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Request body for creating a note. Both fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
}

/// Request body for a partial update.
///
/// A field that is absent (or `null`) leaves the stored value untouched.
/// An empty string is a real value and does overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNote {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdateNote {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Overwrite the supplied fields of `note`, leaving the rest as stored.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
    }
}

/// Offset/limit window after normalization.
///
/// Callers may ask for any window; nothing is rejected. A negative offset is
/// read as zero and a negative limit as "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    /// `None` means unbounded.
    pub limit: Option<i64>,
}

impl Window {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            offset: skip.max(0),
            limit: (limit >= 0).then_some(limit),
        }
    }

    /// Window starting at the first row.
    pub fn first(limit: i64) -> Self {
        Self::new(0, limit)
    }

    /// Apply the window to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX));
        match self.limit {
            Some(limit) => skipped
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => skipped.collect(),
        }
    }
}
