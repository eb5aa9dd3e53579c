//! HTTP handlers for scribe-api.

pub mod notes;
pub mod system;

pub use notes::{
    create_note, delete_note, get_note, list_notes, recent_notes, search_notes, update_note,
};
pub use system::{health_check, root};
