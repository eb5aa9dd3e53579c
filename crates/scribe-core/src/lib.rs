//! # scribe-core
//!
//! Core types, contracts, and abstractions for the scribe notes service.
//!
//! This crate provides the Note data contracts, the error taxonomy, and the
//! repository trait that the database and HTTP crates build on.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockNoteRepository;
pub use models::*;
pub use traits::*;
