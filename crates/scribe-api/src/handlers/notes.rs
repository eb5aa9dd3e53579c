//! Note HTTP handlers.
//!
//! Each handler validates its input through the `Valid*` extractors, runs
//! exactly one repository operation, and returns the resulting record(s).

use axum::{extract::State, Json};
use tracing::info;

use scribe_core::{CreateNote, Note, UpdateNote, Window};

use crate::error::ApiError;
use crate::extract::{ValidJson, ValidPath, ValidQuery};
use crate::query_types::{ListParams, RecentParams, SearchParams};
use crate::AppState;

/// Create a note; the store assigns its id.
pub async fn create_note(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CreateNote>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.insert(body).await?;
    info!(subsystem = "api", op = "create", note_id = note.id, "Note created");
    Ok(Json(note))
}

/// List notes in insertion order.
///
/// # Query Parameters
/// - `skip`: rows to skip (default 0)
/// - `limit`: maximum rows (default 10)
pub async fn list_notes(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .notes
        .list(Window::new(params.skip, params.limit))
        .await?;
    Ok(Json(notes))
}

pub async fn get_note(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.fetch(id).await?;
    Ok(Json(note))
}

/// Partially update a note. Omitted fields keep their stored values.
///
/// # Returns
/// - 200 OK with the updated note
/// - 404 Not Found if the note does not exist
/// - 422 Unprocessable Entity if the body is malformed
pub async fn update_note(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    ValidJson(body): ValidJson<UpdateNote>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.update(id, body).await?;
    info!(subsystem = "api", op = "update", note_id = id, "Note updated");
    Ok(Json(note))
}

/// Delete a note and return the state it had just before removal.
pub async fn delete_note(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.delete(id).await?;
    info!(subsystem = "api", op = "delete", note_id = id, "Note deleted");
    Ok(Json(note))
}

/// Notes whose title or content contains `query`.
pub async fn search_notes(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<SearchParams>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.search(&params.query).await?;
    Ok(Json(notes))
}

/// Most recently created notes first (default 5).
pub async fn recent_notes(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<RecentParams>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.recent(params.limit).await?;
    Ok(Json(notes))
}
