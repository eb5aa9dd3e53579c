//! scribe-api - HTTP API for the scribe notes service
//!
//! The router is built here so tests can drive it in-process; `main.rs`
//! only wires configuration, logging, and the listener.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query_types;

use std::sync::Arc;

use axum::{
    http::Request,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use scribe_core::NoteRepository;
use scribe_db::Database;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
}

impl AppState {
    pub fn new(notes: impl NoteRepository + 'static) -> Self {
        Self {
            notes: Arc::new(notes),
        }
    }

    pub fn from_database(db: &Database) -> Self {
        Self::new(db.notes.clone())
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Any origin, any method, any header, credentials allowed.
///
/// Origin, methods, and headers are mirrored from the request because
/// browsers reject a `*` wildcard together with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
    use handlers::*;

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // Notes CRUD; collection paths answer with and without the trailing slash
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/", get(list_notes).post(create_note))
        .route("/notes/search", get(search_notes))
        .route("/notes/search/", get(search_notes))
        .route("/notes/recent", get(recent_notes))
        .route("/notes/recent/", get(recent_notes))
        .route(
            "/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer())
        .with_state(state)
}
