//! In-process router tests against the in-memory repository.
//!
//! No database is needed; every request goes through the full middleware
//! stack via `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use scribe_api::{create_router, AppState};
use scribe_core::MockNoteRepository;

fn app_with(repo: MockNoteRepository) -> Router {
    create_router(AppState::new(repo))
}

fn app() -> Router {
    app_with(MockNoteRepository::new())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, title: &str, content: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/notes/",
        Some(json!({ "title": title, "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_root_banner() {
    let (status, body) = send(&app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome to the Notes API" }));
}

#[tokio::test]
async fn test_note_lifecycle() {
    let app = app();

    let created = create(&app, "A", "B").await;
    assert_eq!(created, json!({ "id": 1, "title": "A", "content": "B" }));

    let (status, updated) = send(&app, Method::PUT, "/notes/1", Some(json!({ "content": "C" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "id": 1, "title": "A", "content": "C" }));

    let (status, fetched) = send(&app, Method::GET, "/notes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, deleted) = send(&app, Method::DELETE, "/notes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, updated);

    let (status, body) = send(&app, Method::GET, "/notes/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Note not found" }));
}

#[tokio::test]
async fn test_missing_note_is_not_found_for_every_verb() {
    let app = app();
    for method in [Method::GET, Method::DELETE] {
        let (status, _) = send(&app, method, "/notes/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    let (status, _) = send(&app, Method::PUT, "/notes/42", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_update_returns_note_unchanged() {
    let app = app();
    let created = create(&app, "keep", "me").await;

    let (status, body) = send(&app, Method::PUT, "/notes/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_create_rejects_missing_title() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/notes/", Some(json!({ "content": "x" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    // Nothing was stored
    let (_, list) = send(&app, Method::GET, "/notes/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_rejects_wrong_type() {
    let (status, _) = send(
        &app(),
        Method::POST,
        "/notes/",
        Some(json!({ "title": 5, "content": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_rejects_wrong_type() {
    let app = app();
    create(&app, "A", "B").await;
    let (status, _) = send(&app, Method::PUT, "/notes/1", Some(json!({ "title": [] }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_non_integer_id_is_unprocessable() {
    let (status, body) = send(&app(), Method::GET, "/notes/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_window() {
    let app = app();
    for i in 1..=3 {
        create(&app, &format!("t{i}"), "c").await;
    }

    let (_, body) = send(&app, Method::GET, "/notes/", None).await;
    assert_eq!(ids(&body), vec![1, 2, 3]);

    let (_, body) = send(&app, Method::GET, "/notes?skip=1&limit=1", None).await;
    assert_eq!(ids(&body), vec![2]);

    let (_, body) = send(&app, Method::GET, "/notes/?limit=0", None).await;
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, Method::GET, "/notes/?skip=10", None).await;
    assert_eq!(body, json!([]));

    let (status, _) = send(&app, Method::GET, "/notes/?limit=ten", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_default_limit_is_ten() {
    let app = app();
    for i in 1..=12 {
        create(&app, &format!("t{i}"), "c").await;
    }
    let (_, body) = send(&app, Method::GET, "/notes/", None).await;
    assert_eq!(ids(&body), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_search_matches_title_or_content() {
    let app = app();
    create(&app, "Groceries", "milk, eggs").await;
    create(&app, "Work", "finish report").await;
    create(&app, "report card", "school").await;

    let (status, body) = send(&app, Method::GET, "/notes/search/?query=report", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 3]);

    let (_, body) = send(&app, Method::GET, "/notes/search?query=eggs", None).await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = send(&app, Method::GET, "/notes/search/?query=nothing", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_search_requires_query() {
    let (status, body) = send(&app(), Method::GET, "/notes/search/", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_recent_is_newest_first() {
    let app = app();
    for i in 1..=3 {
        create(&app, &format!("t{i}"), "c").await;
    }

    let (status, body) = send(&app, Method::GET, "/notes/recent/?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 2]);

    let (_, body) = send(&app, Method::GET, "/notes/recent", None).await;
    assert_eq!(ids(&body), vec![3, 2, 1]);
}

#[tokio::test]
async fn test_recent_is_not_shadowed_by_id_route() {
    let (status, body) = send(&app(), Method::GET, "/notes/recent", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_store_failure_is_opaque_500() {
    let app = app_with(MockNoteRepository::failing("password authentication failed"));
    let (status, body) = send(&app, Method::GET, "/notes/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_nul_in_title_is_a_store_error() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/notes/",
        Some(json!({ "title": "a\u{0000}b", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));

    let (_, list) = send(&app, Method::GET, "/notes/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let failing = app_with(MockNoteRepository::failing("down"));
    let (status, body) = send(&failing, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "error": "Database unavailable" }));
}

#[tokio::test]
async fn test_cors_mirrors_origin_with_credentials() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/notes/")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_cors_preflight() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/notes/1")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://example.com");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "DELETE");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let id = response.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "caller-supplied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "caller-supplied");
}
