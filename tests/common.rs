/// Common test utilities for Flashdeck integration tests
///
/// This file contains shared functions for all integration tests: test
/// application setup, a request helper and creators for categories, themes
/// and cards.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use flashdeck::{
    create_app,
    db::{init_pool, DbPool},
    models::{Card, Category, Theme},
    AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service;

/// Creates a connection pool over a fresh, migrated in-memory database
///
/// Every connection of the pool shares the same database, and no two
/// calls share one.
pub fn create_test_pool() -> Arc<DbPool> {
    let database_url = format!("file:itest_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = Arc::new(init_pool(&database_url).unwrap());

    let conn = &mut pool.get().unwrap();
    flashdeck::run_migrations(conn).unwrap();

    pool
}

/// Creates an application over the given pool, loading whatever it stores
pub fn create_test_app_with_pool(pool: Arc<DbPool>) -> Router {
    create_app(Arc::new(AppState::load(pool)))
}

/// Creates a test application with an empty in-memory database
pub fn create_test_app() -> Router {
    create_test_app_with_pool(create_test_pool())
}

/// Sends a request and returns the status with the parsed JSON body
///
/// An empty body comes back as `Value::Null`.
pub async fn send(app: &mut Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.call(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Creates a category via the API
pub async fn create_category(app: &mut Router, name: &str) -> Category {
    let (status, body) = send(app, "POST", "/categories", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

/// Creates a theme via the API
pub async fn create_theme(app: &mut Router, category_id: i64, name: &str) -> Theme {
    let uri = format!("/categories/{}/themes", category_id);
    let (status, body) = send(app, "POST", &uri, Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

/// Creates a card via the API
pub async fn create_card(app: &mut Router, category_id: i64, theme_id: i64, recto: &str, verso: &str) -> Card {
    let uri = format!("/categories/{}/themes/{}/cards", category_id, theme_id);
    let (status, body) = send(app, "POST", &uri, Some(json!({ "recto": recto, "verso": verso }))).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

/// Creates a category with one theme holding the given cards
///
/// ### Returns
///
/// The category and theme ids
#[allow(dead_code)]
pub async fn create_deck(app: &mut Router, cards: &[(&str, &str)]) -> (i64, i64) {
    let category = create_category(app, "Languages").await;
    let theme = create_theme(app, category.get_id(), "German").await;
    for (recto, verso) in cards {
        create_card(app, category.get_id(), theme.get_id(), recto, verso).await;
    }
    (category.get_id(), theme.get_id())
}
