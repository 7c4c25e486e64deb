/// Flashdeck: A Spaced Repetition Flashcard Library
///
/// This library provides the core functionality for a flashcard trainer:
/// cards grouped into themes and categories, a fixed review schedule,
/// a study session, durable storage and a web API.
///
/// ### Modules
///
/// - `schedule`: Review intervals per level
/// - `models`: Cards, themes and categories
/// - `repo`: Key/value storage of the collection document
/// - `store`: In-memory state and every user operation
/// - `backup`: Periodic JSON snapshots of the collection
///
/// ### Web API
///
/// The library exposes a RESTful API using Axum with the following endpoints:
///
/// - `GET|POST /categories`: List or create categories
/// - `GET|PATCH|DELETE /categories/{id}`: Read, rename or delete a category
/// - `PUT /categories/{id}/current`, `GET /current_category`: Current category
/// - `POST /categories/{id}/themes` and `/categories/{id}/themes/{theme_id}`: Themes
/// - `/categories/{id}/themes/{theme_id}/cards[/{card_id}]`: Cards
/// - `/session`, `/session/answer`, `/session/next`, `/session/flip`: Studying
/// - `GET /export`, `PUT /import`: Whole collection transfer

/// Periodic backup module
pub mod backup;

/// Configuration module
pub mod config;

/// Database connection module
pub mod db;

/// Data transfer objects module
pub mod dto;

/// API error module
pub mod errors;

/// Web API handlers module
pub mod handlers;

/// Logging setup module
pub mod logging;

/// Data models module
pub mod models;

/// Repository module for database operations
pub mod repo;

/// Review schedule module
pub mod schedule;

/// Database schema module
pub mod schema;

/// Application state module
pub mod store;

#[cfg(test)]
pub mod test_utils;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use handlers::*;
use store::Store;

/// Embedded database migrations
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Shared state of the web application
///
/// Every request locks the store for the duration of one operation, so
/// operations never interleave.
pub struct AppState {
    pub store: Mutex<Store>,
}

impl AppState {
    /// Loads the state from the collection document in storage
    pub fn load(pool: Arc<db::DbPool>) -> Self {
        Self {
            store: Mutex::new(Store::load(pool)),
        }
    }
}

/// Creates the application router with all API routes
///
/// ### Arguments
///
/// * `state` - The shared application state
///
/// ### Returns
///
/// An Axum router configured with all API routes
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/categories", get(list_categories_handler).post(create_category_handler))
        .route(
            "/categories/{id}",
            get(get_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        )
        .route("/categories/{id}/current", put(set_current_category_handler))
        .route("/current_category", get(get_current_category_handler))
        .route("/categories/{category_id}/themes", post(create_theme_handler))
        .route(
            "/categories/{category_id}/themes/{theme_id}",
            get(get_theme_handler)
                .patch(update_theme_handler)
                .delete(delete_theme_handler),
        )
        .route(
            "/categories/{category_id}/themes/{theme_id}/cards",
            get(list_cards_handler).post(create_card_handler),
        )
        .route(
            "/categories/{category_id}/themes/{theme_id}/cards/{card_id}",
            patch(update_card_handler).delete(delete_card_handler),
        )
        .route(
            "/session",
            get(get_session_handler)
                .post(start_session_handler)
                .delete(end_session_handler),
        )
        .route("/session/answer", post(answer_card_handler))
        .route("/session/next", post(next_card_handler))
        .route("/session/flip", post(flip_card_handler))
        .route("/export", get(export_handler))
        .route("/import", put(import_handler))
        .layer(cors)
        .with_state(state)
}

/// Runs all pending database migrations
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    Ok(())
}
