use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::dto::CreateCategoryDto;
use crate::errors::ApiError;
use crate::models::{Category, CategoryUpdate};
use crate::AppState;

/// Handler for listing all categories
///
/// This function handles GET requests to `/categories`.
#[instrument(skip(state))]
pub async fn list_categories_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let store = state.store.lock().await;
    let categories = store.categories().to_vec();

    debug!("Retrieved {} categories", categories.len());

    Ok(Json(categories))
}

/// Handler for creating a new category
///
/// This function handles POST requests to `/categories`.
///
/// ### Returns
///
/// The newly created category as JSON
#[instrument(skip(state), fields(name = %payload.name))]
pub async fn create_category_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCategoryDto>,
) -> Result<Json<Category>, ApiError> {
    info!("Creating new category");

    let category = state.store.lock().await.add_category(payload.name)?;

    Ok(Json(category))
}

/// Handler for retrieving a specific category
///
/// This function handles GET requests to `/categories/{id}`.
#[instrument(skip(state))]
pub async fn get_category_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ApiError> {
    let store = state.store.lock().await;
    let category = store.category(id)?.clone();
    Ok(Json(category))
}

/// Handler for renaming a category
///
/// This function handles PATCH requests to `/categories/{id}`.
#[instrument(skip(state))]
pub async fn update_category_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    let category = state.store.lock().await.modify_category(id, payload)?;
    Ok(Json(category))
}

/// Handler for deleting a category and everything in it
///
/// This function handles DELETE requests to `/categories/{id}`.
#[instrument(skip(state))]
pub async fn delete_category_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.lock().await.remove_category(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for selecting the current category
///
/// This function handles PUT requests to `/categories/{id}/current`.
#[instrument(skip(state))]
pub async fn set_current_category_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ApiError> {
    let mut store = state.store.lock().await;
    let category = store.set_current_category(id)?.clone();
    Ok(Json(category))
}

/// Handler for reading the current category
///
/// This function handles GET requests to `/current_category`.
///
/// ### Returns
///
/// The selected category, or null if none is selected
#[instrument(skip(state))]
pub async fn get_current_category_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<Category>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.current_category().cloned()))
}
