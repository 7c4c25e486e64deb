use axum::{extract::State, Json};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::models::Category;
use crate::AppState;

/// Handler for exporting the whole collection
///
/// This function handles GET requests to `/export`. The body has the same
/// shape as the stored document.
#[instrument(skip(state))]
pub async fn export_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.store.lock().await.categories().to_vec();
    info!("Exporting {} categories", categories.len());
    Ok(Json(categories))
}

/// Checks that ids are unique among siblings at every level
fn validate_import(categories: &[Category]) -> Result<(), ApiError> {
    let mut category_ids = HashSet::new();
    for category in categories {
        if !category_ids.insert(category.get_id()) {
            return Err(ApiError::InvalidInput(format!("Duplicate category id {}", category.get_id())));
        }

        let mut theme_ids = HashSet::new();
        for theme in category.get_themes() {
            if !theme_ids.insert(theme.get_id()) {
                return Err(ApiError::InvalidInput(format!(
                    "Duplicate theme id {} in category {}",
                    theme.get_id(),
                    category.get_id()
                )));
            }

            let mut card_ids = HashSet::new();
            for card in theme.get_cards() {
                if !card_ids.insert(card.get_id()) {
                    return Err(ApiError::InvalidInput(format!(
                        "Duplicate card id {} in theme {}",
                        card.get_id(),
                        theme.get_id()
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Handler for replacing the whole collection
///
/// This function handles PUT requests to `/import`. Any running session is
/// ended and the current category is cleared.
#[instrument(skip(state, payload), fields(count = payload.len()))]
pub async fn import_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Vec<Category>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    validate_import(&payload)?;

    let mut store = state.store.lock().await;
    store.replace_all(payload);

    Ok(Json(store.categories().to_vec()))
}
