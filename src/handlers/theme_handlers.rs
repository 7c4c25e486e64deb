use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::dto::CreateThemeDto;
use crate::errors::ApiError;
use crate::models::{Theme, ThemeUpdate};
use crate::AppState;

/// Handler for creating a theme in a category
///
/// This function handles POST requests to `/categories/{category_id}/themes`.
#[instrument(skip(state), fields(name = %payload.name))]
pub async fn create_theme_handler(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
    Json(payload): Json<CreateThemeDto>,
) -> Result<Json<Theme>, ApiError> {
    info!("Creating new theme");

    let theme = state.store.lock().await.add_theme(category_id, payload.name)?;

    Ok(Json(theme))
}

/// Handler for retrieving a theme with its cards
///
/// This function handles GET requests to `/categories/{category_id}/themes/{theme_id}`.
#[instrument(skip(state))]
pub async fn get_theme_handler(
    State(state): State<Arc<AppState>>,
    Path((category_id, theme_id)): Path<(i64, i64)>,
) -> Result<Json<Theme>, ApiError> {
    let store = state.store.lock().await;
    let theme = store.theme(category_id, theme_id)?.clone();
    Ok(Json(theme))
}

/// Handler for renaming a theme
///
/// This function handles PATCH requests to `/categories/{category_id}/themes/{theme_id}`.
#[instrument(skip(state))]
pub async fn update_theme_handler(
    State(state): State<Arc<AppState>>,
    Path((category_id, theme_id)): Path<(i64, i64)>,
    Json(payload): Json<ThemeUpdate>,
) -> Result<Json<Theme>, ApiError> {
    let theme = state.store.lock().await.modify_theme(category_id, theme_id, payload)?;
    Ok(Json(theme))
}

/// Handler for deleting a theme and its cards
///
/// This function handles DELETE requests to `/categories/{category_id}/themes/{theme_id}`.
#[instrument(skip(state))]
pub async fn delete_theme_handler(
    State(state): State<Arc<AppState>>,
    Path((category_id, theme_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state.store.lock().await.remove_theme(category_id, theme_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_theme_crud() {
        let state = Arc::new(AppState::load(setup_test_db()));
        state.store.lock().await.add_category("Languages".to_string()).unwrap();

        let theme = create_theme_handler(
            State(state.clone()),
            Path(1),
            Json(CreateThemeDto { name: "German".to_string() }),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(theme.get_id(), 1);

        let renamed = update_theme_handler(
            State(state.clone()),
            Path((1, 1)),
            Json(ThemeUpdate { name: Some("Deutsch".to_string()) }),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(renamed.get_name(), "Deutsch");

        let fetched = get_theme_handler(State(state.clone()), Path((1, 1))).await.unwrap().0;
        assert_eq!(fetched, renamed);

        delete_theme_handler(State(state.clone()), Path((1, 1))).await.unwrap();
        let result = get_theme_handler(State(state), Path((1, 1))).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_theme_missing_category() {
        let state = Arc::new(AppState::load(setup_test_db()));

        let result = create_theme_handler(
            State(state),
            Path(3),
            Json(CreateThemeDto { name: "German".to_string() }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
