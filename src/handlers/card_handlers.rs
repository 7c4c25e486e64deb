use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::dto::{CardListQuery, CreateCardDto};
use crate::errors::ApiError;
use crate::models::{Card, CardUpdate};
use crate::AppState;

/// Handler for creating a new card in a theme
///
/// This function handles POST requests to
/// `/categories/{category_id}/themes/{theme_id}/cards`.
///
/// ### Returns
///
/// The newly created card as JSON, at level 0 and due immediately
#[instrument(skip(state, payload))]
pub async fn create_card_handler(
    State(state): State<Arc<AppState>>,
    Path((category_id, theme_id)): Path<(i64, i64)>,
    Json(payload): Json<CreateCardDto>,
) -> Result<Json<Card>, ApiError> {
    info!("Creating new card");

    let card = state.store.lock().await.add_card(
        category_id,
        theme_id,
        payload.recto,
        payload.verso,
        payload.image,
        Utc::now(),
    )?;

    Ok(Json(card))
}

/// Handler for listing the cards of a theme
///
/// This function handles GET requests to
/// `/categories/{category_id}/themes/{theme_id}/cards`. With `?due=true`
/// only cards due now are returned.
#[instrument(skip(state))]
pub async fn list_cards_handler(
    State(state): State<Arc<AppState>>,
    Path((category_id, theme_id)): Path<(i64, i64)>,
    Query(query): Query<CardListQuery>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let store = state.store.lock().await;

    let cards = if query.due {
        store.due_cards(category_id, theme_id, Utc::now())?
    } else {
        store.theme(category_id, theme_id)?.get_cards().to_vec()
    };

    debug!("Retrieved {} cards", cards.len());

    Ok(Json(cards))
}

/// Handler for editing a card
///
/// This function handles PATCH requests to
/// `/categories/{category_id}/themes/{theme_id}/cards/{card_id}`.
#[instrument(skip(state, payload))]
pub async fn update_card_handler(
    State(state): State<Arc<AppState>>,
    Path((category_id, theme_id, card_id)): Path<(i64, i64, i64)>,
    Json(payload): Json<CardUpdate>,
) -> Result<Json<Card>, ApiError> {
    let card = state
        .store
        .lock()
        .await
        .modify_card(category_id, theme_id, card_id, payload)?;
    Ok(Json(card))
}

/// Handler for deleting a card
///
/// This function handles DELETE requests to
/// `/categories/{category_id}/themes/{theme_id}/cards/{card_id}`.
#[instrument(skip(state))]
pub async fn delete_card_handler(
    State(state): State<Arc<AppState>>,
    Path((category_id, theme_id, card_id)): Path<(i64, i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state.store.lock().await.remove_card(category_id, theme_id, card_id)?;
    Ok(StatusCode::NO_CONTENT)
}
