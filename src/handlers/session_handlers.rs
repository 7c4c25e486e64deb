use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::dto::{AnswerCardDto, SessionView, StartSessionDto};
use crate::errors::ApiError;
use crate::AppState;

/// Handler for starting a study session over a theme's due cards
///
/// This function handles POST requests to `/session`.
#[instrument(skip(state))]
pub async fn start_session_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StartSessionDto>,
) -> Result<Json<SessionView>, ApiError> {
    let view = state
        .store
        .lock()
        .await
        .start_session(payload.category_id, payload.theme_id, Utc::now())?;

    info!("Session started with {} cards", view.remaining);

    Ok(Json(view))
}

/// Handler for reading the session state
///
/// This function handles GET requests to `/session`.
#[instrument(skip(state))]
pub async fn get_session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.store.lock().await.session_view()))
}

/// Handler for answering the current card
///
/// This function handles POST requests to `/session/answer`.
///
/// ### Returns
///
/// The session after the answered card has left the queue
#[instrument(skip(state))]
pub async fn answer_card_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnswerCardDto>,
) -> Result<Json<SessionView>, ApiError> {
    let mut store = state.store.lock().await;
    store.answer_card(payload.correct, Utc::now())?;
    Ok(Json(store.session_view()))
}

/// Handler for skipping to the next card
///
/// This function handles POST requests to `/session/next`.
#[instrument(skip(state))]
pub async fn next_card_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let mut store = state.store.lock().await;
    store.next_card()?;
    Ok(Json(store.session_view()))
}

/// Handler for flipping the card between recto and verso
///
/// This function handles POST requests to `/session/flip`.
#[instrument(skip(state))]
pub async fn flip_card_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let mut store = state.store.lock().await;
    store.toggle_recto();
    Ok(Json(store.session_view()))
}

/// Handler for abandoning the session
///
/// This function handles DELETE requests to `/session`. Answers already
/// given stay recorded.
#[instrument(skip(state))]
pub async fn end_session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let mut store = state.store.lock().await;
    store.end_session();
    Ok(Json(store.session_view()))
}
