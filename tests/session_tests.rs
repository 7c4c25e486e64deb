/// Integration tests for study sessions
///
/// This file covers starting a session over due cards, answering,
/// skipping, flipping and the rescheduling that answers cause.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

mod common;
use common::*;

fn start_body(category_id: i64, theme_id: i64) -> serde_json::Value {
    json!({ "category_id": category_id, "theme_id": theme_id })
}

/// Tests a full pass through a session
#[tokio::test]
async fn test_session_walkthrough() {
    let mut app = create_test_app();
    let (category_id, theme_id) = create_deck(&mut app, &[("eins", "one"), ("zwei", "two")]).await;

    let (status, view) = send(&mut app, "POST", "/session", Some(start_body(category_id, theme_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["category_id"], category_id);
    assert_eq!(view["theme_id"], theme_id);
    assert_eq!(view["remaining"], 2);
    assert_eq!(view["recto"], true);
    assert_eq!(view["current_card"]["recto"], "eins");

    let (_, view) = send(&mut app, "POST", "/session/flip", None).await;
    assert_eq!(view["recto"], false);

    let (status, view) = send(&mut app, "POST", "/session/answer", Some(json!({ "correct": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["remaining"], 1);
    assert_eq!(view["current_card"]["recto"], "zwei");

    let (_, view) = send(&mut app, "POST", "/session/answer", Some(json!({ "correct": false }))).await;
    assert_eq!(view["remaining"], 0);
    assert!(view["current_card"].is_null());

    let (status, _) = send(&mut app, "POST", "/session/answer", Some(json!({ "correct": true }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

/// Tests that answers reschedule cards on the review ladder
#[tokio::test]
async fn test_answers_reschedule_cards() {
    let mut app = create_test_app();
    let (category_id, theme_id) = create_deck(&mut app, &[("eins", "one"), ("zwei", "two")]).await;
    send(&mut app, "POST", "/session", Some(start_body(category_id, theme_id))).await;

    let before = Utc::now();
    send(&mut app, "POST", "/session/answer", Some(json!({ "correct": true }))).await;
    send(&mut app, "POST", "/session/answer", Some(json!({ "correct": false }))).await;
    let after = Utc::now();

    let uri = format!("/categories/{}/themes/{}/cards", category_id, theme_id);
    let (_, cards) = send(&mut app, "GET", &uri, None).await;

    let first = &cards[0];
    assert_eq!(first["level"], 1);
    let first_due = first["nextReview"].as_i64().unwrap();
    assert!(first_due >= (before + Duration::days(3)).timestamp_millis());
    assert!(first_due <= (after + Duration::days(3)).timestamp_millis());

    let second = &cards[1];
    assert_eq!(second["level"], 0);
    let second_due = second["nextReview"].as_i64().unwrap();
    assert!(second_due >= (before + Duration::days(1)).timestamp_millis());
    assert!(second_due <= (after + Duration::days(1)).timestamp_millis());

    let (_, due) = send(&mut app, "GET", &format!("{}?due=true", uri), None).await;
    assert_eq!(due, json!([]));
}

/// Tests that a session only queues cards that are due
#[tokio::test]
async fn test_session_skips_future_cards() {
    let mut app = create_test_app();
    let (category_id, theme_id) = create_deck(&mut app, &[("eins", "one"), ("zwei", "two")]).await;
    let later = (Utc::now() + Duration::days(7)).timestamp_millis();
    let card_uri = format!("/categories/{}/themes/{}/cards/1", category_id, theme_id);
    send(&mut app, "PATCH", &card_uri, Some(json!({ "nextReview": later }))).await;

    let (_, view) = send(&mut app, "POST", "/session", Some(start_body(category_id, theme_id))).await;

    assert_eq!(view["remaining"], 1);
    assert_eq!(view["current_card"]["recto"], "zwei");
}

/// Tests skipping past the end and wrapping back to the first card
#[tokio::test]
async fn test_next_card_wraps_after_end() {
    let mut app = create_test_app();
    let (category_id, theme_id) = create_deck(&mut app, &[("eins", "one"), ("zwei", "two")]).await;
    send(&mut app, "POST", "/session", Some(start_body(category_id, theme_id))).await;

    let (_, view) = send(&mut app, "POST", "/session/next", None).await;
    assert_eq!(view["current_card"]["recto"], "zwei");

    let (_, view) = send(&mut app, "POST", "/session/next", None).await;
    assert!(view["current_card"].is_null());
    assert_eq!(view["remaining"], 2);

    let (_, view) = send(&mut app, "POST", "/session/next", None).await;
    assert_eq!(view["current_card"]["recto"], "eins");
}

/// Tests starting a session on a missing theme
#[tokio::test]
async fn test_start_session_missing_theme() {
    let mut app = create_test_app();
    create_category(&mut app, "Languages").await;

    let (status, _) = send(&mut app, "POST", "/session", Some(start_body(1, 3))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Tests that deleting the studied theme ends the session
#[tokio::test]
async fn test_deleting_theme_ends_session() {
    let mut app = create_test_app();
    let (category_id, theme_id) = create_deck(&mut app, &[("eins", "one")]).await;
    send(&mut app, "POST", "/session", Some(start_body(category_id, theme_id))).await;

    let uri = format!("/categories/{}/themes/{}", category_id, theme_id);
    send(&mut app, "DELETE", &uri, None).await;

    let (_, view) = send(&mut app, "GET", "/session", None).await;
    assert!(view["category_id"].is_null());
    assert_eq!(view["remaining"], 0);
}

/// Tests abandoning a session keeps earlier answers
#[tokio::test]
async fn test_end_session() {
    let mut app = create_test_app();
    let (category_id, theme_id) = create_deck(&mut app, &[("eins", "one"), ("zwei", "two")]).await;
    send(&mut app, "POST", "/session", Some(start_body(category_id, theme_id))).await;
    send(&mut app, "POST", "/session/answer", Some(json!({ "correct": true }))).await;

    let (status, view) = send(&mut app, "DELETE", "/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(view["current_card"].is_null());

    let (status, _) = send(&mut app, "POST", "/session/next", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = format!("/categories/{}/themes/{}/cards/1", category_id, theme_id);
    let (_, card) = send(&mut app, "PATCH", &uri, Some(json!({}))).await;
    assert_eq!(card["level"], 1);
}
