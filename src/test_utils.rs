use crate::*;
use crate::models::{Card, Category, Theme};
use chrono::{DateTime, Utc};
use proptest::prelude::*;
use std::sync::Arc;

/// Sets up a test database with migrations applied
///
/// Each call gets its own named in-memory database. Plain ":memory:" gives
/// each pooled connection a separate database, so a unique URI with
/// cache=shared is used to make every connection in the pool see the same
/// schema while staying isolated from other tests.
pub fn setup_test_db() -> Arc<db::DbPool> {
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url).expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn).expect("Failed to run migrations");
    drop(conn);

    Arc::new(pool)
}

/// Builds a theme whose cards are all due at `due`
pub fn theme_with_cards(id: i64, name: &str, card_count: i64, due: DateTime<Utc>) -> Theme {
    let cards = (1..=card_count)
        .map(|card_id| {
            Card::new_with_fields(card_id, None, format!("recto {}", card_id), format!("verso {}", card_id), 0, due)
        })
        .collect();
    Theme::new_with_fields(id, name.to_string(), cards)
}

/// Generates an arbitrary DateTime<Utc> within 2020-01-01 to 2030-01-01
pub fn arb_datetime_utc() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64)
        .prop_map(|ts| DateTime::from_timestamp(ts, 0).unwrap())
}

/// Generates a card with a modest level and an arbitrary due date
pub fn arb_card() -> impl Strategy<Value = Card> {
    (
        1i64..10_000,
        proptest::option::of("[a-z]{1,12}\\.png"),
        "\\PC{1,40}",
        "\\PC{1,40}",
        0u32..20,
        arb_datetime_utc(),
    )
        .prop_map(|(id, image, recto, verso, level, next_review)| {
            Card::new_with_fields(id, image, recto, verso, level, next_review)
        })
}

/// Generates a small category tree with unique sibling ids
pub fn arb_categories() -> impl Strategy<Value = Vec<Category>> {
    prop::collection::vec(prop::collection::vec(prop::collection::vec(arb_card(), 0..4), 0..3), 0..4)
        .prop_map(|tree| {
            tree.into_iter()
                .enumerate()
                .map(|(category_index, themes)| {
                    let themes = themes
                        .into_iter()
                        .enumerate()
                        .map(|(theme_index, cards)| {
                            let cards = cards
                                .into_iter()
                                .enumerate()
                                .map(|(card_index, card)| {
                                    Card::new_with_fields(
                                        card_index as i64 + 1,
                                        card.get_image(),
                                        card.get_recto(),
                                        card.get_verso(),
                                        card.get_level(),
                                        card.get_next_review(),
                                    )
                                })
                                .collect();
                            Theme::new_with_fields(theme_index as i64 + 1, format!("theme {}", theme_index), cards)
                        })
                        .collect();
                    Category::new_with_fields(category_index as i64 + 1, format!("category {}", category_index), themes)
                })
                .collect()
        })
}
