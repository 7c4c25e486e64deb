use serde::{Deserialize, Serialize};

use crate::models::Card;

/// Data transfer object for creating a new category
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateCategoryDto {
    /// The name of the category
    pub name: String,
}

/// Data transfer object for creating a new theme inside a category
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateThemeDto {
    /// The name of the theme
    pub name: String,
}

/// Data transfer object for creating a new card inside a theme
///
/// The card starts at level 0 and is due immediately.
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateCardDto {
    /// The question or term
    pub recto: String,

    /// The answer or definition
    pub verso: String,

    /// Optional image reference
    #[serde(default)]
    pub image: Option<String>,
}

/// Query parameters for listing the cards of a theme
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct CardListQuery {
    /// Only return cards that are due now
    pub due: bool,
}

/// Data transfer object for starting a study session
#[derive(Serialize, Deserialize, Debug)]
pub struct StartSessionDto {
    pub category_id: i64,
    pub theme_id: i64,
}

/// Data transfer object for answering the current card
#[derive(Serialize, Deserialize, Debug)]
pub struct AnswerCardDto {
    /// Whether the card was recalled correctly
    pub correct: bool,
}

/// Snapshot of the study session
///
/// With no session running the ids and card are null and nothing remains.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub category_id: Option<i64>,
    pub theme_id: Option<i64>,

    /// The card being studied, or null once the queue is exhausted
    pub current_card: Option<Card>,

    /// Number of cards still queued, the current card included
    pub remaining: usize,

    /// True when the recto side is showing
    pub recto: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_card_dto_image_optional() {
        let dto: CreateCardDto = serde_json::from_value(json!({"recto": "a", "verso": "b"})).unwrap();
        assert_eq!(dto.recto, "a");
        assert_eq!(dto.verso, "b");
        assert!(dto.image.is_none());
    }

    #[test]
    fn test_card_list_query_default() {
        let query = CardListQuery::default();
        assert!(!query.due);

        let query: CardListQuery = serde_json::from_value(json!({})).unwrap();
        assert!(!query.due);
    }

    #[test]
    fn test_session_view_serializes_nulls() {
        let view = SessionView {
            category_id: None,
            theme_id: None,
            current_card: None,
            remaining: 0,
            recto: true,
        };

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "category_id": null,
                "theme_id": null,
                "current_card": null,
                "remaining": 0,
                "recto": true,
            })
        );
    }
}
