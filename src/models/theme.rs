use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Card;

/// A named group of cards inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Identifier, unique within the theme's category
    id: i64,

    /// Display name of the theme
    name: String,

    /// Cards in insertion order
    #[serde(default)]
    cards: Vec<Card>,
}

/// Partial update for a theme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Theme {
    /// Creates a new empty theme
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            cards: Vec::new(),
        }
    }

    /// Creates a theme with its cards already filled in
    pub fn new_with_fields(id: i64, name: String, cards: Vec<Card>) -> Self {
        Self { id, name, cards }
    }

    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get_card(&self, card_id: i64) -> Option<&Card> {
        self.cards.iter().find(|card| card.get_id() == card_id)
    }

    pub fn get_card_mut(&mut self, card_id: i64) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.get_id() == card_id)
    }

    /// Returns the next free card id in this theme
    ///
    /// `None` when the highest id is already `i64::MAX`.
    pub fn next_card_id(&self) -> Option<i64> {
        self.cards.iter().map(Card::get_id).max().unwrap_or(0).checked_add(1)
    }

    /// Appends a card to the end of the theme
    pub fn push_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes a card, returning it if it was present
    pub fn remove_card(&mut self, card_id: i64) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.get_id() == card_id)?;
        Some(self.cards.remove(index))
    }

    /// Cards whose next review is at or before `now`, in stored order
    pub fn due_cards(&self, now: DateTime<Utc>) -> Vec<Card> {
        self.cards.iter().filter(|card| card.is_due(now)).cloned().collect()
    }

    pub fn apply_update(&mut self, update: ThemeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}
