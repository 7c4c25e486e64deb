use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule;

/// Represents a single flashcard
///
/// Cards serialize with camelCase keys and store `next_review` as Unix epoch
/// milliseconds so the persisted document keeps its original shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Identifier, unique within the card's theme
    id: i64,

    /// Optional image shown alongside the card (URL or data URI)
    image: Option<String>,

    /// The question or term to learn
    recto: String,

    /// The answer or definition
    verso: String,

    /// Mastery level, i.e. the number of consecutive correct answers
    level: u32,

    /// When this card is next due, in epoch milliseconds
    next_review: i64,
}

/// Partial update for a card
///
/// `Some` fields overwrite the card, `None` fields leave it unchanged.
/// Keys and the `nextReview` epoch milliseconds match the `Card` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardUpdate {
    /// New image. `Some(None)` removes the image.
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    pub recto: Option<String>,
    pub verso: Option<String>,
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<i64>,
}

impl Card {
    /// Creates a new card at level 0 that is due immediately
    ///
    /// ### Arguments
    ///
    /// * `id` - The identifier of the card within its theme
    /// * `recto` - The question side
    /// * `verso` - The answer side
    /// * `image` - Optional image reference
    /// * `now` - The creation time, which is also the first due date
    pub fn new(id: i64, recto: String, verso: String, image: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            image,
            recto,
            verso,
            level: 0,
            next_review: now.timestamp_millis(),
        }
    }

    /// Creates a card with all fields specified
    pub fn new_with_fields(
        id: i64,
        image: Option<String>,
        recto: String,
        verso: String,
        level: u32,
        next_review: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            image,
            recto,
            verso,
            level,
            next_review: next_review.timestamp_millis(),
        }
    }

    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn get_image(&self) -> Option<String> {
        self.image.clone()
    }

    pub fn get_recto(&self) -> String {
        self.recto.clone()
    }

    pub fn get_verso(&self) -> String {
        self.verso.clone()
    }

    pub fn get_level(&self) -> u32 {
        self.level
    }

    /// Gets the card's next review time as a DateTime<Utc>
    ///
    /// Out-of-range millisecond values clamp to the Unix epoch.
    pub fn get_next_review(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.next_review).unwrap_or_default()
    }

    /// Gets the card's raw next review time in epoch milliseconds
    pub fn get_next_review_millis(&self) -> i64 {
        self.next_review
    }

    /// Returns true when the card should be shown at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now.timestamp_millis()
    }

    /// Records the outcome of a review and reschedules the card
    ///
    /// A correct answer raises the level by one, a wrong answer resets it to
    /// zero. The next review is then placed `review_interval_days(level)`
    /// days after `now`.
    pub fn record_answer(&mut self, correct: bool, now: DateTime<Utc>) {
        self.level = if correct { self.level.saturating_add(1) } else { 0 };
        self.next_review = schedule::next_review_at(self.level, now).timestamp_millis();
    }

    /// Merges a partial update into this card
    pub fn apply_update(&mut self, update: CardUpdate) {
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(recto) = update.recto {
            self.recto = recto;
        }
        if let Some(verso) = update.verso {
            self.verso = verso;
        }
        if let Some(level) = update.level {
            self.level = level;
        }
        if let Some(next_review) = update.next_review {
            self.next_review = next_review;
        }
    }
}

/// Serde helper distinguishing an absent field from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
