//! In-memory flashcard store
//!
//! The store owns the full category → theme → card tree, the currently
//! selected category, the study session and the recto/verso flag. Every
//! operation that changes the tree writes the whole tree back to storage
//! before returning. Storage failures are logged and never undo the
//! in-memory change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::db::DbPool;
use crate::dto::SessionView;
use crate::models::{Card, CardUpdate, Category, CategoryUpdate, Theme, ThemeUpdate};
use crate::repo;

/// Errors raised by store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Category {0} not found")]
    CategoryNotFound(i64),
    #[error("Theme {theme_id} not found in category {category_id}")]
    ThemeNotFound { category_id: i64, theme_id: i64 },
    #[error("Card {card_id} not found in theme {theme_id} of category {category_id}")]
    CardNotFound { category_id: i64, theme_id: i64, card_id: i64 },
    #[error("No study session in progress")]
    NoSession,
    #[error("No card left to answer in this session")]
    NoCurrentCard,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("No {0} id left to assign")]
    IdsExhausted(&'static str),
}

/// A running study session over one theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    category_id: i64,
    theme_id: i64,
    /// Cards still to be answered, in the order they were due
    queue: Vec<Card>,
    /// Id of the card being shown, if any
    current: Option<i64>,
}

impl Session {
    pub fn get_category_id(&self) -> i64 {
        self.category_id
    }

    pub fn get_theme_id(&self) -> i64 {
        self.theme_id
    }

    pub fn get_queue(&self) -> &[Card] {
        &self.queue
    }

    pub fn get_current_card(&self) -> Option<&Card> {
        let current = self.current?;
        self.queue.iter().find(|card| card.get_id() == current)
    }

    fn position_of_current(&self) -> Option<usize> {
        let current = self.current?;
        self.queue.iter().position(|card| card.get_id() == current)
    }

    fn is_for(&self, category_id: i64, theme_id: i64) -> bool {
        self.category_id == category_id && self.theme_id == theme_id
    }
}

/// The flashcard store
pub struct Store {
    pool: Arc<DbPool>,
    categories: Vec<Category>,
    current_category: Option<i64>,
    session: Option<Session>,
    recto: bool,
}

/// Trims `value` and rejects it if nothing is left
fn non_empty(field: &'static str, value: String) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

fn non_empty_opt(field: &'static str, value: Option<String>) -> Result<Option<String>, StoreError> {
    value.map(|v| non_empty(field, v)).transpose()
}

impl Store {
    /// Loads the store from storage
    ///
    /// A missing, unreadable or malformed document yields an empty store.
    #[instrument(skip(pool))]
    pub fn load(pool: Arc<DbPool>) -> Self {
        let categories = match repo::load_categories(&pool) {
            Ok(Some(categories)) => {
                info!("Loaded {} categories from storage", categories.len());
                categories
            }
            Ok(None) => {
                info!("No saved data found, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to load saved data, starting empty: {:#}", e);
                Vec::new()
            }
        };

        Self::with_categories(pool, categories)
    }

    /// Creates a store over the given categories without reading storage
    pub fn with_categories(pool: Arc<DbPool>, categories: Vec<Category>) -> Self {
        Self {
            pool,
            categories,
            current_category: None,
            session: None,
            recto: true,
        }
    }

    /// Writes the category tree to storage, logging on failure
    fn persist(&self) {
        if let Err(e) = repo::save_categories(&self.pool, &self.categories) {
            error!("Failed to save data: {:#}", e);
        }
    }

    fn category_mut(&mut self, category_id: i64) -> Result<&mut Category, StoreError> {
        self.categories
            .iter_mut()
            .find(|category| category.get_id() == category_id)
            .ok_or(StoreError::CategoryNotFound(category_id))
    }

    fn theme_mut(&mut self, category_id: i64, theme_id: i64) -> Result<&mut Theme, StoreError> {
        self.category_mut(category_id)?
            .get_theme_mut(theme_id)
            .ok_or(StoreError::ThemeNotFound { category_id, theme_id })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, category_id: i64) -> Result<&Category, StoreError> {
        self.categories
            .iter()
            .find(|category| category.get_id() == category_id)
            .ok_or(StoreError::CategoryNotFound(category_id))
    }

    pub fn theme(&self, category_id: i64, theme_id: i64) -> Result<&Theme, StoreError> {
        self.category(category_id)?
            .get_theme(theme_id)
            .ok_or(StoreError::ThemeNotFound { category_id, theme_id })
    }

    /// Cards of a theme that are due at `now`
    pub fn due_cards(&self, category_id: i64, theme_id: i64, now: DateTime<Utc>) -> Result<Vec<Card>, StoreError> {
        Ok(self.theme(category_id, theme_id)?.due_cards(now))
    }

    /// The selected category, if it still exists
    pub fn current_category(&self) -> Option<&Category> {
        let id = self.current_category?;
        self.category(id).ok()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_recto(&self) -> bool {
        self.recto
    }

    /// Snapshot of the session for presentation
    pub fn session_view(&self) -> SessionView {
        match &self.session {
            Some(session) => SessionView {
                category_id: Some(session.category_id),
                theme_id: Some(session.theme_id),
                current_card: session.get_current_card().cloned(),
                remaining: session.queue.len(),
                recto: self.recto,
            },
            None => SessionView {
                category_id: None,
                theme_id: None,
                current_card: None,
                remaining: 0,
                recto: self.recto,
            },
        }
    }

    // ── Display state ────────────────────────────────────────────────

    /// Flips between showing the recto and the verso
    pub fn toggle_recto(&mut self) -> bool {
        self.recto = !self.recto;
        self.recto
    }

    /// Selects the current category
    pub fn set_current_category(&mut self, category_id: i64) -> Result<&Category, StoreError> {
        self.current_category = Some(self.category(category_id)?.get_id());
        self.category(category_id)
    }

    // ── Categories ───────────────────────────────────────────────────

    #[instrument(skip(self))]
    pub fn add_category(&mut self, name: String) -> Result<Category, StoreError> {
        let name = non_empty("Category name", name)?;
        let id = self
            .categories
            .iter()
            .map(Category::get_id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted("category"))?;

        let category = Category::new(id, name);
        self.categories.push(category.clone());
        self.persist();

        info!("Added category {}", id);
        Ok(category)
    }

    #[instrument(skip(self))]
    pub fn modify_category(&mut self, category_id: i64, update: CategoryUpdate) -> Result<Category, StoreError> {
        let update = CategoryUpdate {
            name: non_empty_opt("Category name", update.name)?,
        };

        let category = self.category_mut(category_id)?;
        category.apply_update(update);
        let category = category.clone();
        self.persist();

        Ok(category)
    }

    /// Removes a category with all its themes and cards
    ///
    /// Clears the current category and ends the session when they pointed
    /// into the removed category.
    #[instrument(skip(self))]
    pub fn remove_category(&mut self, category_id: i64) -> Result<(), StoreError> {
        let index = self
            .categories
            .iter()
            .position(|category| category.get_id() == category_id)
            .ok_or(StoreError::CategoryNotFound(category_id))?;

        self.categories.remove(index);
        self.persist();

        if self.current_category == Some(category_id) {
            self.current_category = None;
        }
        if self.session.as_ref().is_some_and(|s| s.category_id == category_id) {
            debug!("Ending session for removed category");
            self.session = None;
        }

        info!("Removed category {}", category_id);
        Ok(())
    }

    // ── Themes ───────────────────────────────────────────────────────

    #[instrument(skip(self))]
    pub fn add_theme(&mut self, category_id: i64, name: String) -> Result<Theme, StoreError> {
        let name = non_empty("Theme name", name)?;

        let category = self.category_mut(category_id)?;
        let theme_id = category.next_theme_id().ok_or(StoreError::IdsExhausted("theme"))?;
        let theme = Theme::new(theme_id, name);
        category.push_theme(theme.clone());
        self.persist();

        info!("Added theme {} to category {}", theme.get_id(), category_id);
        Ok(theme)
    }

    #[instrument(skip(self))]
    pub fn modify_theme(&mut self, category_id: i64, theme_id: i64, update: ThemeUpdate) -> Result<Theme, StoreError> {
        let update = ThemeUpdate {
            name: non_empty_opt("Theme name", update.name)?,
        };

        let theme = self.theme_mut(category_id, theme_id)?;
        theme.apply_update(update);
        let theme = theme.clone();
        self.persist();

        Ok(theme)
    }

    #[instrument(skip(self))]
    pub fn remove_theme(&mut self, category_id: i64, theme_id: i64) -> Result<(), StoreError> {
        self.category_mut(category_id)?
            .remove_theme(theme_id)
            .ok_or(StoreError::ThemeNotFound { category_id, theme_id })?;
        self.persist();

        if self.session.as_ref().is_some_and(|s| s.is_for(category_id, theme_id)) {
            debug!("Ending session for removed theme");
            self.session = None;
        }

        info!("Removed theme {} from category {}", theme_id, category_id);
        Ok(())
    }

    // ── Cards ────────────────────────────────────────────────────────

    /// Adds a new card at level 0, due at `now`
    #[instrument(skip(self, recto, verso, image))]
    pub fn add_card(
        &mut self,
        category_id: i64,
        theme_id: i64,
        recto: String,
        verso: String,
        image: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Card, StoreError> {
        let recto = non_empty("Recto", recto)?;
        let verso = non_empty("Verso", verso)?;

        let theme = self.theme_mut(category_id, theme_id)?;
        let card_id = theme.next_card_id().ok_or(StoreError::IdsExhausted("card"))?;
        let card = Card::new(card_id, recto, verso, image, now);
        theme.push_card(card.clone());
        self.persist();

        info!("Added card {} to theme {}", card.get_id(), theme_id);
        Ok(card)
    }

    #[instrument(skip(self, update))]
    pub fn modify_card(
        &mut self,
        category_id: i64,
        theme_id: i64,
        card_id: i64,
        update: CardUpdate,
    ) -> Result<Card, StoreError> {
        let update = CardUpdate {
            recto: non_empty_opt("Recto", update.recto)?,
            verso: non_empty_opt("Verso", update.verso)?,
            ..update
        };

        let card = self
            .theme_mut(category_id, theme_id)?
            .get_card_mut(card_id)
            .ok_or(StoreError::CardNotFound { category_id, theme_id, card_id })?;
        card.apply_update(update);
        let card = card.clone();
        self.persist();

        if let Some(session) = self.session.as_mut().filter(|s| s.is_for(category_id, theme_id)) {
            if let Some(queued) = session.queue.iter_mut().find(|c| c.get_id() == card_id) {
                *queued = card.clone();
            }
        }

        Ok(card)
    }

    /// Removes a card
    ///
    /// If the card is queued in the running session it leaves the queue;
    /// when it was the current card the session moves on to the card that
    /// followed it.
    #[instrument(skip(self))]
    pub fn remove_card(&mut self, category_id: i64, theme_id: i64, card_id: i64) -> Result<(), StoreError> {
        self.theme_mut(category_id, theme_id)?
            .remove_card(card_id)
            .ok_or(StoreError::CardNotFound { category_id, theme_id, card_id })?;
        self.persist();

        if let Some(session) = self.session.as_mut().filter(|s| s.is_for(category_id, theme_id)) {
            if let Some(index) = session.queue.iter().position(|c| c.get_id() == card_id) {
                session.queue.remove(index);
                if session.current == Some(card_id) {
                    session.current = session.queue.get(index).map(Card::get_id);
                }
            }
        }

        info!("Removed card {} from theme {}", card_id, theme_id);
        Ok(())
    }

    // ── Study session ────────────────────────────────────────────────

    /// Starts a session over the cards of a theme that are due at `now`
    ///
    /// Any previous session is replaced. The first due card becomes the
    /// current card; with nothing due the session starts empty.
    #[instrument(skip(self))]
    pub fn start_session(&mut self, category_id: i64, theme_id: i64, now: DateTime<Utc>) -> Result<SessionView, StoreError> {
        let queue = self.due_cards(category_id, theme_id, now)?;
        let current = queue.first().map(Card::get_id);

        info!("Starting session with {} due cards", queue.len());

        self.session = Some(Session {
            category_id,
            theme_id,
            queue,
            current,
        });

        Ok(self.session_view())
    }

    /// Answers the current card and moves on
    ///
    /// The card is rescheduled, written back into its theme and persisted,
    /// then dropped from the queue. The next card shown is the first one
    /// still queued.
    #[instrument(skip(self))]
    pub fn answer_card(&mut self, correct: bool, now: DateTime<Utc>) -> Result<Card, StoreError> {
        let session = self.session.as_ref().ok_or(StoreError::NoSession)?;
        let card_id = session.current.ok_or(StoreError::NoCurrentCard)?;
        let (category_id, theme_id) = (session.category_id, session.theme_id);

        let card = self
            .theme_mut(category_id, theme_id)?
            .get_card_mut(card_id)
            .ok_or(StoreError::CardNotFound { category_id, theme_id, card_id })?;
        card.record_answer(correct, now);
        let card = card.clone();
        self.persist();

        debug!(
            "Card {} answered {}, level {} due {}",
            card_id,
            if correct { "correctly" } else { "wrongly" },
            card.get_level(),
            card.get_next_review()
        );

        if let Some(session) = self.session.as_mut() {
            session.queue.retain(|c| c.get_id() != card_id);
            session.current = session.queue.first().map(Card::get_id);
        }

        Ok(card)
    }

    /// Skips to the card after the current one
    ///
    /// Past the last card there is no current card. Calling this with no
    /// current card starts again from the head of the queue, so skipped
    /// cards come back around.
    #[instrument(skip(self))]
    pub fn next_card(&mut self) -> Result<Option<Card>, StoreError> {
        let session = self.session.as_mut().ok_or(StoreError::NoSession)?;

        let next_index = session.position_of_current().map_or(0, |index| index + 1);
        session.current = session.queue.get(next_index).map(Card::get_id);

        Ok(session.get_current_card().cloned())
    }

    /// Ends the running session, if any
    pub fn end_session(&mut self) {
        self.session = None;
    }

    // ── Import ───────────────────────────────────────────────────────

    /// Replaces the whole collection
    ///
    /// Ends the session and clears the current category.
    #[instrument(skip(self, categories), fields(count = categories.len()))]
    pub fn replace_all(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.current_category = None;
        self.session = None;
        self.persist();

        info!("Replaced collection with {} categories", self.categories.len());
    }
}
