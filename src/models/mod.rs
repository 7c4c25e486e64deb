/// Data models module
///
/// This module defines the flashcard records (categories, themes, cards),
/// the partial updates applied to them, and the database row used to
/// persist the whole collection.

mod json_document;
pub use json_document::JsonDocument;

mod card;
pub use card::{Card, CardUpdate};

mod theme;
pub use theme::{Theme, ThemeUpdate};

mod category;
pub use category::{Category, CategoryUpdate};

mod storage_entry;
pub use storage_entry::StorageEntry;
