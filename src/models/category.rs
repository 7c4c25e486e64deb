use serde::{Deserialize, Serialize};

use super::Theme;

/// Top-level grouping of themes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier, unique among all categories
    id: i64,

    /// Display name of the category
    name: String,

    /// Themes in insertion order
    #[serde(default)]
    themes: Vec<Theme>,
}

/// Partial update for a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Category {
    /// Creates a new category with no themes
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            themes: Vec::new(),
        }
    }

    /// Creates a category with its themes already filled in
    pub fn new_with_fields(id: i64, name: String, themes: Vec<Theme>) -> Self {
        Self { id, name, themes }
    }

    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn get_theme(&self, theme_id: i64) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.get_id() == theme_id)
    }

    pub fn get_theme_mut(&mut self, theme_id: i64) -> Option<&mut Theme> {
        self.themes.iter_mut().find(|theme| theme.get_id() == theme_id)
    }

    /// Returns the next free theme id in this category
    ///
    /// `None` when the highest id is already `i64::MAX`.
    pub fn next_theme_id(&self) -> Option<i64> {
        self.themes.iter().map(Theme::get_id).max().unwrap_or(0).checked_add(1)
    }

    pub fn push_theme(&mut self, theme: Theme) {
        self.themes.push(theme);
    }

    /// Removes a theme and all its cards, returning it if it was present
    pub fn remove_theme(&mut self, theme_id: i64) -> Option<Theme> {
        let index = self.themes.iter().position(|theme| theme.get_id() == theme_id)?;
        Some(self.themes.remove(index))
    }

    /// Total number of cards across every theme
    pub fn card_count(&self) -> usize {
        self.themes.iter().map(|theme| theme.get_cards().len()).sum()
    }

    pub fn apply_update(&mut self, update: CategoryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_next_theme_id() {
        let mut category = Category::new(1, "Languages".to_string());
        assert_eq!(category.next_theme_id(), Some(1));

        category.push_theme(Theme::new(5, "German".to_string()));
        assert_eq!(category.next_theme_id(), Some(6));
    }

    #[test]
    fn test_next_theme_id_exhausted() {
        let mut category = Category::new(1, "Languages".to_string());
        category.push_theme(Theme::new(i64::MAX, "Last".to_string()));

        assert_eq!(category.next_theme_id(), None);
    }

    #[test]
    fn test_remove_theme() {
        let mut category = Category::new(1, "Languages".to_string());
        category.push_theme(Theme::new(1, "German".to_string()));
        category.push_theme(Theme::new(2, "Spanish".to_string()));

        assert!(category.remove_theme(1).is_some());
        assert!(category.get_theme(1).is_none());
        assert!(category.get_theme(2).is_some());
        assert!(category.remove_theme(42).is_none());
    }

    #[test]
    fn test_apply_update_renames() {
        let mut category = Category::new(1, "Languages".to_string());
        category.apply_update(CategoryUpdate { name: Some("Langues".to_string()) });
        assert_eq!(category.get_name(), "Langues");

        category.apply_update(CategoryUpdate::default());
        assert_eq!(category.get_name(), "Langues");
    }

    #[test]
    fn test_category_reads_persisted_shape() {
        let value = json!({
            "id": 1,
            "name": "Science",
            "themes": [{
                "id": 1,
                "name": "Chemistry",
                "cards": [{
                    "id": 1,
                    "image": null,
                    "recto": "H2O",
                    "verso": "Water",
                    "level": 2,
                    "nextReview": 1_700_000_000_000i64
                }]
            }]
        });

        let category: Category = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(category.card_count(), 1);
        assert_eq!(category.get_theme(1).unwrap().get_card(1).unwrap().get_level(), 2);
        assert_eq!(serde_json::to_value(&category).unwrap(), value);
    }
}
