use flashdeck::dto::{
    AnswerCardDto, CardListQuery, CreateCardDto, CreateCategoryDto, CreateThemeDto, SessionView,
    StartSessionDto,
};
use flashdeck::models::{Card, CardUpdate, Category, CategoryUpdate, Theme, ThemeUpdate};
use reqwest::Client;

/// Error type for CLI client operations
#[derive(Debug)]
pub enum ClientError {
    /// Server returned an error status with a message body
    Server { status: reqwest::StatusCode, message: String },
    /// Network/connection/request error
    Request(reqwest::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status.as_u16(), message)
            }
            ClientError::Request(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Request(err) => Some(err),
            ClientError::Server { .. } => None,
        }
    }
}

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's error message body
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// HTTP client wrapper for communicating with the Flashdeck server
pub struct FlashdeckClient {
    /// The base URL of the server (e.g. "http://localhost:3000")
    base_url: String,
    /// The underlying HTTP client
    client: Client,
}

impl FlashdeckClient {
    /// Creates a new FlashdeckClient
    ///
    /// ### Arguments
    ///
    /// * `base_url` - The base URL of the Flashdeck server
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn theme_url(&self, category_id: i64, theme_id: i64) -> String {
        format!("{}/categories/{}/themes/{}", self.base_url, category_id, theme_id)
    }

    // ── Category endpoints ───────────────────────────────────────────

    /// Lists all categories
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let url = format!("{}/categories", self.base_url);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Creates a new category
    pub async fn create_category(&self, name: String) -> Result<Category, ClientError> {
        let url = format!("{}/categories", self.base_url);
        let dto = CreateCategoryDto { name };
        let response = self.client.post(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Gets a category with its themes and cards
    pub async fn get_category(&self, id: i64) -> Result<Category, ClientError> {
        let url = format!("{}/categories/{}", self.base_url, id);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Renames a category
    pub async fn rename_category(&self, id: i64, name: String) -> Result<Category, ClientError> {
        let url = format!("{}/categories/{}", self.base_url, id);
        let dto = CategoryUpdate { name: Some(name) };
        let response = self.client.patch(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Deletes a category with everything in it
    pub async fn delete_category(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/categories/{}", self.base_url, id);
        self.client.delete(&url).send().await.map_err(ClientError::Request)?.check().await?;
        Ok(())
    }

    /// Selects the current category
    pub async fn select_category(&self, id: i64) -> Result<Category, ClientError> {
        let url = format!("{}/categories/{}/current", self.base_url, id);
        let response = self.client.put(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Gets the current category, if one is selected
    pub async fn current_category(&self) -> Result<Option<Category>, ClientError> {
        let url = format!("{}/current_category", self.base_url);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    // ── Theme endpoints ──────────────────────────────────────────────

    /// Creates a theme in a category
    pub async fn create_theme(&self, category_id: i64, name: String) -> Result<Theme, ClientError> {
        let url = format!("{}/categories/{}/themes", self.base_url, category_id);
        let dto = CreateThemeDto { name };
        let response = self.client.post(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Gets a theme with its cards
    pub async fn get_theme(&self, category_id: i64, theme_id: i64) -> Result<Theme, ClientError> {
        let url = self.theme_url(category_id, theme_id);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Renames a theme
    pub async fn rename_theme(&self, category_id: i64, theme_id: i64, name: String) -> Result<Theme, ClientError> {
        let url = self.theme_url(category_id, theme_id);
        let dto = ThemeUpdate { name: Some(name) };
        let response = self.client.patch(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Deletes a theme with its cards
    pub async fn delete_theme(&self, category_id: i64, theme_id: i64) -> Result<(), ClientError> {
        let url = self.theme_url(category_id, theme_id);
        self.client.delete(&url).send().await.map_err(ClientError::Request)?.check().await?;
        Ok(())
    }

    // ── Card endpoints ───────────────────────────────────────────────

    /// Lists the cards of a theme, optionally only the due ones
    pub async fn list_cards(&self, category_id: i64, theme_id: i64, due: bool) -> Result<Vec<Card>, ClientError> {
        let url = format!("{}/cards", self.theme_url(category_id, theme_id));
        let query = CardListQuery { due };
        let response = self.client.get(&url).query(&query)
            .send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Creates a card in a theme
    pub async fn create_card(
        &self,
        category_id: i64,
        theme_id: i64,
        recto: String,
        verso: String,
        image: Option<String>,
    ) -> Result<Card, ClientError> {
        let url = format!("{}/cards", self.theme_url(category_id, theme_id));
        let dto = CreateCardDto { recto, verso, image };
        let response = self.client.post(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Applies a partial update to a card
    pub async fn update_card(
        &self,
        category_id: i64,
        theme_id: i64,
        card_id: i64,
        update: &CardUpdate,
    ) -> Result<Card, ClientError> {
        let url = format!("{}/cards/{}", self.theme_url(category_id, theme_id), card_id);
        let response = self.client.patch(&url).json(update).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Deletes a card
    pub async fn delete_card(&self, category_id: i64, theme_id: i64, card_id: i64) -> Result<(), ClientError> {
        let url = format!("{}/cards/{}", self.theme_url(category_id, theme_id), card_id);
        self.client.delete(&url).send().await.map_err(ClientError::Request)?.check().await?;
        Ok(())
    }

    // ── Session endpoints ────────────────────────────────────────────

    /// Starts a study session over a theme's due cards
    pub async fn start_session(&self, category_id: i64, theme_id: i64) -> Result<SessionView, ClientError> {
        let url = format!("{}/session", self.base_url);
        let dto = StartSessionDto { category_id, theme_id };
        let response = self.client.post(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Gets the session state
    pub async fn get_session(&self) -> Result<SessionView, ClientError> {
        let url = format!("{}/session", self.base_url);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Answers the current card
    pub async fn answer(&self, correct: bool) -> Result<SessionView, ClientError> {
        let url = format!("{}/session/answer", self.base_url);
        let dto = AnswerCardDto { correct };
        let response = self.client.post(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Skips to the next card
    pub async fn next_card(&self) -> Result<SessionView, ClientError> {
        let url = format!("{}/session/next", self.base_url);
        let response = self.client.post(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Flips the card between recto and verso
    pub async fn flip(&self) -> Result<SessionView, ClientError> {
        let url = format!("{}/session/flip", self.base_url);
        let response = self.client.post(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Abandons the session
    pub async fn end_session(&self) -> Result<SessionView, ClientError> {
        let url = format!("{}/session", self.base_url);
        let response = self.client.delete(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    // ── Data endpoints ───────────────────────────────────────────────

    /// Downloads the whole collection
    pub async fn export(&self) -> Result<Vec<Category>, ClientError> {
        let url = format!("{}/export", self.base_url);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Replaces the whole collection
    pub async fn import(&self, categories: &[Category]) -> Result<Vec<Category>, ClientError> {
        let url = format!("{}/import", self.base_url);
        let response = self.client.put(&url).json(categories).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }
}
