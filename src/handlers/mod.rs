/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler locks the store, runs one store operation and returns
/// the result as JSON.

mod category_handlers;
mod theme_handlers;
mod card_handlers;
mod session_handlers;
mod data_handlers;

// Re-export all handlers
pub use category_handlers::*;
pub use theme_handlers::*;
pub use card_handlers::*;
pub use session_handlers::*;
pub use data_handlers::*;
