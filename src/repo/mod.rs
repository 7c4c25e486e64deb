/// Repository module
///
/// This module provides the data access layer for the application.
/// The whole flashcard collection lives as one JSON document in a
/// key/value table, so the repository is a thin layer of typed
/// load/save functions over that table.

mod storage_repo;

// Re-export all repository functions
pub use storage_repo::*;
