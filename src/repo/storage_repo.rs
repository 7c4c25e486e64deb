use crate::db::DbPool;
use crate::models::{Category, JsonDocument, StorageEntry};
use crate::schema::storage;
use anyhow::{Context, Result};
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Key under which the whole category collection is stored
pub const STORAGE_KEY: &str = "spaced-repetition-data";

/// Retrieves a stored entry by key
///
/// ### Returns
///
/// A Result containing an Option with the entry if found, or None if the key
/// has never been written
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The stored text is not valid JSON
#[instrument(skip(pool))]
pub fn get_entry(pool: &DbPool, key: &str) -> Result<Option<StorageEntry>> {
    debug!("Retrieving storage entry");

    let conn = &mut pool.get()?;

    let result = storage::table
        .find(key)
        .select(StorageEntry::as_select())
        .first(conn)
        .optional()?;

    if result.is_none() {
        debug!("Storage entry not found");
    }

    Ok(result)
}

/// Writes a JSON value under a key, replacing any previous value
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database upsert fails
#[instrument(skip(pool, value))]
pub fn put_entry(pool: &DbPool, key: &str, value: serde_json::Value) -> Result<StorageEntry> {
    debug!("Writing storage entry");

    let conn = &mut pool.get()?;

    let entry = StorageEntry::new(key.to_string(), value);

    diesel::insert_into(storage::table)
        .values(&entry)
        .on_conflict(storage::storage_key)
        .do_update()
        .set(&entry)
        .execute(conn)?;

    debug!("Storage entry written");

    Ok(entry)
}

/// Deletes the entry stored under a key
///
/// ### Returns
///
/// `true` if an entry was removed, `false` if the key was absent
#[instrument(skip(pool))]
pub fn delete_entry(pool: &DbPool, key: &str) -> Result<bool> {
    let conn = &mut pool.get()?;

    let deleted = diesel::delete(storage::table.find(key)).execute(conn)?;

    info!("Deleted {} storage entries", deleted);

    Ok(deleted > 0)
}

/// Loads the category collection
///
/// ### Returns
///
/// `Ok(None)` when nothing has been saved yet, otherwise the stored categories
///
/// ### Errors
///
/// Returns an error if the database read fails or the stored document is not
/// an array of categories
#[instrument(skip(pool))]
pub fn load_categories(pool: &DbPool) -> Result<Option<Vec<Category>>> {
    let Some(entry) = get_entry(pool, STORAGE_KEY)? else {
        return Ok(None);
    };

    let categories: Vec<Category> = entry
        .get_document()
        .decode()
        .context("stored category data is malformed")?;

    debug!("Loaded {} categories", categories.len());

    Ok(Some(categories))
}

/// Saves the whole category collection, replacing what was stored
#[instrument(skip(pool, categories), fields(count = categories.len()))]
pub fn save_categories(pool: &DbPool, categories: &[Category]) -> Result<()> {
    let document = JsonDocument::encode(categories)?;
    put_entry(pool, STORAGE_KEY, document.into_value())?;

    debug!("Saved categories");

    Ok(())
}
