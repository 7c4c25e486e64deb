use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::JsonDocument;

/// One row of the key/value storage table
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::storage)]
#[diesel(primary_key(storage_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StorageEntry {
    /// The key this value is stored under
    storage_key: String,

    /// The stored JSON document
    value: JsonDocument,

    /// When the value was last written
    updated_at: NaiveDateTime,
}

impl StorageEntry {
    /// Creates an entry stamped with the current time
    pub fn new(storage_key: String, value: serde_json::Value) -> Self {
        Self {
            storage_key,
            value: JsonDocument::new(value),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn get_key(&self) -> String {
        self.storage_key.clone()
    }

    pub fn get_value(&self) -> &serde_json::Value {
        self.value.as_value()
    }

    pub fn get_document(&self) -> &JsonDocument {
        &self.value
    }

    pub fn into_value(self) -> serde_json::Value {
        self.value.into_value()
    }

    pub fn get_updated_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.updated_at, Utc)
    }
}
