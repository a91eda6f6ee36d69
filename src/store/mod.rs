//! Local reading-list store
//!
//! URLs saved with `read-later add` live in a small JSON document, separate
//! from Safari's own reading list. The daily cleanup agent empties it.

pub mod json;

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use json::JsonReadingListStore;

/// Current store document version.
pub const STORE_VERSION: &str = "1.0.0";

/// How an item entered the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Cli,
    Shortcut,
}

/// A saved URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EntrySource>,
}

/// On-disk document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStore {
    pub version: String,
    pub urls: Vec<ReadingItem>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            urls: Vec::new(),
        }
    }
}

pub trait ReadingListStore: Send + Sync {
    /// Load the document; a missing or unreadable file yields an empty list.
    fn load(&self) -> DataStore;
    fn save(&self, data: &DataStore) -> Result<(), ApiError>;
    fn data_file_path(&self) -> &Path;

    fn add_url(
        &self,
        url: &str,
        title: &str,
        source: Option<EntrySource>,
    ) -> Result<ReadingItem, ApiError> {
        let mut data = self.load();
        let added_at = Utc::now();
        let item = ReadingItem {
            id: next_id(&data, added_at),
            url: url.to_string(),
            title: title.to_string(),
            added_at,
            source,
        };
        data.urls.push(item.clone());
        self.save(&data)?;
        Ok(item)
    }

    fn get_urls(&self) -> Vec<ReadingItem> {
        self.load().urls
    }

    /// Returns false, without writing, when no item has `id`.
    fn remove_url(&self, id: &str) -> Result<bool, ApiError> {
        let mut data = self.load();
        let before = data.urls.len();
        data.urls.retain(|item| item.id != id);
        if data.urls.len() == before {
            return Ok(false);
        }
        self.save(&data)?;
        Ok(true)
    }

    /// Returns how many items were removed.
    fn remove_all_urls(&self) -> Result<usize, ApiError> {
        let mut data = self.load();
        let count = data.urls.len();
        data.urls.clear();
        self.save(&data)?;
        Ok(count)
    }
}

/// Millisecond timestamp id, bumped past any id already taken.
fn next_id(data: &DataStore, now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    while data.urls.iter().any(|item| item.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}
