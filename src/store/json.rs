//! JSON file implementation of [`ReadingListStore`].

use super::{DataStore, ReadingListStore};
use crate::error::ApiError;
use std::path::{Path, PathBuf};

pub struct JsonReadingListStore {
    path: PathBuf,
}

impl JsonReadingListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ReadingListStore for JsonReadingListStore {
    fn load(&self) -> DataStore {
        if !self.path.exists() {
            return DataStore::default();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    "Could not read data file {}, using empty state: {}",
                    self.path.display(),
                    e
                );
                return DataStore::default();
            }
        };

        match serde_json::from_str::<DataStore>(&content) {
            Ok(data) if !data.version.is_empty() => data,
            Ok(_) => {
                tracing::warn!(
                    "Data file {} has no version, using empty state",
                    self.path.display()
                );
                DataStore::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Could not parse data file {}, using empty state: {}",
                    self.path.display(),
                    e
                );
                DataStore::default()
            }
        }
    }

    /// Write to `<file>.tmp`, then rename over the real file.
    fn save(&self, data: &DataStore) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::StoreError(format!(
                        "Failed to create data directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(data)
            .map_err(|e| ApiError::StoreError(format!("Failed to serialize data: {}", e)))?;

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, content).map_err(|e| {
            ApiError::StoreError(format!(
                "Failed to save data to {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            ApiError::StoreError(format!(
                "Failed to save data to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(items = data.urls.len(), path = %self.path.display(), "Saved reading list");
        Ok(())
    }

    fn data_file_path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntrySource, STORE_VERSION};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonReadingListStore {
        JsonReadingListStore::new(dir.path().join("list.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let data = store_in(&temp).load();
        assert_eq!(data.version, STORE_VERSION);
        assert!(data.urls.is_empty());
    }

    #[test]
    fn add_list_remove_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let first = store.add_url("https://a.com", "a.com", None).unwrap();
        let second = store
            .add_url("https://b.com/x", "b.com", Some(EntrySource::Cli))
            .unwrap();
        assert_ne!(first.id, second.id);

        let urls = store.get_urls();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[1].source, Some(EntrySource::Cli));

        assert!(store.remove_url(&first.id).unwrap());
        assert!(!store.remove_url(&first.id).unwrap());
        assert_eq!(store.get_urls(), vec![second]);
    }

    #[test]
    fn remove_all_reports_count() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.add_url("https://a.com", "a.com", None).unwrap();
        store.add_url("https://b.com", "b.com", None).unwrap();

        assert_eq!(store.remove_all_urls().unwrap(), 2);
        assert!(store.get_urls().is_empty());
        assert_eq!(store.remove_all_urls().unwrap(), 0);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.data_file_path(), "{ not json").unwrap();
        assert!(store.get_urls().is_empty());

        std::fs::write(store.data_file_path(), r#"{"version": "", "urls": []}"#).unwrap();
        assert!(store.get_urls().is_empty());
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.add_url("https://a.com", "a.com", None).unwrap();

        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["list.json".to_string()]);
    }

    #[test]
    fn reads_documents_written_by_earlier_versions() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(
            store.data_file_path(),
            r#"{
  "version": "1.0.0",
  "urls": [
    {
      "id": "1718000000000",
      "url": "https://news.example/story",
      "title": "news.example",
      "addedAt": "2024-06-10T06:13:20.000Z",
      "source": "shortcut"
    }
  ]
}"#,
        )
        .unwrap();

        let urls = store.get_urls();
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].source, Some(EntrySource::Shortcut));
        assert_eq!(urls[0].title, "news.example");
    }
}
