//! File-backed store
//!
//! Stores one pretty-printed JSON file per record, laid out as
//! `<base>/<collection>/<id>.json`. Collection directories are created on
//! first write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::backend::DataStore;
use super::error::{StoreError, StoreResult};

/// One-JSON-file-per-record store
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn record_path(&self, collection: &str, id: &str) -> PathBuf {
        self.base_dir.join(collection).join(format!("{id}.json"))
    }

    async fn ensure_collection_dir(&self, collection: &str) -> StoreResult<()> {
        fs::create_dir_all(self.base_dir.join(collection)).await?;
        Ok(())
    }

    async fn write_record(path: &Path, value: &Value, create_new: bool) -> StoreResult<()> {
        let encoded = serde_json::to_vec_pretty(value)?;
        let mut options = fs::OpenOptions::new();
        options.write(true);
        if create_new {
            options.create_new(true);
        } else {
            options.truncate(true);
        }
        let mut file = options.open(path).await?;
        file.write_all(&encoded).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl DataStore for FileStore {
    async fn create(&self, collection: &str, id: &str, value: &Value) -> StoreResult<()> {
        self.ensure_collection_dir(collection).await?;
        let path = self.record_path(collection, id);
        debug!("creating record at {}", path.display());

        Self::write_record(&path, value, true)
            .await
            .map_err(|err| match err {
                StoreError::IoError(io) if io.kind() == ErrorKind::AlreadyExists => {
                    StoreError::AlreadyExists {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    }
                }
                other => other,
            })
    }

    async fn read(&self, collection: &str, id: &str) -> StoreResult<Value> {
        let path = self.record_path(collection, id);
        let content = fs::read_to_string(&path).await.map_err(|io| {
            if io.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                }
            } else {
                StoreError::IoError(io)
            }
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn update(&self, collection: &str, id: &str, value: &Value) -> StoreResult<()> {
        let path = self.record_path(collection, id);
        if !fs::try_exists(&path).await? {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        debug!("updating record at {}", path.display());
        Self::write_record(&path, value, false).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let path = self.record_path(collection, id);
        fs::remove_file(&path).await.map_err(|io| {
            if io.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                }
            } else {
                StoreError::IoError(io)
            }
        })
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<String>> {
        let dir = self.base_dir.join(collection);
        let mut ids = vec![];

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // A collection nothing was ever written to is just empty.
            Err(io) if io.kind() == ErrorKind::NotFound => return Ok(ids),
            Err(io) => return Err(io.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(id) = name.strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn create_read_update_delete_cycle() {
        let (_dir, store) = temp_store();

        store
            .create("checks", "abc", &json!({"url": "example.com"}))
            .await
            .unwrap();
        assert_eq!(
            store.read("checks", "abc").await.unwrap(),
            json!({"url": "example.com"})
        );

        store
            .update("checks", "abc", &json!({"url": "example.org"}))
            .await
            .unwrap();
        assert_eq!(
            store.read("checks", "abc").await.unwrap(),
            json!({"url": "example.org"})
        );

        store.delete("checks", "abc").await.unwrap();
        assert_matches!(
            store.read("checks", "abc").await,
            Err(StoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn create_fails_on_existing_id() {
        let (_dir, store) = temp_store();

        store.create("checks", "abc", &json!(1)).await.unwrap();
        assert_matches!(
            store.create("checks", "abc", &json!(2)).await,
            Err(StoreError::AlreadyExists { .. })
        );
        // Original value untouched.
        assert_eq!(store.read("checks", "abc").await.unwrap(), json!(1));
    }

    #[tokio::test]
    async fn update_fails_on_missing_id() {
        let (_dir, store) = temp_store();

        assert_matches!(
            store.update("checks", "nope", &json!(1)).await,
            Err(StoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn list_returns_ids_without_extension() {
        let (_dir, store) = temp_store();

        assert!(store.list("checks").await.unwrap().is_empty());

        store.create("checks", "one", &json!(1)).await.unwrap();
        store.create("checks", "two", &json!(2)).await.unwrap();

        let mut ids = store.list("checks").await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["one", "two"]);
    }
}
