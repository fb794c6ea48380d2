//! JSON-file-backed settings store. One flat string map per file, written
//! whole on every change.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use super::{SettingsStore, StoreError};

pub struct FileStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, loading existing entries if the file is
    /// present. A missing file is an empty store, not an error.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let cache = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        info!("Settings store opened at {} ({} keys)", path.display(), cache.len());
        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    async fn persist(&self, cache: &HashMap<String, String>) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(cache)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        for (key, value) in entries {
            cache.insert(key, value);
        }
        self.persist(&cache).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("settings.json")).await.unwrap();
        assert!(store.get("apiKey").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileStore::open(&path).await.unwrap();
        store
            .set_many(vec![
                ("apiKey".to_string(), "sk-test".to_string()),
                ("aiProvider".to_string(), "openai".to_string()),
            ])
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("apiKey").await.unwrap().as_deref(), Some("sk-test"));
        assert_eq!(
            reopened.get("aiProvider").await.unwrap().as_deref(),
            Some("openai")
        );
    }

    #[tokio::test]
    async fn test_set_many_overwrites_existing_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("settings.json")).await.unwrap();

        store
            .set_many(vec![("model".to_string(), "gpt-3.5-turbo".to_string())])
            .await
            .unwrap();
        store
            .set_many(vec![("model".to_string(), "gpt-4".to_string())])
            .await
            .unwrap();

        assert_eq!(store.get("model").await.unwrap().as_deref(), Some("gpt-4"));
    }
}
