use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tracing::debug;

use super::{json_map_store::JsonMapStore, KeyValueStore};
use crate::errors::BackendError;

/// JSON-file-backed key-value store. Survives process restarts, which lets
/// a CLI keep its session between invocations.
#[derive(Clone)]
pub struct FileStore {
    store: Arc<JsonMapStore<String, String>>,
}

impl FileStore {
    /// Open (or create) the store at `path`.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, BackendError> {
        let store = JsonMapStore::<String, String>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.store.get(&key.to_string()).await)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), BackendError> {
        debug!(key, "file store set");
        self.store.insert(key.to_string(), value).await
    }

    async fn remove(&self, key: &str) -> Result<(), BackendError> {
        let existed = self.store.remove(&key.to_string()).await?;
        debug!(key, existed, "file store remove");
        Ok(())
    }
}
