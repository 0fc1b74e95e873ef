use std::{
    collections::HashMap,
    hash::Hash,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::BackendError;

/// Generic JSON file-backed key-value map store.
///
/// Holds a `HashMap<K, V>` in memory and rewrites the whole file after each
/// mutation. The file is replaced through a sibling temp file so a crash
/// mid-write never leaves half a document behind.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    ///
    /// An unparsable document is moved aside to `<file>.corrupt` and the
    /// store starts empty; the original bytes are never overwritten. Any other
    /// read failure is returned as `Storage`.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, BackendError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(BackendError::storage)?;
            }
        }

        let (map, write_empty) = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice::<HashMap<K, V>>(&bytes) {
                Ok(map) => (map, false),
                Err(e) => {
                    let aside = Self::corrupt_path(&file_path);
                    fs::rename(&file_path, &aside).await.map_err(BackendError::storage)?;
                    warn!(
                        path = %file_path.display(),
                        moved_to = %aside.display(),
                        error = %e,
                        "corrupt json store moved aside, starting empty"
                    );
                    (HashMap::new(), true)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (HashMap::new(), true),
            Err(e) => return Err(BackendError::storage(e)),
        };

        let store = Arc::new(Self { inner: RwLock::new(map), file_path });
        if write_empty {
            store.save(&*store.inner.read().await).await?;
        }
        Ok(store)
    }

    fn corrupt_path(file_path: &Path) -> PathBuf {
        let mut name = file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".corrupt");
        file_path.with_file_name(name)
    }

    async fn save(&self, map: &HashMap<K, V>) -> Result<(), BackendError> {
        let data = serde_json::to_vec_pretty(map).map_err(BackendError::storage)?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data).await.map_err(BackendError::storage)?;
        fs::rename(&tmp, &self.file_path).await.map_err(BackendError::storage)?;
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), BackendError> {
        let mut map = self.inner.write().await;
        map.insert(key, value);
        self.save(&map).await
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, BackendError> {
        let mut map = self.inner.write().await;
        let existed = map.remove(key).is_some();
        if existed {
            self.save(&map).await?;
        }
        Ok(existed)
    }

    /// Apply a mutation to the underlying map and persist, holding the write
    /// lock across both. `f` works on a copy, so neither memory nor disk
    /// changes when it fails.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, BackendError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<R, BackendError>,
    {
        let mut map = self.inner.write().await;
        let mut draft = map.clone();
        let out = f(&mut draft)?;
        self.save(&draft).await?;
        *map = draft;
        Ok(out)
    }
}
