use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::Identity;

use crate::auth::domain::{NewIdentity, StoredIdentity};
use crate::auth::repository::{next_id, IdentityRepository};
use crate::errors::BackendError;
use crate::storage::json_map_store::JsonMapStore;

/// Identity store persisted as a JSON document keyed by email.
pub struct FileIdentityRepository {
    store: Arc<JsonMapStore<String, StoredIdentity>>,
}

impl FileIdentityRepository {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, BackendError> {
        let store = JsonMapStore::new(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl IdentityRepository for FileIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredIdentity>, BackendError> {
        Ok(self.store.get(&email.to_string()).await)
    }

    async fn create(&self, input: NewIdentity) -> Result<Identity, BackendError> {
        self.store
            .update_map(|map| {
                if map.contains_key(&input.email) {
                    return Err(BackendError::DuplicateUser);
                }
                let stored = input.into_stored(next_id(map.len()));
                let identity = stored.identity.clone();
                map.insert(identity.email.clone(), stored);
                Ok(identity)
            })
            .await
    }

    async fn count(&self) -> Result<usize, BackendError> {
        Ok(self.store.len().await)
    }
}
