use async_trait::async_trait;
use models::Identity;

use super::domain::{NewIdentity, StoredIdentity};
use crate::errors::BackendError;

/// Repository abstraction over the identity store, keyed by email.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredIdentity>, BackendError>;

    /// Insert a new identity. Fails with `DuplicateUser` when the email is
    /// taken; the check and the insert are atomic.
    async fn create(&self, input: NewIdentity) -> Result<Identity, BackendError>;

    async fn count(&self) -> Result<usize, BackendError>;
}

/// Next sequential id for a store currently holding `count` identities.
pub(crate) fn next_id(count: usize) -> String {
    (count + 1).to_string()
}

/// Simple in-memory repository for the mock backend and tests
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryIdentityRepository {
        identities: RwLock<HashMap<String, StoredIdentity>>, // key: email
    }

    impl InMemoryIdentityRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl IdentityRepository for InMemoryIdentityRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<StoredIdentity>, BackendError> {
            let identities = self.identities.read().unwrap_or_else(|e| e.into_inner());
            Ok(identities.get(email).cloned())
        }

        async fn create(&self, input: NewIdentity) -> Result<Identity, BackendError> {
            let mut identities = self.identities.write().unwrap_or_else(|e| e.into_inner());
            if identities.contains_key(&input.email) {
                return Err(BackendError::DuplicateUser);
            }
            let stored = input.into_stored(next_id(identities.len()));
            let identity = stored.identity.clone();
            identities.insert(identity.email.clone(), stored);
            Ok(identity)
        }

        async fn count(&self) -> Result<usize, BackendError> {
            Ok(self.identities.read().unwrap_or_else(|e| e.into_inner()).len())
        }
    }
}
