use models::Identity;
use serde::{Deserialize, Serialize};

/// Identity plus its credential as held by an identity store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredIdentity {
    pub identity: Identity,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Input for creating an identity; the id and timestamp are assigned by the
/// repository.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub password_algorithm: String,
}

impl NewIdentity {
    pub(crate) fn into_stored(self, id: String) -> StoredIdentity {
        StoredIdentity {
            identity: Identity {
                id,
                email: self.email,
                username: self.username,
                created_at: chrono::Utc::now(),
            },
            password_hash: self.password_hash,
            password_algorithm: self.password_algorithm,
        }
    }
}
