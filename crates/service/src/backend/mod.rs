//! The remote API contract the client session talks to, with a simulated
//! implementation ([`mock::MockBackend`]) and a networked one
//! ([`http::HttpBackend`]).

pub mod http;
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use models::{
    ApplicationResult, AuthResponse, Identity, JobListing, LoginCredentials, ResumeFile, ResumeScore,
    SignupCredentials,
};
use tracing::{debug, warn};

use crate::errors::BackendError;
use crate::storage::KeyValueStore;

pub use http::HttpBackend;
pub use mock::{MockBackend, MockBackendBuilder};

/// Key holding the opaque session token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Key holding the JSON-serialized [`Identity`] of the session.
pub const USER_KEY: &str = "user";

/// Operations a resume/job backend offers to a client.
///
/// Only `login` and `signup` fail as part of the contract
/// (`InvalidCredentials`, `DuplicateUser`); other errors come from the
/// transport or the session store.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthResponse, BackendError>;

    async fn signup(&self, credentials: SignupCredentials) -> Result<AuthResponse, BackendError>;

    /// Clear the persisted session. Safe to call when logged out.
    async fn logout(&self) -> Result<(), BackendError>;

    /// The persisted identity, or `None`. Never fails.
    async fn current_user(&self) -> Option<Identity>;

    /// Whether a session is persisted.
    async fn is_authenticated(&self) -> bool;

    async fn analyze_resume(&self, file: &ResumeFile) -> Result<ResumeScore, BackendError>;

    /// The input score is accepted for contract compatibility; results do
    /// not depend on it.
    async fn job_recommendations(&self, score: Option<&ResumeScore>) -> Result<Vec<JobListing>, BackendError>;

    async fn apply_to_job(&self, job_id: &str) -> Result<ApplicationResult, BackendError>;
}

/// Client-side record of the active session: token and identity, written
/// and cleared together.
#[derive(Clone)]
pub struct SessionPersistence {
    store: Arc<dyn KeyValueStore>,
}

impl SessionPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Replace any previous session with `auth`.
    pub async fn save(&self, auth: &AuthResponse) -> Result<(), BackendError> {
        let user = serde_json::to_string(&auth.user).map_err(BackendError::storage)?;
        self.store.set(AUTH_TOKEN_KEY, auth.token.clone()).await?;
        self.store.set(USER_KEY, user).await?;
        debug!(user_id = %auth.user.id, "session persisted");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), BackendError> {
        self.store.remove(AUTH_TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        debug!("session cleared");
        Ok(())
    }

    pub async fn token(&self) -> Option<String> {
        match self.store.get(AUTH_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "reading session token failed");
                None
            }
        }
    }

    /// The stored identity. Unreadable or malformed entries count as absent.
    pub async fn user(&self) -> Option<Identity> {
        let raw = match self.store.get(USER_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "reading session user failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "discarding malformed session user");
                None
            }
        }
    }

    /// Authenticated only when both halves of the session are present.
    pub async fn is_active(&self) -> bool {
        self.token().await.is_some() && self.user().await.is_some()
    }

    /// The stored identity, only while the session is complete.
    pub async fn active_user(&self) -> Option<Identity> {
        self.token().await?;
        self.user().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn auth() -> AuthResponse {
        AuthResponse {
            user: Identity {
                id: "1".into(),
                email: "test@example.com".into(),
                username: "TestUser".into(),
                created_at: chrono::Utc::now(),
            },
            token: "t".into(),
        }
    }

    #[tokio::test]
    async fn save_then_clear() -> anyhow::Result<()> {
        let store = Arc::new(MemoryStore::new());
        let session = SessionPersistence::new(store.clone());
        assert!(!session.is_active().await);

        let auth = auth();
        session.save(&auth).await?;
        assert!(session.is_active().await);
        assert_eq!(session.token().await.as_deref(), Some("t"));
        assert_eq!(session.user().await, Some(auth.user.clone()));
        assert!(store.get(USER_KEY).await?.unwrap().contains("createdAt"));

        session.clear().await?;
        session.clear().await?;
        assert!(store.is_empty());
        assert!(session.active_user().await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn half_a_session_is_not_authenticated() -> anyhow::Result<()> {
        let store = Arc::new(MemoryStore::new());
        let session = SessionPersistence::new(store.clone());

        store.set(AUTH_TOKEN_KEY, "t".into()).await?;
        assert!(!session.is_active().await);

        store.remove(AUTH_TOKEN_KEY).await?;
        store.set(USER_KEY, serde_json::to_string(&auth().user)?).await?;
        assert!(!session.is_active().await);
        assert!(session.active_user().await.is_none());

        store.set(AUTH_TOKEN_KEY, "t".into()).await?;
        store.set(USER_KEY, "{garbage".into()).await?;
        assert!(session.user().await.is_none());
        assert!(!session.is_active().await);
        Ok(())
    }
}
