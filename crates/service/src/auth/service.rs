use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use models::{Identity, LoginCredentials, SignupCredentials};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::NewIdentity;
use super::repository::IdentityRepository;
use crate::errors::BackendError;

pub const PASSWORD_ALGORITHM: &str = "argon2";

/// Credential checks over an identity repository, independent of how tokens
/// are issued or where a session is kept.
pub struct AuthService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo) }
    }
}

impl<R: IdentityRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Register a new identity with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, repository::memory::InMemoryIdentityRepository};
    /// use models::SignupCredentials;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(InMemoryIdentityRepository::new()));
    /// let user = tokio_test::block_on(svc.register(SignupCredentials::new("user@example.com", "pw", "User"))).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// assert_eq!(user.id, "1");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: SignupCredentials) -> Result<Identity, BackendError> {
        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            debug!("identity exists: {}", existing.identity.email);
            return Err(BackendError::DuplicateUser);
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repo
            .create(NewIdentity {
                email: input.email,
                username: input.username,
                password_hash,
                password_algorithm: PASSWORD_ALGORITHM.into(),
            })
            .await?;
        info!(user_id = %user.id, email = %user.email, "identity_registered");
        Ok(user)
    }

    /// Check credentials and return the matching identity.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, repository::memory::InMemoryIdentityRepository};
    /// use models::{LoginCredentials, SignupCredentials};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(InMemoryIdentityRepository::new()));
    /// let _ = tokio_test::block_on(svc.register(SignupCredentials::new("u@e.com", "Passw0rd", "N")));
    /// let user = tokio_test::block_on(svc.authenticate(LoginCredentials::new("u@e.com", "Passw0rd"))).unwrap();
    /// assert_eq!(user.username, "N");
    /// assert!(tokio_test::block_on(svc.authenticate(LoginCredentials::new("u@e.com", "nope"))).is_err());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn authenticate(&self, input: LoginCredentials) -> Result<Identity, BackendError> {
        let stored = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(BackendError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&stored.password_hash).map_err(|e| BackendError::Hash(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(BackendError::InvalidCredentials);
        }
        Ok(stored.identity)
    }

    /// Register `input` unless its email is already present; returns the
    /// stored identity either way. Used to seed fixture accounts.
    pub async fn ensure_registered(&self, input: SignupCredentials) -> Result<Identity, BackendError> {
        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            return Ok(existing.identity);
        }
        match self.register(input.clone()).await {
            // lost a race with a concurrent registration
            Err(BackendError::DuplicateUser) => self
                .repo
                .find_by_email(&input.email)
                .await?
                .map(|s| s.identity)
                .ok_or(BackendError::DuplicateUser),
            other => other,
        }
    }
}

fn hash_password(password: &str) -> Result<String, BackendError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| BackendError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::memory::InMemoryIdentityRepository;

    fn svc() -> AuthService<InMemoryIdentityRepository> {
        AuthService::new(Arc::new(InMemoryIdentityRepository::new()))
    }

    #[tokio::test]
    async fn passwords_are_not_stored_in_plaintext() -> anyhow::Result<()> {
        let svc = svc();
        svc.register(SignupCredentials::new("a@x.com", "hunter2", "A")).await?;
        let stored = svc.repository().find_by_email("a@x.com").await?.expect("stored");
        assert_ne!(stored.password_hash, "hunter2");
        assert!(stored.password_hash.starts_with("$argon2"));
        assert_eq!(stored.password_algorithm, PASSWORD_ALGORITHM);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_invalid_credentials() -> anyhow::Result<()> {
        let svc = svc();
        svc.register(SignupCredentials::new("a@x.com", "right", "A")).await?;

        let unknown = svc.authenticate(LoginCredentials::new("b@x.com", "right")).await;
        assert!(matches!(unknown, Err(BackendError::InvalidCredentials)));

        let wrong = svc.authenticate(LoginCredentials::new("a@x.com", "wrong")).await;
        assert!(matches!(wrong, Err(BackendError::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_registration_fails() -> anyhow::Result<()> {
        let svc = svc();
        svc.register(SignupCredentials::new("a@x.com", "pw", "A")).await?;
        let dup = svc.register(SignupCredentials::new("a@x.com", "other", "B")).await;
        assert!(matches!(dup, Err(BackendError::DuplicateUser)));
        Ok(())
    }

    #[tokio::test]
    async fn ensure_registered_is_idempotent() -> anyhow::Result<()> {
        let svc = svc();
        let first = svc.ensure_registered(SignupCredentials::new("a@x.com", "pw", "A")).await?;
        let second = svc.ensure_registered(SignupCredentials::new("a@x.com", "pw", "A")).await?;
        assert_eq!(first, second);
        assert_eq!(svc.repository().count().await?, 1);
        Ok(())
    }
}
