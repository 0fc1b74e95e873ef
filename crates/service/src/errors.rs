use thiserror::Error;

/// Errors surfaced by a [`crate::backend::Backend`] and the stores behind it.
///
/// Only `InvalidCredentials` and `DuplicateUser` are part of the user-facing
/// auth contract; the rest describe infrastructure failures.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User already exists")]
    DuplicateUser,
    #[error("session is not authorized")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response {status}: {body}")]
    Unexpected { status: u16, body: String },
}

impl BackendError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            BackendError::InvalidCredentials => 1001,
            BackendError::DuplicateUser => 1002,
            BackendError::Unauthorized => 1003,
            BackendError::NotFound(_) => 1004,
            BackendError::Validation(_) => 1005,
            BackendError::Storage(_) => 1101,
            BackendError::Hash(_) => 1102,
            BackendError::Transport(_) => 1201,
            BackendError::Unexpected { .. } => 1202,
        }
    }

    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub(crate) fn storage(e: impl std::fmt::Display) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<models::errors::ModelError> for BackendError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => BackendError::Validation(msg),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        BackendError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_keep_user_facing_messages() {
        assert_eq!(BackendError::InvalidCredentials.to_string(), "Invalid email or password");
        assert_eq!(BackendError::DuplicateUser.to_string(), "User already exists");
        assert_eq!(BackendError::not_found("job").to_string(), "not found: job not found");
    }

    #[test]
    fn codes_are_distinct() {
        let all = [
            BackendError::InvalidCredentials,
            BackendError::DuplicateUser,
            BackendError::Unauthorized,
            BackendError::NotFound(String::new()),
            BackendError::Validation(String::new()),
            BackendError::Storage(String::new()),
            BackendError::Hash(String::new()),
            BackendError::Transport(String::new()),
            BackendError::Unexpected { status: 500, body: String::new() },
        ];
        let mut codes: Vec<u16> = all.iter().map(BackendError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }
}
