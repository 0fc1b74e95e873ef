use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ModelError;

/// A registered account as seen by clients. The password never leaves the
/// identity store, so it has no place here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupCredentials {
    pub email: String,
    pub password: String,
    pub username: String,
}

impl SignupCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, username: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into(), username: username.into() }
    }
}

/// Result of a successful login or signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: Identity,
    pub token: String,
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.trim().is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    Ok(())
}
