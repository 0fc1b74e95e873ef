use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::BackendError;
use thiserror::Error;
use tracing::{error, warn};

/// Error body shape: `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, detail)
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        let status = match &e {
            BackendError::InvalidCredentials | BackendError::Unauthorized => StatusCode::UNAUTHORIZED,
            BackendError::DuplicateUser => StatusCode::CONFLICT,
            BackendError::NotFound(_) => StatusCode::NOT_FOUND,
            BackendError::Validation(_) => StatusCode::BAD_REQUEST,
            BackendError::Storage(_)
            | BackendError::Hash(_)
            | BackendError::Transport(_)
            | BackendError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(code = e.code(), error = %e, "request failed");
        } else {
            warn!(code = e.code(), error = %e, "request rejected");
        }
        Self::new(status, e.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"detail": self.detail}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(#[from] BackendError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_map_to_statuses() {
        assert_eq!(ApiError::from(BackendError::InvalidCredentials).status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(BackendError::DuplicateUser).status, StatusCode::CONFLICT);
        assert_eq!(ApiError::from(BackendError::not_found("job")).status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(BackendError::Storage("io".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::from(ModelError::Validation("invalid email".into())).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_user_keeps_message() {
        let e = ApiError::from(BackendError::DuplicateUser);
        assert_eq!(e.detail, "User already exists");
    }
}
