use std::sync::Arc;

use async_trait::async_trait;
use models::{
    ApplicationResult, AuthResponse, Identity, JobListing, LoginCredentials, ResumeFile, ResumeScore,
    SignupCredentials,
};
use reqwest::{multipart, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{Backend, SessionPersistence};
use crate::errors::BackendError;
use crate::storage::KeyValueStore;

/// Backend that talks to the HTTP API, persisting the session the same way
/// the mock does.
///
/// Every request carries `Authorization: Bearer <token>` while a token is
/// stored; a 401 answer to such a request drops the stored session. A
/// failed login or signup leaves the stored session alone.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    session: SessionPersistence,
}

impl HttpBackend {
    pub fn new(base_url: &str, store: Arc<dyn KeyValueStore>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("resume-boost/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, base_url, store)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, store: Arc<dyn KeyValueStore>) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url).map_err(|e| BackendError::Validation(format!("invalid base url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Validation(format!("invalid base url: {base_url}")));
        }
        Ok(Self { client, base_url, session: SessionPersistence::new(store) })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send the request with the stored bearer token, if any. A 401 answer
    /// clears the stored session before the response is handed back.
    async fn send(&self, rb: RequestBuilder) -> Result<Response, BackendError> {
        self.send_with(rb, true).await
    }

    /// `clear_on_401` is false for the login/signup exchange: a rejected
    /// credential says nothing about the session already stored. Requests
    /// sent without a token never clear anything either.
    async fn send_with(&self, rb: RequestBuilder, clear_on_401: bool) -> Result<Response, BackendError> {
        let (rb, sent_bearer) = match self.session.token().await {
            Some(token) => (rb.bearer_auth(token), true),
            None => (rb, false),
        };
        let resp = rb.send().await?;
        debug!(status = %resp.status(), url = %resp.url(), "backend response");
        if clear_on_401 && sent_bearer && resp.status() == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.session.clear().await {
                warn!(error = %e, "clearing rejected session failed");
            }
        }
        Ok(resp)
    }

    async fn auth_exchange(&self, rb: RequestBuilder, on_401: BackendError) -> Result<AuthResponse, BackendError> {
        let resp = self.send_with(rb, false).await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(on_401);
        }
        let auth: AuthResponse = decode(resp).await?;
        self.session.save(&auth).await?;
        Ok(auth)
    }
}

/// Decode a success body or map the failure status.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
    if resp.status().is_success() {
        return resp.json::<T>().await.map_err(|e| BackendError::Transport(e.to_string()));
    }
    Err(error_from(resp).await)
}

async fn error_from(resp: Response) -> BackendError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.clone());
    match status {
        StatusCode::UNAUTHORIZED => BackendError::Unauthorized,
        StatusCode::CONFLICT => BackendError::DuplicateUser,
        StatusCode::NOT_FOUND => BackendError::NotFound(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => BackendError::Validation(detail),
        _ => BackendError::Unexpected { status: status.as_u16(), body },
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthResponse, BackendError> {
        let rb = self.client.post(self.endpoint(&["auth", "login"])).json(&credentials);
        let auth = self.auth_exchange(rb, BackendError::InvalidCredentials).await?;
        info!(user_id = %auth.user.id, "user_logged_in");
        Ok(auth)
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn signup(&self, credentials: SignupCredentials) -> Result<AuthResponse, BackendError> {
        let rb = self.client.post(self.endpoint(&["auth", "signup"])).json(&credentials);
        let auth = self.auth_exchange(rb, BackendError::Unauthorized).await?;
        info!(user_id = %auth.user.id, "user_signed_up");
        Ok(auth)
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), BackendError> {
        if self.session.token().await.is_some() {
            let rb = self.client.post(self.endpoint(&["auth", "logout"]));
            match self.send(rb).await {
                Ok(resp) if !resp.status().is_success() && resp.status() != StatusCode::UNAUTHORIZED => {
                    warn!(status = %resp.status(), "server refused logout; clearing local session anyway");
                }
                Err(e) => warn!(error = %e, "logout request failed; clearing local session anyway"),
                Ok(_) => {}
            }
        }
        self.session.clear().await?;
        info!("user_logged_out");
        Ok(())
    }

    async fn current_user(&self) -> Option<Identity> {
        self.session.token().await?;
        let rb = self.client.get(self.endpoint(&["auth", "me"]));
        match self.send(rb).await {
            Ok(resp) => match decode::<Identity>(resp).await {
                Ok(user) => Some(user),
                Err(e) => {
                    debug!(error = %e, "current user lookup rejected");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "current user lookup failed");
                None
            }
        }
    }

    async fn is_authenticated(&self) -> bool {
        self.session.is_active().await
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name, bytes = file.len()))]
    async fn analyze_resume(&self, file: &ResumeFile) -> Result<ResumeScore, BackendError> {
        let mut part = multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if let Some(ct) = file.content_type.as_deref() {
            part = part.mime_str(ct).map_err(|e| BackendError::Validation(e.to_string()))?;
        }
        let form = multipart::Form::new().part("file", part);
        let rb = self.client.post(self.endpoint(&["api", "resume", "analyze"])).multipart(form);
        decode(self.send(rb).await?).await
    }

    async fn job_recommendations(&self, score: Option<&ResumeScore>) -> Result<Vec<JobListing>, BackendError> {
        let rb = self.client.post(self.endpoint(&["api", "jobs", "recommendations"]));
        let rb = match score {
            Some(score) => rb.json(score),
            None => rb.json(&serde_json::json!({})),
        };
        decode(self.send(rb).await?).await
    }

    #[instrument(skip(self))]
    async fn apply_to_job(&self, job_id: &str) -> Result<ApplicationResult, BackendError> {
        let rb = self.client.post(self.endpoint(&["api", "jobs", job_id, "apply"]));
        let result: ApplicationResult = decode(self.send(rb).await?).await?;
        info!(job_id, "job_application_submitted");
        Ok(result)
    }
}
