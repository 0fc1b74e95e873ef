use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use models::Identity;
use tracing::debug;

use crate::errors::ApiError;
use crate::state::AppState;

/// Identity resolved from the bearer token of the current request.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub identity: Identity,
    pub token: String,
}

fn bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Reject the request with 401 unless it carries a live bearer token; on
/// success the handler can extract `Extension<Authenticated>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;
    let email = state
        .tokens
        .resolve(&token)
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;
    let stored = state
        .auth
        .repository()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;

    debug!(user_id = %stored.identity.id, "bearer accepted");
    req.extensions_mut().insert(Authenticated { identity: stored.identity, token });
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn req(header: Option<&str>) -> Request {
        let mut b = axum::http::Request::builder().uri("/auth/me");
        if let Some(h) = header {
            b = b.header(AUTHORIZATION, h);
        }
        b.body(Body::empty()).unwrap()
    }

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_token(&req(Some("Bearer abc"))).as_deref(), Some("abc"));
        assert_eq!(bearer_token(&req(Some("bearer  abc "))).as_deref(), Some("abc"));
        assert!(bearer_token(&req(Some("Basic abc"))).is_none());
        assert!(bearer_token(&req(Some("Bearer "))).is_none());
        assert!(bearer_token(&req(None)).is_none());
    }
}
