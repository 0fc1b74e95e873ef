use axum::{extract::State, http::StatusCode, Extension, Json};
use common::types::Message;
use models::{user, AuthResponse, Identity, LoginCredentials, SignupCredentials};
use tracing::{info, instrument};

use crate::auth::Authenticated;
use crate::errors::ApiError;
use crate::state::AppState;

#[utoipa::path(post, path = "/auth/signup", tag = "auth", request_body = SignupCredentials, responses((status = 201, description = "Registered", body = AuthResponse), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
#[instrument(skip(state, input), fields(email = %input.email))]
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupCredentials>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    user::validate_email(&input.email)?;
    user::validate_username(&input.username)?;
    if input.password.is_empty() {
        return Err(ApiError::bad_request("password must not be empty"));
    }

    let identity = state.auth.register(input).await?;
    let token = state.tokens.issue(&identity.email);
    info!(user_id = %identity.id, "user_signed_up");
    Ok((StatusCode::CREATED, Json(AuthResponse { user: identity, token })))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = LoginCredentials, responses((status = 200, description = "Logged in", body = AuthResponse), (status = 401, description = "Unauthorized")))]
#[instrument(skip(state, input), fields(email = %input.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginCredentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    let identity = state.auth.authenticate(input).await?;
    let token = state.tokens.issue(&identity.email);
    info!(user_id = %identity.id, "user_logged_in");
    Ok(Json(AuthResponse { user: identity, token }))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 200, description = "Token revoked", body = crate::openapi::MessageDoc), (status = 401, description = "Unauthorized")), security(("bearer" = [])))]
pub async fn logout(State(state): State<AppState>, Extension(auth): Extension<Authenticated>) -> Json<Message> {
    state.tokens.revoke(&auth.token);
    info!(user_id = %auth.identity.id, "user_logged_out");
    Json(Message::new("Logged out successfully"))
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current identity", body = Identity), (status = 401, description = "Unauthorized")), security(("bearer" = [])))]
pub async fn me(Extension(auth): Extension<Authenticated>) -> Json<Identity> {
    Json(auth.identity)
}
