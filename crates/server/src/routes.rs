pub mod auth;
pub mod jobs;
pub mod resume;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, Message};

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub const WELCOME: &str = "Welcome to Resume Boost API";

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Welcome message", body = crate::openapi::MessageDoc)))]
pub async fn root() -> Json<Message> {
    Json(Message::new(WELCOME))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthDoc)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public, bearer-protected and API routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let auth_public = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login));

    let auth_protected = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), crate::auth::require_bearer));

    let api = Router::new()
        .route("/api/resume/analyze", post(resume::analyze))
        .route("/api/jobs/recommendations", post(jobs::recommendations))
        .route("/api/jobs/:id/apply", post(jobs::apply));

    public
        .merge(auth_public)
        .merge(auth_protected)
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
