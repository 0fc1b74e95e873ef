use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::auth::repository::memory::InMemoryIdentityRepository;
use service::random::FixedRandom;
use tower::ServiceExt;

use server::startup::build_app;
use server::state::AppState;

fn app() -> Router {
    let state = AppState::new(Arc::new(InMemoryIdentityRepository::new()), Arc::new(FixedRandom::new(0.5)));
    build_app(state)
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

fn post_json(uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?)
}

fn with_bearer(method: &str, uri: &str, token: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?)
}

#[tokio::test]
async fn signup_login_me_logout() -> anyhow::Result<()> {
    let app = app();
    let creds = json!({"email": "new@example.com", "password": "S3curePass!", "username": "NewUser"});

    let (status, body) = send(&app, post_json("/auth/signup", creds.clone())?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["id"], "1");
    assert_eq!(body["user"]["username"], "NewUser");
    assert!(body["user"]["createdAt"].is_string());
    let signup_token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!signup_token.is_empty());

    let (status, body) = send(&app, post_json("/auth/signup", creds)?).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "User already exists");

    let (status, body) =
        send(&app, post_json("/auth/login", json!({"email": "new@example.com", "password": "S3curePass!"}))?).await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert_ne!(token, signup_token);

    let (status, body) = send(&app, with_bearer("GET", "/auth/me", &token)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "new@example.com");

    let (status, body) = send(&app, with_bearer("POST", "/auth/logout", &token)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    let (status, _) = send(&app, with_bearer("GET", "/auth/me", &token)?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // the signup token is independent and still live
    let (status, _) = send(&app, with_bearer("GET", "/auth/me", &signup_token)?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_401() -> anyhow::Result<()> {
    let app = app();
    send(&app, post_json("/auth/signup", json!({"email": "a@x.com", "password": "right", "username": "A"}))?).await?;

    let (status, body) = send(&app, post_json("/auth/login", json!({"email": "a@x.com", "password": "wrong"}))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid email or password");

    let (status, _) = send(&app, post_json("/auth/login", json!({"email": "b@x.com", "password": "right"}))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn signup_validates_input() -> anyhow::Result<()> {
    let app = app();
    let (status, _) =
        send(&app, post_json("/auth/signup", json!({"email": "not-an-email", "password": "pw", "username": "A"}))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send(&app, post_json("/auth/signup", json!({"email": "a@x.com", "password": "pw", "username": "  "}))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn protected_routes_need_a_bearer() -> anyhow::Result<()> {
    let app = app();
    let req = Request::builder().uri("/auth/me").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["detail"].is_string());

    let (status, _) = send(&app, with_bearer("POST", "/auth/logout", "bogus")?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn public_routes() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, Request::builder().uri("/").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Resume Boost API");

    let (status, body) = send(&app, Request::builder().uri("/health").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/jobs/{id}/apply"].is_object());
    Ok(())
}

#[tokio::test]
async fn jobs_and_applications() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, post_json("/api/jobs/recommendations", json!({}))?).await?;
    assert_eq!(status, StatusCode::OK);
    let jobs = body.as_array().cloned().unwrap_or_default();
    assert_eq!(jobs.len(), 5);
    assert_eq!(jobs[0]["matchScore"], 92);
    assert_eq!(jobs[1]["type"], "Remote");
    assert_eq!(jobs[4]["postedAt"], "1 day ago");

    let req = Request::builder().method("POST").uri("/api/jobs/recommendations").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(5));

    let req = Request::builder().method("POST").uri("/api/jobs/3/apply").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Your application has been submitted successfully!");

    let req = Request::builder().method("POST").uri("/api/jobs/999/apply").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Job not found");
    Ok(())
}

fn multipart(field: &str) -> anyhow::Result<Request<Body>> {
    let boundary = "resumeboostboundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 fake\r\n--{boundary}--\r\n"
    );
    Ok(Request::builder()
        .method("POST")
        .uri("/api/resume/analyze")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))?)
}

#[tokio::test]
async fn analyze_scores_uploads() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, multipart("file")?).await?;
    assert_eq!(status, StatusCode::OK);
    // FixedRandom(0.5) pins every draw to its midpoint
    assert_eq!(body["overall"], 78);
    assert_eq!(body["categories"]["experience"], 73);
    assert_eq!(body["suggestions"].as_array().map(Vec::len), Some(5));

    let (status, body) = send(&app, multipart("attachment")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No file uploaded");
    Ok(())
}
