use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use models::{
    ApplicationResult, AuthResponse, CategoryScores, Identity, JobListing, JobType, LoginCredentials, ResumeScore,
    SignupCredentials,
};

#[derive(ToSchema)]
pub struct HealthDoc {
    pub status: String,
}

#[derive(ToSchema)]
pub struct MessageDoc {
    pub message: String,
}

/// Multipart form for `/api/resume/analyze`.
#[derive(ToSchema)]
pub struct ResumeUploadDoc {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub detail: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::resume::analyze,
        crate::routes::jobs::recommendations,
        crate::routes::jobs::apply,
    ),
    components(
        schemas(
            HealthDoc,
            MessageDoc,
            ErrorDoc,
            ResumeUploadDoc,
            Identity,
            LoginCredentials,
            SignupCredentials,
            AuthResponse,
            CategoryScores,
            ResumeScore,
            JobType,
            JobListing,
            ApplicationResult,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "resume"),
        (name = "jobs")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/health",
            "/auth/signup",
            "/auth/login",
            "/auth/logout",
            "/auth/me",
            "/api/resume/analyze",
            "/api/jobs/recommendations",
            "/api/jobs/{id}/apply",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
        assert!(components.schemas.contains_key("JobListing"));
    }
}
