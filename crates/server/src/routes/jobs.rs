use axum::{extract::Path, Json};
use models::{ApplicationResult, JobListing, ResumeScore};
use service::catalog;
use tracing::info;

use crate::errors::ApiError;

/// The full catalog. The optional score is accepted and ignored.
#[utoipa::path(post, path = "/api/jobs/recommendations", tag = "jobs", request_body(content = ResumeScore, description = "Resume score; may be omitted"), responses((status = 200, description = "Recommended jobs", body = [JobListing])))]
pub async fn recommendations(_score: Option<Json<ResumeScore>>) -> Json<Vec<JobListing>> {
    Json(catalog::jobs().to_vec())
}

#[utoipa::path(post, path = "/api/jobs/{id}/apply", tag = "jobs", params(("id" = String, Path, description = "Job id")), responses((status = 200, description = "Application submitted", body = ApplicationResult), (status = 404, description = "Job not found")))]
pub async fn apply(Path(id): Path<String>) -> Result<Json<ApplicationResult>, ApiError> {
    let job = catalog::find_job(&id).ok_or_else(|| ApiError::not_found("Job not found"))?;
    info!(job_id = %job.id, "job_application_submitted");
    Ok(Json(ApplicationResult { success: true, message: catalog::APPLICATION_SUBMITTED.to_string() }))
}
