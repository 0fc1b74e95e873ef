use axum::{extract::{Multipart, State}, Json};
use models::{ResumeFile, ResumeScore};
use service::scoring;
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::state::AppState;

/// Score an uploaded resume. The upload is read but its content does not
/// influence the score.
#[utoipa::path(post, path = "/api/resume/analyze", tag = "resume", request_body(content = crate::openapi::ResumeUploadDoc, content_type = "multipart/form-data"), responses((status = 200, description = "Resume score", body = ResumeScore), (status = 400, description = "No file uploaded")))]
pub async fn analyze(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<ResumeScore>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| ApiError::bad_request(e.to_string()))?;
        upload = Some(ResumeFile::new(file_name, content_type, bytes));
        break;
    }
    let file = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    debug!(file_name = %file.file_name, bytes = file.len(), "resume received");

    let score = scoring::score_resume(state.rng.as_ref());
    info!(overall = score.overall, "resume_analyzed");
    Ok(Json(score))
}
