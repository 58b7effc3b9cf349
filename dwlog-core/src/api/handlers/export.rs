use crate::api::{ApiError, ApiRequest, ApiResponse, QueryParams};
use crate::conf::ExportMode;
use crate::export::{ExportJob, ExportRequest, JobId, JobStatus};
use crate::server::AppState;
use http::header;
use serde_json::json;

const ZIP: &str = "application/zip";

pub(crate) async fn start(state: &AppState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let export = ExportRequest::from_json(&request.json_value());
    let id = state.exports.start(export).await;

    if state.exports.mode() == ExportMode::Inline
        && let Some(job) = state.exports.registry().get(&id)
        && job.status == JobStatus::Error
    {
        return Err(ApiError::internal("export failed", job.message));
    }

    ApiResponse::ok(&json!({ "job_id": id }))
}

fn find_job(state: &AppState, query: &QueryParams) -> Result<ExportJob, ApiError> {
    query
        .get("id")
        .and_then(|raw| raw.trim().parse::<JobId>().ok())
        .and_then(|id| state.exports.registry().get(&id))
        .ok_or_else(|| ApiError::not_found("job not found"))
}

pub(crate) fn status(state: &AppState, query: &QueryParams) -> Result<ApiResponse, ApiError> {
    let job = find_job(state, query)?;
    ApiResponse::ok(&job.snapshot())
}

/// Streams the finished archive.
pub(crate) async fn download(state: &AppState, query: &QueryParams) -> Result<ApiResponse, ApiError> {
    let job = find_job(state, query)?;
    let path = job
        .download_path()
        .ok_or_else(|| ApiError::not_found("file not ready"))?;

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|_| ApiError::not_found("file not ready"))?;
    let len = file
        .metadata()
        .await
        .map_err(|e| ApiError::internal("export archive unreadable", e))?
        .len();

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ApiResponse::file(file, len, ZIP)
        .with_header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .with_header(header::CACHE_CONTROL, "no-cache"))
}

