use crate::api::handlers::load_corpus;
use crate::api::{ApiError, ApiRequest, ApiResponse};
use crate::files::{items_from_json, items_from_multipart};
use crate::server::AppState;
use crate::stats::header_stats;
use serde_json::{Value, json};

pub(crate) fn list(state: &AppState) -> Result<ApiResponse, ApiError> {
    ApiResponse::ok(&json!({ "files": state.files.list() }))
}

/// Saves multipart or JSON uploads into the source directory.
pub(crate) async fn upload(state: &AppState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let items = if request.is_multipart() {
        items_from_multipart(request.body.clone(), &request.content_type).await?
    } else {
        items_from_json(&request.json_value())
    };

    let saved = state.files.save_all(items);
    tracing::info!(saved = saved.len(), "files uploaded");

    let stats = header_stats(&load_corpus(state).await?);
    ApiResponse::ok(&json!({
        "ok": true,
        "savedCount": saved.len(),
        "saved": saved,
        "totalFiles": state.files.count(),
        "stats": stats,
    }))
}

pub(crate) async fn delete(state: &AppState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let payload = request.json_value();
    let names: Vec<String> = match payload.get("files").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => return Err(ApiError::bad_request("files must be a non-empty array")),
    };

    let deleted = state.files.delete(names.as_slice());
    tracing::info!(requested = names.len(), deleted = deleted.len(), "files deleted");

    let stats = header_stats(&load_corpus(state).await?);
    ApiResponse::ok(&json!({
        "ok": true,
        "deletedCount": deleted.len(),
        "deleted": deleted,
        "stats": stats,
    }))
}
