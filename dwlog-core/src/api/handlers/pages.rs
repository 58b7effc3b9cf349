use crate::api::{ApiError, ApiResponse};
use crate::server::AppState;

#[cfg(not(feature = "static_files"))]
pub(crate) async fn serve(_state: &AppState, _path: &str) -> Result<ApiResponse, ApiError> {
    Err(ApiError::not_found("not found"))
}

/// A dashboard page, or a file under the web root.
#[cfg(feature = "static_files")]
pub(crate) async fn serve(state: &AppState, path: &str) -> Result<ApiResponse, ApiError> {
    use crate::static_files::{open_asset, page_file, resolve_page, resolve_static_path};

    let web_root = &state.config.paths.web_root;

    let resolved = match page_file(path) {
        Some(page) => resolve_page(web_root, page),
        None => resolve_static_path(web_root, path),
    };

    let file_path = resolved.map_err(|e| {
        tracing::debug!(path, reason = ?e, "static file rejected");
        ApiError::not_found("not found")
    })?;

    let asset = open_asset(&file_path)
        .await
        .map_err(|_| ApiError::not_found("not found"))?;

    Ok(ApiResponse::file(asset.file, asset.len, asset.content_type))
}
