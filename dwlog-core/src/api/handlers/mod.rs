pub(crate) mod events;
pub(crate) mod export;
pub(crate) mod files;
pub(crate) mod pages;
pub(crate) mod stats;
pub(crate) mod users;

use crate::api::ApiError;
use crate::corpus::{Corpus, scan_corpus};
use crate::server::AppState;

/// Scans the source directory on the blocking pool. Nothing is cached, so
/// uploads and deletes are visible on the next request.
pub(crate) async fn load_corpus(state: &AppState) -> Result<Corpus, ApiError> {
    let dir = state.files.dir().to_path_buf();
    tokio::task::spawn_blocking(move || scan_corpus(&dir))
        .await
        .map_err(|e| ApiError::internal("corpus scan failed", e))
}
