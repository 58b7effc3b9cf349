use crate::api::handlers::load_corpus;
use crate::api::{ApiError, ApiResponse, QueryParams};
use crate::server::AppState;
use crate::stats::{TopN, charts_summary, header_stats};
use serde_json::json;

pub(crate) fn ping() -> Result<ApiResponse, ApiError> {
    ApiResponse::ok(&json!({ "ok": true }))
}

pub(crate) async fn header(state: &AppState) -> Result<ApiResponse, ApiError> {
    let corpus = load_corpus(state).await?;
    ApiResponse::ok(&header_stats(&corpus))
}

pub(crate) async fn charts(state: &AppState, query: &QueryParams) -> Result<ApiResponse, ApiError> {
    let n = TopN::from_param(query.get("n"));
    let corpus = load_corpus(state).await?;
    ApiResponse::ok(&charts_summary(&corpus, n))
}
