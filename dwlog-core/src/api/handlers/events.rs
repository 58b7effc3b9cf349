use crate::api::handlers::load_corpus;
use crate::api::{ApiError, ApiResponse, QueryParams};
use crate::query::{
    DateRange, EVENT_LIMIT, EventQuery, Limit, METRIC_LIMIT, MetricQuery, NodeFilter,
    RESTART_LIMIT, RestartQuery, node_summary,
};
use crate::server::AppState;
use serde_json::json;

fn event_query(query: &QueryParams) -> EventQuery {
    EventQuery {
        node: NodeFilter::parse(query.get("node")),
        range: DateRange::new(query.get("from"), query.get("to")),
        limit: Limit::from_param(query.get("limit"), EVENT_LIMIT),
        ..EventQuery::default()
    }
    .with_severity(query.get("severity"))
}

pub(crate) async fn alarms(state: &AppState, query: &QueryParams) -> Result<ApiResponse, ApiError> {
    let corpus = load_corpus(state).await?;
    let lga = event_query(query).apply(&corpus.alarms);
    ApiResponse::ok(&json!({ "lga": lga }))
}

pub(crate) async fn notifications(
    state: &AppState,
    query: &QueryParams,
) -> Result<ApiResponse, ApiError> {
    let corpus = load_corpus(state).await?;
    let lge = event_query(query).apply(&corpus.notifications);
    ApiResponse::ok(&json!({ "lge": lge }))
}

pub(crate) async fn restarts(state: &AppState, query: &QueryParams) -> Result<ApiResponse, ApiError> {
    let filter = RestartQuery {
        node: NodeFilter::parse(query.get("node")),
        range: DateRange::new(query.get("from"), query.get("to")),
        limit: Limit::from_param(query.get("limit"), RESTART_LIMIT),
        ..RestartQuery::default()
    }
    .with_type_reason(query.get("typeReason"));

    let corpus = load_corpus(state).await?;
    let restarts = filter.apply(&corpus.restarts);
    ApiResponse::ok(&json!({ "lgdRestarts": restarts }))
}

pub(crate) async fn metrics(state: &AppState, query: &QueryParams) -> Result<ApiResponse, ApiError> {
    let filter = MetricQuery {
        node: NodeFilter::parse(query.get("node")),
        limit: Limit::from_param(query.get("limit"), METRIC_LIMIT),
        ..MetricQuery::default()
    }
    .with_metric(query.get("metric"));

    let corpus = load_corpus(state).await?;
    let rows = filter.apply(&corpus.metrics);
    ApiResponse::ok(&json!({ "lgd": rows }))
}

pub(crate) async fn node(state: &AppState, query: &QueryParams) -> Result<ApiResponse, ApiError> {
    let node = NodeFilter::parse(query.get("node"))
        .ok_or_else(|| ApiError::bad_request("node is required"))?;

    let corpus = load_corpus(state).await?;
    ApiResponse::ok(&node_summary(&corpus, &node))
}
