use crate::api::handlers::{events, export, files, pages, stats, users};
use crate::api::{ApiError, ApiRequest, ApiResponse, Endpoint};
use crate::server::AppState;
use http::{Method, header};

/// Where a request goes before any handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    Api(Endpoint),
    /// Pages and web root files.
    Static,
    NotFound,
}

pub fn route(method: &Method, path: &str) -> Route {
    if method == Method::OPTIONS {
        return Route::Preflight;
    }

    match path.parse::<Endpoint>() {
        Ok(endpoint) if endpoint.accepts(method) => Route::Api(endpoint),
        _ if method == Method::GET || method == Method::HEAD => Route::Static,
        _ => Route::NotFound,
    }
}

/// Answers one request. Errors become their JSON bodies here, and every
/// response gets the CORS origin header.
pub async fn dispatch(state: &AppState, request: &ApiRequest) -> ApiResponse {
    let result = match route(&request.method, &request.path) {
        Route::Preflight => Ok(ApiResponse::preflight()),
        Route::Api(endpoint) => handle(state, endpoint, request).await,
        Route::Static => pages::serve(state, &request.path).await,
        Route::NotFound => Err(ApiError::not_found("not found")),
    };

    let response = result.unwrap_or_else(|e| {
        if let ApiError::Internal { message, detail } = &e {
            tracing::warn!(path = %request.path, error = %message, detail = %detail, "request failed");
        }
        e.into_response()
    });

    response.with_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
}

async fn handle(
    state: &AppState,
    endpoint: Endpoint,
    request: &ApiRequest,
) -> Result<ApiResponse, ApiError> {
    let query = &request.query;

    match endpoint {
        Endpoint::Ping => stats::ping(),
        Endpoint::StatsHeader => stats::header(state).await,
        Endpoint::ChartsSummary => stats::charts(state, query).await,
        Endpoint::Alarms => events::alarms(state, query).await,
        Endpoint::Notifications => events::notifications(state, query).await,
        Endpoint::Restarts => events::restarts(state, query).await,
        Endpoint::Metrics => events::metrics(state, query).await,
        Endpoint::NodeSummary => events::node(state, query).await,
        Endpoint::FilesList => files::list(state),
        Endpoint::FilesUpload => files::upload(state, request).await,
        Endpoint::FilesDelete => files::delete(state, request).await,
        Endpoint::ExportStart => export::start(state, request).await,
        Endpoint::ExportStatus => export::status(state, query),
        Endpoint::ExportDownload => export::download(state, query).await,
        Endpoint::Users => users::list(state),
        Endpoint::UserCreate => users::create(state, request),
        Endpoint::UserUpdate => users::update(state, request),
        Endpoint::UserDelete => users::delete(state, request),
        Endpoint::Login => users::login(state, request),
    }
}
