use crate::api::{ApiError, ApiRequest, ApiResponse};
use crate::server::AppState;
use crate::users::{LoginRequest, NewUser, UserPatch, UserSelector};
use http::StatusCode;
use serde_json::{Value, json};

pub(crate) fn list(state: &AppState) -> Result<ApiResponse, ApiError> {
    let users = state.users.list()?;
    ApiResponse::ok(&json!({ "users": users }))
}

pub(crate) fn create(state: &AppState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let user = state.users.create(request.json::<NewUser>())?;
    ApiResponse::json(StatusCode::CREATED, &json!({ "ok": true, "user": user }))
}

/// The body both selects the user and carries the fields to overwrite.
pub(crate) fn update(state: &AppState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let selector = request.json::<UserSelector>();
    let patch = request.json::<UserPatch>();

    let user = state.users.update(&selector, patch)?;

    ApiResponse::ok(&json!({ "ok": true, "user": user }))
}

pub(crate) fn delete(state: &AppState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let payload = request.json_value();
    let id = payload.get("id").and_then(Value::as_str);

    state.users.delete(id)?;
    ApiResponse::ok(&json!({ "ok": true }))
}

/// Identity lookup only. No password is checked.
pub(crate) fn login(state: &AppState, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let user = state.users.login(&request.json::<LoginRequest>())?;
    ApiResponse::ok(&json!({ "ok": true, "user": user }))
}
