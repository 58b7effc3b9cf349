use crate::api::ApiError;
use bytes::Bytes;
use http::{HeaderName, StatusCode, header};
use serde::Serialize;
use tokio::fs::File;

const JSON: &str = "application/json";

#[derive(Debug)]
pub enum ApiBody {
    Empty,
    Bytes(Bytes),
    /// Streamed in chunks by the gateway.
    File { file: File, len: u64 },
}

#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: Vec<(HeaderName, String)>,
    pub body: ApiBody,
}

impl ApiResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: ApiBody::Empty,
        }
    }

    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Result<Self, ApiError> {
        let bytes =
            serde_json::to_vec(body).map_err(|e| ApiError::internal("json serialization failed", e))?;
        Ok(Self::new(status)
            .with_header(header::CONTENT_TYPE, JSON)
            .with_body(ApiBody::Bytes(bytes.into())))
    }

    pub fn ok<T: Serialize>(body: &T) -> Result<Self, ApiError> {
        Self::json(StatusCode::OK, body)
    }

    /// For bodies that cannot fail to serialize, such as error payloads.
    pub(crate) fn from_value(status: StatusCode, body: &serde_json::Value) -> Self {
        Self::new(status)
            .with_header(header::CONTENT_TYPE, JSON)
            .with_body(ApiBody::Bytes(body.to_string().into()))
    }

    /// CORS preflight answer.
    pub fn preflight() -> Self {
        Self::new(StatusCode::NO_CONTENT)
            .with_header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
            .with_header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
    }

    pub fn file(file: File, len: u64, content_type: impl Into<String>) -> Self {
        Self::new(StatusCode::OK)
            .with_header(header::CONTENT_TYPE, content_type)
            .with_body(ApiBody::File { file, len })
    }

    pub fn with_header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_body(mut self, body: ApiBody) -> Self {
        self.body = body;
        self
    }

    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn content_length(&self) -> u64 {
        match &self.body {
            ApiBody::Empty => 0,
            ApiBody::Bytes(bytes) => bytes.len() as u64,
            ApiBody::File { len, .. } => *len,
        }
    }

    /// Buffered body bytes; empty for files.
    pub fn bytes(&self) -> &[u8] {
        match &self.body {
            ApiBody::Bytes(bytes) => bytes,
            _ => &[],
        }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(e: ApiError) -> Self {
        e.into_response()
    }
}
