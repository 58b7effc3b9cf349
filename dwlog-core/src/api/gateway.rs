use crate::api::{ApiBody, ApiError, ApiRequest, ApiResponse, QueryParams, dispatch};
use crate::server::AppState;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use http::{Method, header};
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

const CHUNK_SIZE: usize = 32 * 1024;

/// The dwlog HTTP service.
pub struct ApiGateway {
    state: Arc<AppState>,
}

impl ApiGateway {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ProxyHttp for ApiGateway {
    type CTX = ();

    fn new_ctx(&self) -> Self::CTX {}

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        // request_filter answers every request.
        Err(Error::new(Custom("ApiGateway attempted to proxy upstream (bug)")))
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        let req = session.req_header();
        let method = req.method.clone();
        let path = req.uri.path().to_owned();
        let query = QueryParams::parse(req.uri.query());
        let content_type = req
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        let limit = self.state.config.server.max_body_bytes;
        let response = match read_body(session, limit).await? {
            Some(body) => {
                let request = ApiRequest {
                    method: method.clone(),
                    path: path.clone(),
                    query,
                    content_type,
                    body,
                };
                dispatch(&self.state, &request).await
            }
            None => ApiError::PayloadTooLarge { limit }
                .into_response()
                .with_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        };

        tracing::info!(
            method = %method,
            path = %path,
            status = response.status.as_u16(),
            "request handled"
        );

        write_response(session, response, method == Method::HEAD).await?;
        Ok(true)
    }
}

/// Buffers the request body. `None` once it grows past `limit`.
async fn read_body(session: &mut Session, limit: usize) -> pingora::Result<Option<Bytes>> {
    let declared = session
        .req_header()
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Ok(None);
    }

    let mut buf = BytesMut::new();
    while let Some(chunk) = session.read_request_body().await? {
        if buf.len() + chunk.len() > limit {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(Some(buf.freeze()))
}

async fn write_response(
    session: &mut Session,
    response: ApiResponse,
    head_only: bool,
) -> pingora::Result<()> {
    let mut resp = ResponseHeader::build(response.status, None)?;
    resp.insert_header(header::CONTENT_LENGTH, response.content_length().to_string())?;
    for (name, value) in response.headers {
        resp.insert_header(name, value)?;
    }

    // Write headers (not end-of-stream yet)
    session.write_response_header(Box::new(resp), false).await?;

    if head_only {
        session.write_response_body(None, true).await?;
        return Ok(());
    }

    match response.body {
        ApiBody::Empty => {
            session.write_response_body(None, true).await?;
        }

        ApiBody::Bytes(bytes) => {
            session.write_response_body(Some(bytes), true).await?;
        }

        ApiBody::File { mut file, .. } => {
            // Allocate once per request.
            let mut buf = BytesMut::with_capacity(CHUNK_SIZE);

            loop {
                buf.resize(CHUNK_SIZE, 0);

                let n = file
                    .read(&mut buf[..])
                    .await
                    .map_err(|_| Error::new(Custom("file read error")))?;

                if n == 0 {
                    break;
                }

                buf.truncate(n);
                let chunk: Bytes = buf.split().freeze();
                session.write_response_body(Some(chunk), false).await?;
            }

            // End-of-stream.
            session.write_response_body(None, true).await?;
        }
    }

    Ok(())
}
