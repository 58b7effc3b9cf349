//! HTTP surface: JSON API, export downloads and the dashboard pages.
//!
//! [`ApiGateway`] is a terminal pingora service. It never proxies; every
//! request is answered from [`router::dispatch`].

mod endpoint;
mod error;
mod gateway;
mod handlers;
mod request;
mod response;
mod router;


pub use endpoint::Endpoint;
pub use error::ApiError;
pub use gateway::ApiGateway;
pub use request::{ApiRequest, QueryParams};
pub use response::{ApiBody, ApiResponse};
pub use router::{Route, dispatch, route};
