//! HTTP plumbing for the GitHub REST API
//!
//! This module contains:
//! - Parameter values and their wire form
//! - URI-template endpoints with pagination folding
//! - Request building with default and per-endpoint headers
//! - The connector (auth, timeouts, cancellation, rate limits)
//! - Response decoding and the search envelope

pub mod connector;
pub mod endpoint;
pub mod param;
pub mod rate_limit;
pub mod request;
pub mod response;
pub mod route;

pub use connector::{CallOptions, Connector, RawResponse};
pub use endpoint::{Endpoint, EndpointTemplate, Expansion, Pagination};
pub use param::{ParamValue, Params, ToParam};
pub use rate_limit::RateLimit;
pub use request::RequestDescriptor;
pub use response::SearchResponse;
pub use route::{ApiRequest, Route};
