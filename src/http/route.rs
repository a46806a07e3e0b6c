//! Call descriptions
//!
//! A [`Route`] knows which endpoint it targets, with which method and
//! parameters. An [`ApiRequest`] additionally names the type its response
//! decodes into. Together they are all a call needs to go through
//! [`crate::GitHub::execute`].

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::endpoint::Endpoint;
use crate::http::param::Params;

/// Endpoint, method and parameters of one call
pub trait Route {
    fn method(&self) -> Method {
        Method::GET
    }

    fn endpoint(&self) -> &Endpoint;

    fn params(&self) -> Params;

    /// Structured body merged into write calls
    fn body(&self) -> Option<Value> {
        None
    }
}

/// A route whose success response decodes into `Output`
pub trait ApiRequest: Route {
    type Output: DeserializeOwned;
}
