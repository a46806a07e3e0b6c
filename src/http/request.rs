//! Request building
//!
//! Turns a method, an [`Endpoint`] and call parameters into a transport-ready
//! [`RequestDescriptor`]. Read calls carry their parameters in the query
//! string; write calls carry them as a JSON body.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde_json::Value;

use crate::error::{GitHubError, Result};
use crate::http::endpoint::{Endpoint, Pagination};
use crate::http::param::Params;

/// Media type for the v3 REST API
pub const DEFAULT_ACCEPT: &str = "application/vnd.github.v3+json";

/// Identifier sent when the caller does not configure one
pub const DEFAULT_USER_AGENT: &str = concat!("ghrest/", env!("CARGO_PKG_VERSION"));

/// Headers and pagination policy shared by every request from one client
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub headers: HeaderMap,
    pub pagination: Pagination,
}

impl RequestDefaults {
    pub fn new(user_agent: &str, pagination: Pagination) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|_| {
                GitHubError::InvalidInput(format!("Invalid user agent: {user_agent:?}"))
            })?,
        );
        Ok(Self {
            headers,
            pagination,
        })
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        Self {
            headers,
            pagination: Pagination::default(),
        }
    }
}

/// Everything the connector needs to send one request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path and query, relative to the API base URL
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Whether a method sends its parameters in the body
pub fn is_write(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}

impl RequestDescriptor {
    /// Build a request for `endpoint`
    ///
    /// `body` is merged over the leftover parameters of a write call; read
    /// calls ignore it.
    pub fn build(
        method: Method,
        endpoint: &Endpoint,
        params: &Params,
        body: Option<&Value>,
        defaults: &RequestDefaults,
    ) -> Result<Self> {
        let mut headers = defaults.headers.clone();
        for (name, value) in endpoint.headers() {
            headers.insert(name.clone(), value.clone());
        }

        let template = endpoint.template();
        let (url, body) = if is_write(&method) {
            let (expansion, leftover) = template.expand_split(params, &defaults.pagination)?;
            let body = json_body(&leftover, body)?;
            (expansion.to_url(), body)
        } else {
            let expansion = template.expand_with(params, &defaults.pagination)?;
            (expansion.to_url(), None)
        };

        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    /// Value of a query parameter in the built URL (still percent-encoded)
    pub fn query_value(&self, key: &str) -> Option<&str> {
        let (_, query) = self.url.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == key).then_some(v)
        })
    }
}

fn json_body(leftover: &Params, explicit: Option<&Value>) -> Result<Option<Vec<u8>>> {
    let mut object = leftover.to_json_object()?;
    let value = match explicit {
        Some(Value::Object(extra)) => {
            for (k, v) in extra {
                object.insert(k.clone(), v.clone());
            }
            Value::Object(object)
        }
        Some(other) if object.is_empty() => other.clone(),
        Some(_) => {
            return Err(GitHubError::Encoding(
                "a non-object body cannot be combined with extra parameters".to_string(),
            ))
        }
        None if object.is_empty() => return Ok(None),
        None => Value::Object(object),
    };
    Ok(Some(serde_json::to_vec(&value).map_err(|e| {
        GitHubError::Encoding(e.to_string())
    })?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint(s: &str) -> Endpoint {
        Endpoint::parse(s).unwrap()
    }

    #[test]
    fn test_get_puts_params_in_query() {
        let req = RequestDescriptor::build(
            Method::GET,
            &endpoint("/users/{username}/gists{?since}"),
            &Params::new()
                .with("username", "octocat")
                .with("since", "2020-01-01")
                .with("page", 3),
            None,
            &RequestDefaults::default(),
        )
        .unwrap();

        assert!(req.url.starts_with("/users/octocat/gists?"));
        assert_eq!(req.query_value("since"), Some("2020-01-01"));
        assert_eq!(req.query_value("page"), Some("3"));
        assert!(req.body.is_none());
        assert!(req.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_default_headers() {
        let req = RequestDescriptor::build(
            Method::GET,
            &endpoint("/gists/public"),
            &Params::new(),
            None,
            &RequestDefaults::default(),
        )
        .unwrap();
        assert_eq!(req.headers[ACCEPT], DEFAULT_ACCEPT);
        assert_eq!(req.headers[USER_AGENT], DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_endpoint_accept_replaces_default() {
        let ep = endpoint("/search/commits?q={+q}")
            .with_accept("application/vnd.github.cloak-preview");
        let req = RequestDescriptor::build(
            Method::GET,
            &ep,
            &Params::new().with("q", "fix"),
            None,
            &RequestDefaults::default(),
        )
        .unwrap();
        let accepts: Vec<_> = req.headers.get_all(ACCEPT).iter().collect();
        assert_eq!(accepts, vec!["application/vnd.github.cloak-preview"]);
    }

    #[test]
    fn test_write_puts_params_in_body() {
        let req = RequestDescriptor::build(
            Method::PATCH,
            &endpoint("/gists/{gist_id}"),
            &Params::new()
                .with("gist_id", "abc")
                .with("description", "updated")
                .with("per_page", 500),
            None,
            &RequestDefaults::default(),
        )
        .unwrap();

        assert_eq!(req.url, "/gists/abc");
        let body: Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"description": "updated", "per_page": 100}));
        assert_eq!(req.headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_write_merges_explicit_body() {
        let files = json!({"files": {"a.txt": {"content": "hi"}}});
        let req = RequestDescriptor::build(
            Method::PATCH,
            &endpoint("/gists/{gist_id}"),
            &Params::new().with("gist_id", "abc").with("description", "d"),
            Some(&files),
            &RequestDefaults::default(),
        )
        .unwrap();
        let body: Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"description": "d", "files": {"a.txt": {"content": "hi"}}})
        );
    }

    #[test]
    fn test_write_without_params_has_no_body() {
        let req = RequestDescriptor::build(
            Method::PUT,
            &endpoint("/gists/{gist_id}/star"),
            &Params::new().with("gist_id", "abc"),
            None,
            &RequestDefaults::default(),
        )
        .unwrap();
        assert!(req.body.is_none());
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        let err = RequestDefaults::new("bad\nagent", Pagination::default()).unwrap_err();
        assert!(matches!(err, GitHubError::InvalidInput(_)));
    }
}
