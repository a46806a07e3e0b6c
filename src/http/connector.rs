//! Transport connector
//!
//! Owns the HTTP client, the credential and the rate-limit state for one
//! client instance. Every response, successful or not, refreshes the
//! rate-limit snapshot before it is handed back.

use std::time::Duration;

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::core::credentials::Auth;
use crate::error::{GitHubError, Result};
use crate::http::rate_limit::{RateLimit, RateLimitState};
use crate::http::request::{RequestDefaults, RequestDescriptor};

/// Per-call knobs
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Overrides the connector's default timeout
    pub timeout: Option<Duration>,
    /// Aborts the call when triggered
    pub cancel: Option<CancellationToken>,
}

impl CallOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// A response as received, before any status check or decoding
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Quota snapshot taken from this response
    pub rate_limit: RateLimit,
}

/// Sends requests on behalf of one client
#[derive(Debug)]
pub struct Connector {
    http: Client,
    base_url: String,
    auth: Option<Auth>,
    defaults: RequestDefaults,
    timeout: Option<Duration>,
    rate_limit: RateLimitState,
}

impl Connector {
    pub fn new(
        base_url: &str,
        auth: Option<Auth>,
        defaults: RequestDefaults,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| GitHubError::InvalidInput(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GitHubError::InvalidInput(format!(
                "API URL must be http or https, got '{}'",
                base_url
            )));
        }

        let http = Client::builder().build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            defaults,
            timeout,
            rate_limit: RateLimitState::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    /// Most recently observed quota
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit.snapshot()
    }

    /// Absolute URL for a request path; absolute inputs pass through
    fn resolve(&self, path: &str) -> Result<Url> {
        let full = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        };
        Url::parse(&full)
            .map_err(|e| GitHubError::InvalidInput(format!("Invalid request URL '{}': {}", full, e)))
    }

    /// Send one request and return the raw response
    ///
    /// Non-success statuses are returned, not turned into errors; the caller
    /// decides what a status means.
    pub async fn send(&self, request: RequestDescriptor, options: &CallOptions) -> Result<RawResponse> {
        let url = self.resolve(&request.url)?;

        let mut headers = request.headers;
        if let Some(auth) = &self.auth {
            headers.insert(AUTHORIZATION, auth.header_value()?);
        }

        let mut builder = self.http.request(request.method.clone(), url.clone()).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let timeout = options.timeout.or(self.timeout);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        debug!(
            method = %request.method,
            url = %url,
            authenticated = self.auth.is_some(),
            "sending GitHub request"
        );

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            Ok::<_, reqwest::Error>((status, headers, body))
        };

        let outcome = match &options.cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => {
                    debug!(url = %url, "GitHub request cancelled");
                    return Err(GitHubError::Cancelled);
                }
                outcome = exchange => outcome,
            },
            None => exchange.await,
        };

        let (status, headers, body) = outcome.map_err(|e| match timeout {
            Some(limit) if e.is_timeout() => GitHubError::Timeout(limit),
            _ => GitHubError::Network(e),
        })?;

        let rate_limit = self.rate_limit.update(&headers);
        debug!(status = %status, rate_limit = %rate_limit, "received GitHub response");
        if rate_limit.is_exhausted() {
            warn!(reset = ?rate_limit.reset, "GitHub rate limit exhausted");
        }

        Ok(RawResponse {
            status,
            headers,
            body,
            rate_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connector(base: &str) -> Connector {
        Connector::new(base, None, RequestDefaults::default(), None).unwrap()
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let c = connector("https://ghe.example.com/api/v3/");
        assert_eq!(
            c.resolve("/search/code?q=x").unwrap().as_str(),
            "https://ghe.example.com/api/v3/search/code?q=x"
        );
        assert_eq!(
            c.resolve("https://api.github.com/gists/1").unwrap().as_str(),
            "https://api.github.com/gists/1"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = Connector::new("ftp://example.com", None, RequestDefaults::default(), None)
            .unwrap_err();
        assert!(matches!(err, GitHubError::InvalidInput(_)));
        assert!(Connector::new("nope", None, RequestDefaults::default(), None).is_err());
    }

    #[test]
    fn test_rate_limit_starts_unset() {
        assert_eq!(connector("https://api.github.com").rate_limit(), RateLimit::default());
    }
}
