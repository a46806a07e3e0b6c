//! GitHub API client

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::core::config::{Config, DEFAULT_API_URL};
use crate::core::credentials::Auth;
use crate::error::Result;
use crate::github::gists::GistHandler;
use crate::github::repos::RepoHandler;
use crate::github::search::SearchHandler;
use crate::github::users::UserHandler;
use crate::http::connector::{CallOptions, Connector, RawResponse};
use crate::http::endpoint::{Endpoint, Pagination};
use crate::http::param::Params;
use crate::http::rate_limit::RateLimit;
use crate::http::request::{RequestDefaults, RequestDescriptor, DEFAULT_USER_AGENT};
use crate::http::route::{ApiRequest, Route};

/// GitHub REST API client
///
/// Cheap to clone; clones share the connection pool and the rate-limit
/// snapshot.
#[derive(Debug, Clone)]
pub struct GitHub {
    connector: Arc<Connector>,
}

/// Builder for [`GitHub`]
#[derive(Debug)]
pub struct GitHubBuilder {
    base_url: String,
    auth: Option<Auth>,
    user_agent: String,
    timeout: Option<Duration>,
    pagination: Pagination,
}

impl Default for GitHubBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            auth: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            pagination: Pagination::default(),
        }
    }
}

impl GitHubBuilder {
    /// API root, e.g. `https://ghe.example.com/api/v3` for Enterprise
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Default deadline for every call; `CallOptions` can override it
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn build(self) -> Result<GitHub> {
        let defaults = RequestDefaults::new(&self.user_agent, self.pagination)?;
        let connector = Connector::new(&self.base_url, self.auth, defaults, self.timeout)?;
        Ok(GitHub {
            connector: Arc::new(connector),
        })
    }
}

impl GitHub {
    pub fn builder() -> GitHubBuilder {
        GitHubBuilder::default()
    }

    /// Client configured from a loaded [`Config`]
    pub fn from_config(config: &Config, auth: Option<Auth>) -> Result<Self> {
        let mut builder = Self::builder()
            .base_url(config.api_url.clone())
            .user_agent(config.user_agent.clone())
            .pagination(config.pagination());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(auth) = auth {
            builder = builder.auth(auth);
        }
        builder.build()
    }

    /// Search handler
    pub fn search(&self) -> SearchHandler<'_> {
        SearchHandler::new(self)
    }

    /// Gists handler
    pub fn gists(&self) -> GistHandler<'_> {
        GistHandler::new(self)
    }

    /// Users handler
    pub fn users(&self) -> UserHandler<'_> {
        UserHandler::new(self)
    }

    /// Repositories handler
    pub fn repos(&self) -> RepoHandler<'_> {
        RepoHandler::new(self)
    }

    /// Quota reported by the most recent response
    pub fn rate_limit(&self) -> RateLimit {
        self.connector.rate_limit()
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Send a request and decode its success response
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        self.execute_with(request, &CallOptions::default()).await
    }

    /// Same as [`execute`](Self::execute) with a per-call deadline or cancellation
    pub async fn execute_with<R: ApiRequest>(
        &self,
        request: &R,
        options: &CallOptions,
    ) -> Result<R::Output> {
        self.route(request, options).await?.json()
    }

    /// Send a route and return the response without checking its status
    pub(crate) async fn route<R: Route + ?Sized>(
        &self,
        route: &R,
        options: &CallOptions,
    ) -> Result<RawResponse> {
        let body = route.body();
        self.send(
            route.method(),
            route.endpoint(),
            &route.params(),
            body.as_ref(),
            options,
        )
        .await
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        params: &Params,
        body: Option<&Value>,
        options: &CallOptions,
    ) -> Result<RawResponse> {
        let request =
            RequestDescriptor::build(method, endpoint, params, body, self.connector.defaults())?;
        self.connector.send(request, options).await
    }

    /// GET and decode
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &Params,
        options: &CallOptions,
    ) -> Result<T> {
        self.send(Method::GET, endpoint, params, None, options)
            .await?
            .json()
    }

    /// Log the current quota; used after CLI calls
    pub fn log_rate_limit(&self) {
        info!(rate_limit = %self.rate_limit(), "GitHub rate limit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let github = GitHub::builder().build().unwrap();
        assert_eq!(github.connector().base_url(), DEFAULT_API_URL);
        assert!(github.connector().auth().is_none());
        assert_eq!(github.rate_limit(), RateLimit::default());
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        assert!(GitHub::builder().base_url("ftp://example.com").build().is_err());
        assert!(GitHub::builder().base_url("not a url").build().is_err());
    }

    #[test]
    fn test_builder_rejects_bad_user_agent() {
        assert!(GitHub::builder().user_agent("bad\nagent").build().is_err());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            api_url: "https://ghe.example.com/api/v3/".into(),
            ..Config::default()
        };
        let github = GitHub::from_config(&config, Some(Auth::token("abc"))).unwrap();
        assert_eq!(github.connector().base_url(), "https://ghe.example.com/api/v3");
        assert!(github.connector().auth().is_some());
        assert_eq!(github.connector().defaults().pagination, config.pagination());
    }

    #[test]
    fn test_clones_share_connector() {
        let github = GitHub::builder().build().unwrap();
        let clone = github.clone();
        assert!(Arc::ptr_eq(&github.connector, &clone.connector));
    }
}
