//! Gist operations

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{GitHubError, Result};
use crate::github::client::GitHub;
use crate::github::list::ListBuilder;
use crate::http::connector::{CallOptions, RawResponse};
use crate::http::endpoint::Endpoint;
use crate::http::param::Params;
use crate::models::gist::{Gist, GistCommit, GistFileEdit, GistFork};

fn endpoint(template: &str) -> Endpoint {
    Endpoint::parse(template).expect("Invalid gist endpoint template")
}

static PUBLIC: Lazy<Endpoint> = Lazy::new(|| endpoint("/gists/public{?since}"));
static STARRED: Lazy<Endpoint> = Lazy::new(|| endpoint("/gists/starred{?since}"));
pub(crate) static USER_GISTS: Lazy<Endpoint> = Lazy::new(|| endpoint("/users/{username}/gists{?since}"));
static GIST: Lazy<Endpoint> = Lazy::new(|| endpoint("/gists/{gist_id}{/sha}"));
static COMMITS: Lazy<Endpoint> = Lazy::new(|| endpoint("/gists/{gist_id}/commits"));
static STAR: Lazy<Endpoint> = Lazy::new(|| endpoint("/gists/{gist_id}/star"));
static FORKS: Lazy<Endpoint> = Lazy::new(|| endpoint("/gists/{gist_id}/forks"));

/// Gist operations handler
pub struct GistHandler<'a> {
    client: &'a GitHub,
}

impl<'a> GistHandler<'a> {
    /// Create a new handler
    pub fn new(client: &'a GitHub) -> Self {
        Self { client }
    }

    /// Public gists, newest first
    pub fn public(&self) -> ListBuilder<'a, Gist> {
        // GitHub API: GET /gists/public
        ListBuilder::new(self.client, &PUBLIC, Params::new())
    }

    /// Gists starred by the authenticated user
    pub fn starred(&self) -> ListBuilder<'a, Gist> {
        // GitHub API: GET /gists/starred
        ListBuilder::new(self.client, &STARRED, Params::new())
    }

    /// Public gists of a user
    pub fn for_user(&self, username: &str) -> ListBuilder<'a, Gist> {
        // GitHub API: GET /users/{username}/gists
        ListBuilder::new(self.client, &USER_GISTS, Params::new().with("username", username))
    }

    /// A single gist with file contents
    pub async fn get(&self, id: &str) -> Result<Gist> {
        self.get_with(id, &CallOptions::default()).await
    }

    pub async fn get_with(&self, id: &str, options: &CallOptions) -> Result<Gist> {
        // GitHub API: GET /gists/{gist_id}
        let params = Params::new().with("gist_id", id);
        self.client.get(&GIST, &params, options).await
    }

    /// A gist as of a specific revision
    pub async fn get_revision(&self, id: &str, sha: &str) -> Result<Gist> {
        self.get_revision_with(id, sha, &CallOptions::default()).await
    }

    pub async fn get_revision_with(
        &self,
        id: &str,
        sha: &str,
        options: &CallOptions,
    ) -> Result<Gist> {
        // GitHub API: GET /gists/{gist_id}/{sha}
        let params = Params::new().with("gist_id", id).with("sha", sha);
        self.client.get(&GIST, &params, options).await
    }

    /// Revision history
    pub fn commits(&self, id: &str) -> ListBuilder<'a, GistCommit> {
        // GitHub API: GET /gists/{gist_id}/commits
        ListBuilder::new(self.client, &COMMITS, Params::new().with("gist_id", id))
    }

    /// Forks of a gist
    pub fn forks(&self, id: &str) -> ListBuilder<'a, GistFork> {
        // GitHub API: GET /gists/{gist_id}/forks
        ListBuilder::new(self.client, &FORKS, Params::new().with("gist_id", id))
    }

    /// Change the description and/or files of a gist
    ///
    /// A `None` entry in `files` deletes that file.
    pub async fn edit(
        &self,
        id: &str,
        description: Option<&str>,
        files: BTreeMap<String, Option<GistFileEdit>>,
    ) -> Result<Gist> {
        self.edit_with(id, description, files, &CallOptions::default())
            .await
    }

    pub async fn edit_with(
        &self,
        id: &str,
        description: Option<&str>,
        files: BTreeMap<String, Option<GistFileEdit>>,
        options: &CallOptions,
    ) -> Result<Gist> {
        // GitHub API: PATCH /gists/{gist_id}
        let mut body = serde_json::Map::new();
        if let Some(description) = description {
            body.insert("description".into(), json!(description));
        }
        if !files.is_empty() {
            let files = serde_json::to_value(&files)
                .map_err(|e| GitHubError::Encoding(e.to_string()))?;
            body.insert("files".into(), files);
        }
        if body.is_empty() {
            return Err(GitHubError::InvalidInput(
                "Nothing to change: pass a description or at least one file".into(),
            ));
        }

        let params = Params::new().with("gist_id", id);
        self.client
            .send(
                Method::PATCH,
                &GIST,
                &params,
                Some(&Value::Object(body)),
                options,
            )
            .await?
            .json()
    }

    /// Star a gist; true once GitHub confirms
    pub async fn star(&self, id: &str) -> Result<bool> {
        self.star_with(id, &CallOptions::default()).await
    }

    pub async fn star_with(&self, id: &str, options: &CallOptions) -> Result<bool> {
        // GitHub API: PUT /gists/{gist_id}/star
        let response = self
            .call(Method::PUT, &STAR, id, options)
            .await?
            .error_for_status()?;
        Ok(response.status == StatusCode::NO_CONTENT)
    }

    /// Remove a star; true once GitHub confirms
    pub async fn unstar(&self, id: &str) -> Result<bool> {
        self.unstar_with(id, &CallOptions::default()).await
    }

    pub async fn unstar_with(&self, id: &str, options: &CallOptions) -> Result<bool> {
        // GitHub API: DELETE /gists/{gist_id}/star
        let response = self
            .call(Method::DELETE, &STAR, id, options)
            .await?
            .error_for_status()?;
        Ok(response.status == StatusCode::NO_CONTENT)
    }

    /// Whether the authenticated user starred a gist
    pub async fn is_starred(&self, id: &str) -> Result<bool> {
        self.is_starred_with(id, &CallOptions::default()).await
    }

    pub async fn is_starred_with(&self, id: &str, options: &CallOptions) -> Result<bool> {
        // GitHub API: GET /gists/{gist_id}/star
        let response = self.call(Method::GET, &STAR, id, options).await?;
        match response.status {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(GitHubError::api(status, &response.body)),
        }
    }

    /// Fork a gist into the authenticated user's account
    pub async fn fork(&self, id: &str) -> Result<Gist> {
        self.fork_with(id, &CallOptions::default()).await
    }

    pub async fn fork_with(&self, id: &str, options: &CallOptions) -> Result<Gist> {
        // GitHub API: POST /gists/{gist_id}/forks
        self.call(Method::POST, &FORKS, id, options).await?.json()
    }

    /// Delete a gist; true once GitHub confirms
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.delete_with(id, &CallOptions::default()).await
    }

    pub async fn delete_with(&self, id: &str, options: &CallOptions) -> Result<bool> {
        // GitHub API: DELETE /gists/{gist_id}
        let response = self
            .call(Method::DELETE, &GIST, id, options)
            .await?
            .error_for_status()?;
        debug!(gist = id, status = %response.status, "gist deleted");
        Ok(response.status == StatusCode::NO_CONTENT)
    }

    async fn call(
        &self,
        method: Method,
        endpoint: &Endpoint,
        id: &str,
        options: &CallOptions,
    ) -> Result<RawResponse> {
        let params = Params::new().with("gist_id", id);
        self.client.send(method, endpoint, &params, None, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::{RequestDefaults, RequestDescriptor};
    use crate::http::route::Route;
    use chrono::{TimeZone, Utc};

    fn built<R: Route>(route: &R) -> RequestDescriptor {
        RequestDescriptor::build(
            route.method(),
            route.endpoint(),
            &route.params(),
            None,
            &RequestDefaults::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_list_routes() {
        let github = GitHub::builder().build().unwrap();
        let gists = github.gists();

        assert_eq!(built(&gists.public()).url, "/gists/public");
        assert_eq!(built(&gists.starred().page(2)).url, "/gists/starred?page=2");
        assert_eq!(
            built(&gists.for_user("octocat").per_page(10)).url,
            "/users/octocat/gists?per_page=10"
        );
        assert_eq!(built(&gists.commits("abc")).url, "/gists/abc/commits");
        assert_eq!(built(&gists.forks("abc")).url, "/gists/abc/forks");
    }

    #[test]
    fn test_since_is_rfc3339() {
        let github = GitHub::builder().build().unwrap();
        let since = Utc.with_ymd_and_hms(2020, 5, 1, 8, 0, 0).unwrap();
        let request = built(&github.gists().public().since(since));
        assert_eq!(request.query_value("since"), Some("2020-05-01T08%3A00%3A00Z"));
    }

    #[test]
    fn test_revision_path() {
        let params = Params::new().with("gist_id", "aa5a").with("sha", "57a7f0");
        let request =
            RequestDescriptor::build(Method::GET, &GIST, &params, None, &RequestDefaults::default())
                .unwrap();
        assert_eq!(request.url, "/gists/aa5a/57a7f0");
    }

    #[tokio::test]
    async fn test_edit_requires_changes() {
        let github = GitHub::builder().build().unwrap();
        let err = github.gists().edit("abc", None, BTreeMap::new()).await.unwrap_err();
        assert!(matches!(err, GitHubError::InvalidInput(_)));
    }
}
