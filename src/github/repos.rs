//! Repository operations

use once_cell::sync::Lazy;

use crate::error::{GitHubError, Result};
use crate::github::client::GitHub;
use crate::http::connector::CallOptions;
use crate::http::endpoint::Endpoint;
use crate::http::param::Params;
use crate::models::repository::Repository;

static REPOSITORY: Lazy<Endpoint> = Lazy::new(|| {
    Endpoint::parse("/repos/{owner}/{repo}").expect("Invalid repository endpoint template")
});

/// Repository operations handler
pub struct RepoHandler<'a> {
    client: &'a GitHub,
}

impl<'a> RepoHandler<'a> {
    /// Create a new handler
    pub fn new(client: &'a GitHub) -> Self {
        Self { client }
    }

    /// Look up a repository
    pub async fn get(&self, owner: &str, name: &str) -> Result<Repository> {
        self.get_with(owner, name, &CallOptions::default()).await
    }

    pub async fn get_with(
        &self,
        owner: &str,
        name: &str,
        options: &CallOptions,
    ) -> Result<Repository> {
        // GitHub API: GET /repos/{owner}/{repo}
        let params = Params::new().with("owner", owner).with("repo", name);
        self.client.get(&REPOSITORY, &params, options).await
    }
}

/// Split `owner/name`
pub fn parse_full_name(full_name: &str) -> Result<(&str, &str)> {
    match full_name.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(GitHubError::InvalidInput(format!(
            "Invalid repository '{}'. Expected format: owner/name",
            full_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_name() {
        assert_eq!(parse_full_name("octocat/Hello-World").unwrap(), ("octocat", "Hello-World"));
        assert!(parse_full_name("octocat").is_err());
        assert!(parse_full_name("/repo").is_err());
        assert!(parse_full_name("a/b/c").is_err());
    }
}
