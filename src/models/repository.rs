//! Repositories

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::models::common::{empty_as_none, kilobytes, ByteSize, UriTemplate};
use crate::models::user::User;

/// API links shared by full and embedded repository records
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryApiUrls {
    #[serde(rename = "url")]
    pub repository: Url,
    #[serde(rename = "forks_url")]
    pub forks: Url,
    #[serde(rename = "keys_url")]
    pub keys: UriTemplate,
    #[serde(rename = "collaborators_url")]
    pub collaborators: UriTemplate,
    #[serde(rename = "teams_url")]
    pub teams: Url,
    #[serde(rename = "hooks_url")]
    pub hooks: Url,
    #[serde(rename = "issue_events_url")]
    pub issue_events: UriTemplate,
    #[serde(rename = "events_url")]
    pub events: Url,
    #[serde(rename = "assignees_url")]
    pub assignees: UriTemplate,
    #[serde(rename = "branches_url")]
    pub branches: UriTemplate,
    #[serde(rename = "tags_url")]
    pub tags: Url,
    #[serde(rename = "blobs_url")]
    pub blobs: UriTemplate,
    #[serde(rename = "git_tags_url")]
    pub git_tags: UriTemplate,
    #[serde(rename = "git_refs_url")]
    pub git_refs: UriTemplate,
    #[serde(rename = "trees_url")]
    pub trees: UriTemplate,
    #[serde(rename = "statuses_url")]
    pub statuses: UriTemplate,
    #[serde(rename = "languages_url")]
    pub languages: Url,
    #[serde(rename = "stargazers_url")]
    pub stargazers: Url,
    #[serde(rename = "contributors_url")]
    pub contributors: Url,
    #[serde(rename = "subscribers_url")]
    pub subscribers: Url,
    #[serde(rename = "subscription_url")]
    pub subscription: Url,
    #[serde(rename = "commits_url")]
    pub commits: UriTemplate,
    #[serde(rename = "git_commits_url")]
    pub git_commits: UriTemplate,
    #[serde(rename = "comments_url")]
    pub comments: UriTemplate,
    #[serde(rename = "issue_comment_url")]
    pub issue_comment: UriTemplate,
    #[serde(rename = "contents_url")]
    pub contents: UriTemplate,
    #[serde(rename = "compare_url")]
    pub compare: UriTemplate,
    #[serde(rename = "merges_url")]
    pub merges: Url,
    #[serde(rename = "archive_url")]
    pub archive: UriTemplate,
    #[serde(rename = "downloads_url")]
    pub downloads: Url,
    #[serde(rename = "issues_url")]
    pub issues: UriTemplate,
    #[serde(rename = "pulls_url")]
    pub pulls: UriTemplate,
    #[serde(rename = "milestones_url")]
    pub milestones: UriTemplate,
    #[serde(rename = "notifications_url")]
    pub notifications: UriTemplate,
    #[serde(rename = "labels_url")]
    pub labels: UriTemplate,
    #[serde(rename = "releases_url")]
    pub releases: UriTemplate,
    #[serde(rename = "deployments_url")]
    pub deployments: Url,
}

/// Repository license summary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct License {
    pub key: String,
    pub name: String,
    /// `None` when GitHub could not match an SPDX identifier
    #[serde(default)]
    pub spdx_id: Option<String>,
    #[serde(default)]
    pub url: Option<Url>,
    pub node_id: String,
}

/// A repository as returned by repository search and lookups
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Repository {
    pub id: u64,
    pub node_id: String,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub owner: User,
    pub description: Option<String>,
    pub fork: bool,
    pub language: Option<String>,
    #[serde(rename = "created_at")]
    pub created: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated: DateTime<Utc>,
    #[serde(rename = "pushed_at")]
    pub pushed: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "kilobytes")]
    pub size: ByteSize,
    #[serde(rename = "stargazers_count")]
    pub stars: u64,
    #[serde(rename = "watchers_count")]
    pub watchers: u64,
    #[serde(rename = "forks_count")]
    pub forks: u64,
    #[serde(rename = "open_issues_count")]
    pub open_issues: u64,
    pub has_issues: bool,
    #[serde(default)]
    pub has_projects: bool,
    #[serde(default)]
    pub has_downloads: bool,
    pub has_wiki: bool,
    #[serde(default)]
    pub has_pages: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
    pub license: Option<License>,
    pub default_branch: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub score: Option<f64>,

    pub(crate) html_url: Url,
    pub(crate) git_url: Url,
    pub(crate) ssh_url: String,
    pub(crate) clone_url: Url,
    pub(crate) svn_url: Url,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub(crate) homepage: Option<String>,
    #[serde(default)]
    pub(crate) mirror_url: Option<Url>,
    #[serde(flatten)]
    pub(crate) api: RepositoryApiUrls,
}

/// Clone and external links of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOtherUrls {
    pub git: Url,
    /// `git@host:owner/repo.git`, which is not a URL
    pub ssh: String,
    pub clone: Url,
    pub svn: Url,
    pub homepage: Option<String>,
    pub mirror: Option<Url>,
}

/// Every link a repository record carries, grouped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrls {
    pub api: RepositoryApiUrls,
    pub webpage: Url,
    pub others: RepositoryOtherUrls,
}

impl Repository {
    /// Link view, computed on each call
    pub fn urls(&self) -> RepositoryUrls {
        RepositoryUrls {
            api: self.api.clone(),
            webpage: self.html_url.clone(),
            others: RepositoryOtherUrls {
                git: self.git_url.clone(),
                ssh: self.ssh_url.clone(),
                clone: self.clone_url.clone(),
                svn: self.svn_url.clone(),
                homepage: self.homepage.clone(),
                mirror: self.mirror_url.clone(),
            },
        }
    }
}

/// Compact repository embedded in commit and code search results
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct BasicRepository {
    pub id: u64,
    pub node_id: String,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub owner: User,
    pub description: Option<String>,
    pub fork: bool,

    pub(crate) html_url: Url,
    #[serde(flatten)]
    pub(crate) api: RepositoryApiUrls,
}

/// Links of an embedded repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicRepositoryUrls {
    pub api: RepositoryApiUrls,
    pub webpage: Url,
}

impl BasicRepository {
    /// Link view, computed on each call
    pub fn urls(&self) -> BasicRepositoryUrls {
        BasicRepositoryUrls {
            api: self.api.clone(),
            webpage: self.html_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::param::Params;

    const FIXTURE: &str = include_str!("../../tests/fixtures/repository.json");

    #[test]
    fn test_decode_repository() {
        let repo: Repository = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(repo.id, 1296269);
        assert_eq!(repo.full_name, "octocat/Hello-World");
        assert_eq!(repo.owner.login, "octocat");
        assert_eq!(repo.description.as_deref(), Some("This your first repo!"));
        assert_eq!(repo.size, ByteSize::kilobytes(108));
        assert_eq!(repo.stars, 80);
        assert_eq!(repo.forks, 9);
        assert_eq!(repo.open_issues, 0);
        assert_eq!(repo.language.as_deref(), Some("C"));
        assert_eq!(repo.created.to_rfc3339(), "2011-01-26T19:01:12+00:00");
        assert!(repo.pushed.is_some());
        assert_eq!(repo.default_branch, "master");
        assert_eq!(repo.topics.len(), 4);
        let license = repo.license.as_ref().unwrap();
        assert_eq!(license.key, "mit");
        assert_eq!(license.spdx_id.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_repository_urls() {
        let repo: Repository = serde_json::from_str(FIXTURE).unwrap();
        let urls = repo.urls();
        assert_eq!(urls.webpage.as_str(), "https://github.com/octocat/Hello-World");
        assert_eq!(
            urls.api.repository.as_str(),
            "https://api.github.com/repos/octocat/Hello-World"
        );
        assert_eq!(urls.others.ssh, "git@github.com:octocat/Hello-World.git");
        assert_eq!(urls.others.homepage.as_deref(), Some("https://github.com"));
        assert_eq!(urls.others.mirror, None);

        let issue = urls
            .api
            .issues
            .expand(&Params::new().with("number", 1347))
            .unwrap();
        assert_eq!(
            issue.as_str(),
            "https://api.github.com/repos/octocat/Hello-World/issues/1347"
        );

        assert_eq!(urls, repo.urls());
    }

    #[test]
    fn test_bad_date_is_decode_error() {
        let mut value: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        value["created_at"] = serde_json::Value::String("yesterday".into());
        assert!(serde_json::from_value::<Repository>(value).is_err());
    }

    #[test]
    fn test_basic_repository_from_full_payload() {
        let repo: BasicRepository = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(repo.name, "Hello-World");
        assert_eq!(repo.urls().webpage.as_str(), "https://github.com/octocat/Hello-World");
    }
}
