//! Commits as returned by commit search

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use url::Url;

use crate::models::repository::BasicRepository;
use crate::models::user::User;

/// Git identity recorded on a commit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct CommitUserInfo {
    /// Keeps the author's own UTC offset
    pub date: DateTime<FixedOffset>,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct CommitTree {
    pub url: Url,
    pub sha: String,
}

/// The git-level part of a commit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct CommitInfo {
    pub url: Url,
    pub author: CommitUserInfo,
    pub committer: CommitUserInfo,
    pub message: String,
    pub tree: CommitTree,
    #[serde(default)]
    pub comment_count: u64,
}

/// Parent reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct BasicCommit {
    pub sha: String,
    pub url: Url,
    #[serde(default)]
    pub html_url: Option<Url>,
}

/// A commit search result
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Commit {
    pub sha: String,
    pub node_id: String,
    pub commit: CommitInfo,
    /// `None` when the author email is not linked to an account
    pub author: Option<User>,
    pub committer: Option<User>,
    pub parents: Vec<BasicCommit>,
    pub repository: BasicRepository,
    #[serde(default)]
    pub score: Option<f64>,

    #[serde(rename = "url")]
    pub(crate) api_url: Url,
    pub(crate) comments_url: Url,
    pub(crate) html_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitApiUrls {
    pub commit: Url,
    pub comments: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitUrls {
    pub api: CommitApiUrls,
    pub webpage: Url,
}

impl Commit {
    /// Link view, computed on each call
    pub fn urls(&self) -> CommitUrls {
        CommitUrls {
            api: CommitApiUrls {
                commit: self.api_url.clone(),
                comments: self.comments_url.clone(),
            },
            webpage: self.html_url.clone(),
        }
    }

    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }
}
