//! Gists, their files, revisions and forks

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::common::{media_type, ByteSize};
use crate::models::user::User;

/// A gist
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Gist {
    pub id: String,
    pub node_id: String,
    /// Files keyed by file name
    pub files: BTreeMap<String, GistFile>,
    pub public: bool,
    #[serde(rename = "created_at")]
    pub created: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated: DateTime<Utc>,
    pub description: Option<String>,
    pub comments: u64,
    #[serde(default)]
    pub user: Option<User>,
    /// Missing on anonymous gists
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub truncated: bool,
    /// Revision history, only present on single-gist lookups
    #[serde(default)]
    pub history: Vec<GistCommit>,

    #[serde(rename = "url")]
    pub(crate) api_url: Url,
    pub(crate) forks_url: Url,
    pub(crate) commits_url: Url,
    pub(crate) comments_url: Url,
    pub(crate) git_pull_url: Url,
    pub(crate) git_push_url: Url,
    pub(crate) html_url: Url,
}

/// API links of a gist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistApiUrls {
    pub gist: Url,
    pub forks: Url,
    pub commits: Url,
    pub comments: Url,
    pub git_pull: Url,
    pub git_push: Url,
}

/// Every link a gist record carries, grouped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistUrls {
    pub api: GistApiUrls,
    pub webpage: Url,
}

impl Gist {
    /// Link view, computed on each call
    pub fn urls(&self) -> GistUrls {
        GistUrls {
            api: GistApiUrls {
                gist: self.api_url.clone(),
                forks: self.forks_url.clone(),
                commits: self.commits_url.clone(),
                comments: self.comments_url.clone(),
                git_pull: self.git_pull_url.clone(),
                git_push: self.git_push_url.clone(),
            },
            webpage: self.html_url.clone(),
        }
    }
}

/// One file of a gist
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct GistFile {
    pub filename: String,
    #[serde(rename = "type", deserialize_with = "media_type")]
    pub media_type: mime::Mime,
    pub language: Option<String>,
    pub raw_url: Url,
    pub size: ByteSize,
    /// File body, only present on single-gist lookups
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub truncated: Option<bool>,
}

/// Line counts changed by one revision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct ChangeStatus {
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub total: u64,
}

/// One revision of a gist
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct GistCommit {
    pub version: String,
    pub url: Url,
    pub user: Option<User>,
    pub change_status: ChangeStatus,
    #[serde(rename = "committed_at")]
    pub committed: DateTime<Utc>,
}

/// A fork of a gist
///
/// Older responses name the forking account `user`, current ones send
/// `owner` and may repeat it under `user`. Use [`GistFork::forked_by`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct GistFork {
    pub id: String,
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub user: Option<User>,
    pub url: Url,
    #[serde(rename = "created_at")]
    pub created: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated: DateTime<Utc>,
}

impl GistFork {
    /// Account that made the fork, preferring `owner` over `user`
    pub fn forked_by(&self) -> Option<&User> {
        self.owner.as_ref().or(self.user.as_ref())
    }
}

/// Change to one file in a gist edit
///
/// Sent as `null` when the file should be removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GistFileEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New name for the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl GistFileEdit {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            filename: None,
        }
    }

    pub fn rename(filename: impl Into<String>) -> Self {
        Self {
            content: None,
            filename: Some(filename.into()),
        }
    }
}
