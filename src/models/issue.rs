//! Issues, pull-request stubs and milestones

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::models::common::UriTemplate;
use crate::models::label::Label;
use crate::models::user::User;

/// Open or closed, shared by issues and milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the author relates to the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Association {
    Member,
    Owner,
    Collaborator,
    Contributor,
    FirstTimeContributor,
    FirstTimer,
    Mannequin,
    None,
    #[serde(other)]
    Unknown,
}

/// Links present when the issue is a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct PullRequestLinks {
    #[serde(default)]
    pub url: Option<Url>,
    pub html_url: Url,
    pub diff_url: Url,
    pub patch_url: Url,
}

/// A milestone
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Milestone {
    pub id: u64,
    pub node_id: String,
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub creator: Option<User>,
    pub open_issues: u64,
    pub closed_issues: u64,
    pub state: IssueState,
    #[serde(rename = "created_at")]
    pub created: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated: DateTime<Utc>,
    #[serde(rename = "due_on")]
    pub due: Option<DateTime<Utc>>,
    #[serde(rename = "closed_at")]
    pub closed: Option<DateTime<Utc>>,

    #[serde(rename = "url")]
    pub(crate) api_url: Url,
    pub(crate) html_url: Url,
    pub(crate) labels_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneApiUrls {
    pub milestone: Url,
    pub labels: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneUrls {
    pub api: MilestoneApiUrls,
    pub webpage: Url,
}

impl Milestone {
    /// Link view, computed on each call
    pub fn urls(&self) -> MilestoneUrls {
        MilestoneUrls {
            api: MilestoneApiUrls {
                milestone: self.api_url.clone(),
                labels: self.labels_url.clone(),
            },
            webpage: self.html_url.clone(),
        }
    }
}

/// An issue or pull request returned by issue search
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Issue {
    pub id: u64,
    pub node_id: String,
    pub number: u64,
    pub title: String,
    pub user: User,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub state: IssueState,
    pub locked: bool,
    pub assignee: Option<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
    pub milestone: Option<Milestone>,
    pub comments: u64,
    #[serde(rename = "created_at")]
    pub created: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated: DateTime<Utc>,
    #[serde(rename = "closed_at")]
    pub closed: Option<DateTime<Utc>>,
    pub author_association: Association,
    #[serde(default)]
    pub pull_request: Option<PullRequestLinks>,
    pub body: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,

    #[serde(rename = "url")]
    pub(crate) api_url: Url,
    pub(crate) repository_url: Url,
    pub(crate) labels_url: UriTemplate,
    pub(crate) comments_url: Url,
    pub(crate) events_url: Url,
    pub(crate) html_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueApiUrls {
    pub issue: Url,
    pub repository: Url,
    pub comments: Url,
    pub events: Url,
    pub labels: UriTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueUrls {
    pub api: IssueApiUrls,
    pub webpage: Url,
}

impl Issue {
    /// Link view, computed on each call
    pub fn urls(&self) -> IssueUrls {
        IssueUrls {
            api: IssueApiUrls {
                issue: self.api_url.clone(),
                repository: self.repository_url.clone(),
                comments: self.comments_url.clone(),
                events: self.events_url.clone(),
                labels: self.labels_url.clone(),
            },
            webpage: self.html_url.clone(),
        }
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}
