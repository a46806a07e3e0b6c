//! Users and organizations

use serde::Deserialize;
use url::Url;

use crate::models::common::{empty_as_none, UriTemplate};

/// Account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum UserKind {
    User,
    Organization,
    Bot,
    /// Any account type this crate does not know, such as `Mannequin`
    #[serde(other)]
    Unknown,
}

/// A GitHub account as embedded in other resources or returned by user search
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct User {
    pub login: String,
    pub id: u64,
    pub node_id: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub gravatar_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: UserKind,
    pub site_admin: bool,
    /// Relevance, only set on search results
    #[serde(default)]
    pub score: Option<f64>,

    #[serde(rename = "url")]
    pub(crate) api_url: Url,
    pub(crate) avatar_url: Url,
    pub(crate) html_url: Url,
    pub(crate) followers_url: Url,
    pub(crate) following_url: UriTemplate,
    pub(crate) gists_url: UriTemplate,
    pub(crate) starred_url: UriTemplate,
    pub(crate) subscriptions_url: Url,
    pub(crate) organizations_url: Url,
    pub(crate) repos_url: Url,
    pub(crate) events_url: UriTemplate,
    pub(crate) received_events_url: Url,
}

/// API links of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserApiUrls {
    pub user: Url,
    pub followers: Url,
    pub following: UriTemplate,
    pub gists: UriTemplate,
    pub starred: UriTemplate,
    pub subscriptions: Url,
    pub organizations: Url,
    pub repos: Url,
    pub events: UriTemplate,
    pub received_events: Url,
}

/// Every link a user record carries, grouped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUrls {
    pub api: UserApiUrls,
    pub webpage: Url,
    pub avatar: Url,
}

impl User {
    /// Link view, computed on each call
    pub fn urls(&self) -> UserUrls {
        UserUrls {
            api: UserApiUrls {
                user: self.api_url.clone(),
                followers: self.followers_url.clone(),
                following: self.following_url.clone(),
                gists: self.gists_url.clone(),
                starred: self.starred_url.clone(),
                subscriptions: self.subscriptions_url.clone(),
                organizations: self.organizations_url.clone(),
                repos: self.repos_url.clone(),
                events: self.events_url.clone(),
                received_events: self.received_events_url.clone(),
            },
            webpage: self.html_url.clone(),
            avatar: self.avatar_url.clone(),
        }
    }

    pub fn is_organization(&self) -> bool {
        self.kind == UserKind::Organization
    }
}
