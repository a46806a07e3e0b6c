//! User operations

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::github::client::GitHub;
use crate::github::gists::USER_GISTS;
use crate::github::list::ListBuilder;
use crate::http::connector::CallOptions;
use crate::http::endpoint::Endpoint;
use crate::http::param::Params;
use crate::models::gist::Gist;
use crate::models::user::User;

static USER: Lazy<Endpoint> =
    Lazy::new(|| Endpoint::parse("/users/{username}").expect("Invalid user endpoint template"));

/// User operations handler
pub struct UserHandler<'a> {
    client: &'a GitHub,
}

impl<'a> UserHandler<'a> {
    /// Create a new handler
    pub fn new(client: &'a GitHub) -> Self {
        Self { client }
    }

    /// Look up an account by login
    pub async fn get(&self, login: &str) -> Result<User> {
        self.get_with(login, &CallOptions::default()).await
    }

    pub async fn get_with(&self, login: &str, options: &CallOptions) -> Result<User> {
        // GitHub API: GET /users/{username}
        let params = Params::new().with("username", login);
        self.client.get(&USER, &params, options).await
    }

    /// Public gists of an account
    pub fn gists(&self, login: &str) -> ListBuilder<'a, Gist> {
        // GitHub API: GET /users/{username}/gists
        ListBuilder::new(self.client, &USER_GISTS, Params::new().with("username", login))
    }
}
