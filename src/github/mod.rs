//! GitHub API surface
//!
//! This module provides the client and its resource handlers:
//! - Search across repositories, commits, code, issues, users, topics and labels
//! - Gist listing, lookup, editing, starring and forking
//! - User and repository lookups

pub mod client;
pub mod gists;
pub mod list;
pub mod repos;
pub mod search;
pub mod users;

pub use client::{GitHub, GitHubBuilder};
pub use gists::GistHandler;
pub use list::ListBuilder;
pub use repos::RepoHandler;
pub use search::{SearchBuilder, SearchFamily, SearchHandler};
pub use users::UserHandler;
