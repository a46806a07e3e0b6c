//! ghrest - A typed client for the GitHub REST API
//!
//! This library turns typed requests into HTTP calls and decodes the
//! responses into typed records. It covers search across every search
//! family, gists, and user and repository lookups, and keeps track of the
//! rate limit GitHub reports.
//!
//! ```no_run
//! use ghrest::search::{Comparison, RepositoryQualifier};
//! use ghrest::GitHub;
//!
//! # async fn demo() -> ghrest::Result<()> {
//! let github = GitHub::builder().build()?;
//! let results = github
//!     .search()
//!     .repositories()
//!     .keywords("tetris")
//!     .qualifiers(RepositoryQualifier::language("assembly"))
//!     .qualifiers(RepositoryQualifier::stars(Comparison::gt(100)))
//!     .send()
//!     .await?;
//! println!("{} repositories", results.total);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod github;
pub mod http;
pub mod models;
pub mod search;

pub use crate::core::{Auth, Config};
pub use error::{GitHubError, Result};
pub use github::GitHub;
pub use http::CallOptions;
