//! Resource records
//!
//! Records are only ever produced by decoding API responses. Raw link
//! fields stay private; each family exposes a grouped `urls()` view built
//! from them on demand.

pub mod code;
pub mod commit;
pub mod common;
pub mod gist;
pub mod issue;
pub mod label;
pub mod repository;
pub mod topic;
pub mod user;

pub use code::Code;
pub use commit::{BasicCommit, Commit, CommitInfo, CommitTree, CommitUserInfo};
pub use common::{ByteSize, UriTemplate};
pub use gist::{ChangeStatus, Gist, GistCommit, GistFile, GistFileEdit, GistFork};
pub use issue::{Association, Issue, IssueState, Milestone, PullRequestLinks};
pub use label::Label;
pub use repository::{BasicRepository, License, Repository};
pub use topic::Topic;
pub use user::{User, UserKind};
