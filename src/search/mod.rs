//! Search query construction
//!
//! Queries are built from free-text [`SearchKeyword`]s and typed
//! [`QualifierSet`]s; both are plain sets of tokens combined with named
//! set operations.

pub mod comparison;
pub mod families;
pub mod keyword;
pub mod qualifier;
pub mod query;
pub mod sort;

pub use comparison::Comparison;
pub use families::{
    AccountType, CodeField, CommitStatus, IssueField, IssueKind, IssueMetadata, MergeState,
    RepositoryField, ReviewStatus, TopicFlag, UserField,
};
pub use keyword::SearchKeyword;
pub use qualifier::{
    scope, CodeQualifier, CommitQualifier, IssueQualifier, LabelQualifier, QualifierSet,
    RepositoryQualifier, TopicQualifier, UserQualifier,
};
pub use query::SearchQuery;
pub use sort::{
    CodeSort, CommitSort, ForkSearch, IssueSort, LabelSort, QualifierSort, ReactionType,
    RepositorySort, SearchSort, SortOrder, TopicSort, UserSort,
};
