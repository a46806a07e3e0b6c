//! Qualifiers specific to each search family

use crate::models::issue::IssueState;
use crate::search::comparison::{Comparison, QualifierValue};
use crate::search::qualifier::scope::{Code, Commits, Issues, Repositories, Topics, Users};
use crate::search::qualifier::{
    ArchivedQualifiable, CreatedQualifiable, InQualifiable, LanguageQualifiable, OrgQualifiable,
    QualifierSet, RepoQualifiable, SearchField, SizeQualifiable, SizeUnit, UserQualifiable,
    VisibilityQualifiable,
};

macro_rules! search_fields {
    ($name:ident { $($variant:ident => $wire:literal),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)*
        }

        impl SearchField for $name {
            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }
        }
    };
}

search_fields!(RepositoryField {
    Name => "name",
    Description => "description",
    Readme => "readme",
});

search_fields!(CodeField {
    File => "file",
    Path => "path",
});

search_fields!(IssueField {
    Title => "title",
    Body => "body",
    Comments => "comments",
});

search_fields!(UserField {
    Login => "login",
    FullName => "fullname",
    Email => "email",
});

// Repositories
impl InQualifiable for Repositories {
    type Field = RepositoryField;
}
impl UserQualifiable for Repositories {}
impl OrgQualifiable for Repositories {}
impl CreatedQualifiable for Repositories {}
impl VisibilityQualifiable for Repositories {}
impl ArchivedQualifiable for Repositories {}
impl LanguageQualifiable for Repositories {}
impl SizeQualifiable for Repositories {
    const SIZE_UNIT: SizeUnit = SizeUnit::Kilobytes;
}

impl QualifierSet<Repositories> {
    pub fn forks(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("forks", count.into())
    }

    pub fn stars(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("stars", count.into())
    }

    pub fn pushed<D: QualifierValue>(when: impl Into<Comparison<D>>) -> Self {
        Self::compared("pushed", when.into())
    }

    /// Same as [`pushed`](Self::pushed)
    pub fn updated<D: QualifierValue>(when: impl Into<Comparison<D>>) -> Self {
        Self::pushed(when)
    }

    pub fn topic(topic: &str) -> Self {
        Self::keyed("topic", topic)
    }

    /// Number of topics attached
    pub fn topics(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("topics", count.into())
    }

    /// License keyword such as `mit` or `apache-2.0`
    pub fn license(key: &str) -> Self {
        Self::keyed("license", key)
    }

    pub fn mirror(mirror: bool) -> Self {
        Self::keyed("mirror", mirror)
    }

    pub fn good_first_issues(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("good-first-issues", count.into())
    }

    pub fn help_wanted_issues(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("help-wanted-issues", count.into())
    }
}

// Commits
impl UserQualifiable for Commits {}
impl OrgQualifiable for Commits {}
impl RepoQualifiable for Commits {}
impl VisibilityQualifiable for Commits {}

impl QualifierSet<Commits> {
    pub fn author(username: &str) -> Self {
        Self::keyed("author", username)
    }

    pub fn author_name(name: &str) -> Self {
        Self::keyed("author-name", name)
    }

    pub fn author_email(email: &str) -> Self {
        Self::keyed("author-email", email)
    }

    pub fn committer(username: &str) -> Self {
        Self::keyed("committer", username)
    }

    pub fn committer_name(name: &str) -> Self {
        Self::keyed("committer-name", name)
    }

    pub fn committer_email(email: &str) -> Self {
        Self::keyed("committer-email", email)
    }

    pub fn author_date<D: QualifierValue>(when: impl Into<Comparison<D>>) -> Self {
        Self::compared("author-date", when.into())
    }

    pub fn committer_date<D: QualifierValue>(when: impl Into<Comparison<D>>) -> Self {
        Self::compared("committer-date", when.into())
    }

    /// Only merge commits, or none of them
    pub fn merge(merge: bool) -> Self {
        Self::keyed("merge", merge)
    }

    pub fn hash(sha: &str) -> Self {
        Self::keyed("hash", sha)
    }

    pub fn parent(sha: &str) -> Self {
        Self::keyed("parent", sha)
    }

    pub fn tree(sha: &str) -> Self {
        Self::keyed("tree", sha)
    }
}

// Code
impl InQualifiable for Code {
    type Field = CodeField;
}
impl UserQualifiable for Code {}
impl OrgQualifiable for Code {}
impl RepoQualifiable for Code {}
impl LanguageQualifiable for Code {}
impl SizeQualifiable for Code {
    const SIZE_UNIT: SizeUnit = SizeUnit::Bytes;
}

impl QualifierSet<Code> {
    pub fn path(path: &str) -> Self {
        Self::keyed("path", path)
    }

    pub fn filename(name: &str) -> Self {
        Self::keyed("filename", name)
    }

    pub fn extension(ext: &str) -> Self {
        Self::keyed("extension", ext.trim_start_matches('.'))
    }
}

// Issues

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Issue,
    PullRequest,
}

impl IssueKind {
    fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Issue => "issue",
            IssueKind::PullRequest => "pr",
        }
    }
}

/// Combined commit status of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    Pending,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    None,
    Required,
    Approved,
    ChangesRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    Merged,
    Unmerged,
}

/// Metadata an issue can be missing, for `no:`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueMetadata {
    Label,
    Milestone,
    Assignee,
    Project,
}

impl InQualifiable for Issues {
    type Field = IssueField;
}
impl UserQualifiable for Issues {}
impl OrgQualifiable for Issues {}
impl RepoQualifiable for Issues {}
impl CreatedQualifiable for Issues {}
impl VisibilityQualifiable for Issues {}
impl ArchivedQualifiable for Issues {}
impl LanguageQualifiable for Issues {}

impl QualifierSet<Issues> {
    /// `type:issue` or `type:pr`
    pub fn kind(kind: IssueKind) -> Self {
        Self::keyed("type", kind.as_str())
    }

    pub fn state(state: IssueState) -> Self {
        Self::keyed("state", state.as_str())
    }

    pub fn author(username: &str) -> Self {
        Self::keyed("author", username)
    }

    /// Opened by a GitHub App
    pub fn author_app(app: &str) -> Self {
        Self::single(format!("author:app/{}", app))
    }

    pub fn assignee(username: &str) -> Self {
        Self::keyed("assignee", username)
    }

    pub fn mentions(username: &str) -> Self {
        Self::keyed("mentions", username)
    }

    /// Mentions a team, `team:org/team`
    pub fn team(org: &str, team: &str) -> Self {
        Self::single(format!("team:{}/{}", org, team))
    }

    pub fn commenter(username: &str) -> Self {
        Self::keyed("commenter", username)
    }

    pub fn involves(username: &str) -> Self {
        Self::keyed("involves", username)
    }

    pub fn label(label: &str) -> Self {
        Self::keyed("label", label)
    }

    pub fn milestone(milestone: &str) -> Self {
        Self::keyed("milestone", milestone)
    }

    /// Project board, optionally scoped to a repository
    pub fn project(board: u64, repo: Option<(&str, &str)>) -> Self {
        match repo {
            Some((owner, name)) => Self::single(format!("project:{}/{}/{}", owner, name, board)),
            None => Self::keyed("project", board),
        }
    }

    pub fn status(status: CommitStatus) -> Self {
        let status = match status {
            CommitStatus::Pending => "pending",
            CommitStatus::Success => "success",
            CommitStatus::Failure => "failure",
        };
        Self::keyed("status", status)
    }

    /// Pull requests containing a commit
    pub fn sha(sha: &str) -> Self {
        Self::single(sha)
    }

    pub fn head(branch: &str) -> Self {
        Self::keyed("head", branch)
    }

    pub fn base(branch: &str) -> Self {
        Self::keyed("base", branch)
    }

    pub fn comments(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("comments", count.into())
    }

    pub fn draft(draft: bool) -> Self {
        Self::keyed("draft", draft)
    }

    pub fn review(review: ReviewStatus) -> Self {
        let review = match review {
            ReviewStatus::None => "none",
            ReviewStatus::Required => "required",
            ReviewStatus::Approved => "approved",
            ReviewStatus::ChangesRequested => "changes_requested",
        };
        Self::keyed("review", review)
    }

    pub fn reviewed_by(username: &str) -> Self {
        Self::keyed("reviewed-by", username)
    }

    pub fn review_requested(username: &str) -> Self {
        Self::keyed("review-requested", username)
    }

    pub fn team_review_requested(team: &str) -> Self {
        Self::keyed("team-review-requested", team)
    }

    pub fn updated<D: QualifierValue>(when: impl Into<Comparison<D>>) -> Self {
        Self::compared("updated", when.into())
    }

    pub fn closed<D: QualifierValue>(when: impl Into<Comparison<D>>) -> Self {
        Self::compared("closed", when.into())
    }

    pub fn merged<D: QualifierValue>(when: impl Into<Comparison<D>>) -> Self {
        Self::compared("merged", when.into())
    }

    /// `is:merged` or `is:unmerged`
    pub fn merge_state(state: MergeState) -> Self {
        match state {
            MergeState::Merged => Self::keyed("is", "merged"),
            MergeState::Unmerged => Self::keyed("is", "unmerged"),
        }
    }

    pub fn no(missing: IssueMetadata) -> Self {
        let missing = match missing {
            IssueMetadata::Label => "label",
            IssueMetadata::Milestone => "milestone",
            IssueMetadata::Assignee => "assignee",
            IssueMetadata::Project => "project",
        };
        Self::keyed("no", missing)
    }
}

// Users

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    User,
    Org,
}

impl InQualifiable for Users {
    type Field = UserField;
}
impl CreatedQualifiable for Users {}
impl LanguageQualifiable for Users {}

impl QualifierSet<Users> {
    /// `type:user` or `type:org`
    pub fn kind(kind: AccountType) -> Self {
        match kind {
            AccountType::User => Self::keyed("type", "user"),
            AccountType::Org => Self::keyed("type", "org"),
        }
    }

    pub fn repos(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("repos", count.into())
    }

    pub fn location(location: &str) -> Self {
        Self::keyed("location", location)
    }

    pub fn followers(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("followers", count.into())
    }
}

// Topics

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicFlag {
    Curated,
    Featured,
    NotCurated,
    NotFeatured,
}

impl QualifierSet<Topics> {
    pub fn is(flag: TopicFlag) -> Self {
        let flag = match flag {
            TopicFlag::Curated => "curated",
            TopicFlag::Featured => "featured",
            TopicFlag::NotCurated => "not-curated",
            TopicFlag::NotFeatured => "not-featured",
        };
        Self::keyed("is", flag)
    }

    /// Number of repositories using the topic
    pub fn repositories(count: impl Into<Comparison<u64>>) -> Self {
        Self::compared("repositories", count.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::ByteSize;
    use crate::search::qualifier::{
        CodeQualifier, CommitQualifier, IssueQualifier, RepositoryQualifier, TopicQualifier,
        UserQualifier,
    };
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_repository_qualifiers() {
        let q = RepositoryQualifier::in_([RepositoryField::Name, RepositoryField::Description])
            .union(RepositoryQualifier::stars(Comparison::gt(100)))
            .union(RepositoryQualifier::forks(10u64..=50))
            .union(RepositoryQualifier::language("rust"))
            .union(RepositoryQualifier::license("mit"))
            .union(RepositoryQualifier::good_first_issues(Comparison::gt(3)));
        assert_eq!(
            q.to_query_string(),
            "forks:10..50+good-first-issues:>3+in:name,description+language:rust+license:mit+stars:>100"
        );
    }

    #[test]
    fn test_updated_is_pushed() {
        let day = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        assert_eq!(
            RepositoryQualifier::updated(Comparison::lt(day)),
            RepositoryQualifier::pushed(Comparison::lt(day))
        );
    }

    #[test]
    fn test_commit_qualifiers() {
        let when = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let q = CommitQualifier::author_email("me@example.com")
            .union(CommitQualifier::committer_date(Comparison::ge(when)))
            .union(CommitQualifier::merge(true))
            .union(CommitQualifier::repo("octocat", "Spoon-Knife"));
        assert_eq!(
            q.to_query_string(),
            "author-email:me@example.com+committer-date:>=2020-01-01T00:00:00Z+merge:true+repo:octocat/Spoon-Knife"
        );
    }

    #[test]
    fn test_code_qualifiers() {
        let q = CodeQualifier::in_([CodeField::File, CodeField::Path])
            .union(CodeQualifier::extension(".rs"))
            .union(CodeQualifier::size(..=ByteSize::kilobytes(2)));
        assert_eq!(q.to_query_string(), "extension:rs+in:file,path+size:<=2048");
    }

    #[test]
    fn test_issue_qualifiers() {
        let q = IssueQualifier::kind(IssueKind::PullRequest)
            .union(IssueQualifier::state(IssueState::Open))
            .union(IssueQualifier::label("help wanted"))
            .union(IssueQualifier::review(ReviewStatus::ChangesRequested))
            .union(IssueQualifier::no(IssueMetadata::Assignee))
            .union(IssueQualifier::team("github", "docs"))
            .union(IssueQualifier::project(4, Some(("octo", "repo"))));
        assert_eq!(
            q.to_query_string(),
            "label:\"help wanted\"+no:assignee+project:octo/repo/4+review:changes_requested+state:open+team:github/docs+type:pr"
        );
    }

    #[test]
    fn test_user_and_topic_qualifiers() {
        let users = UserQualifier::kind(AccountType::Org)
            .union(UserQualifier::location("San Francisco"))
            .union(UserQualifier::followers(1000u64..));
        assert_eq!(
            users.to_query_string(),
            "followers:>=1000+location:\"San Francisco\"+type:org"
        );

        let topics = TopicQualifier::is(TopicFlag::NotCurated)
            .union(TopicQualifier::repositories(Comparison::gt(50)));
        assert_eq!(topics.to_query_string(), "is:not-curated+repositories:>50");
    }
}
