//! Search qualifiers as sets of tokens
//!
//! A [`QualifierSet`] is tagged with the search family it belongs to, so a
//! commit-only qualifier can't end up in a repository search. Constructors
//! shared by several families hang off small capability traits.

use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::models::common::ByteSize;
use crate::search::comparison::{Comparison, QualifierValue};
use crate::search::sort::{ForkSearch, QualifierSort};

/// Search family markers
pub mod scope {
    #[derive(Debug, Clone, Copy)]
    pub struct Repositories;
    #[derive(Debug, Clone, Copy)]
    pub struct Commits;
    #[derive(Debug, Clone, Copy)]
    pub struct Code;
    #[derive(Debug, Clone, Copy)]
    pub struct Issues;
    #[derive(Debug, Clone, Copy)]
    pub struct Users;
    #[derive(Debug, Clone, Copy)]
    pub struct Topics;
    #[derive(Debug, Clone, Copy)]
    pub struct Labels;
}

pub type RepositoryQualifier = QualifierSet<scope::Repositories>;
pub type CommitQualifier = QualifierSet<scope::Commits>;
pub type CodeQualifier = QualifierSet<scope::Code>;
pub type IssueQualifier = QualifierSet<scope::Issues>;
pub type UserQualifier = QualifierSet<scope::Users>;
pub type TopicQualifier = QualifierSet<scope::Topics>;
pub type LabelQualifier = QualifierSet<scope::Labels>;

/// Quote a token that contains spaces
///
/// `key:some value` becomes `key:"some value"`, a bare phrase is wrapped
/// whole. Tokens that are already quoted pass through.
pub(crate) fn requote(token: &str) -> String {
    if !token.contains(' ') {
        return token.to_string();
    }
    if let Some((key, value)) = token.split_once(':') {
        if is_quoted(value) {
            return token.to_string();
        }
        return format!("{}:\"{}\"", key, value);
    }
    if is_quoted(token) {
        token.to_string()
    } else {
        format!("\"{}\"", token)
    }
}

pub(crate) fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// A set of qualifier tokens for one search family
pub struct QualifierSet<S> {
    tokens: BTreeSet<String>,
    scope: PhantomData<fn() -> S>,
}

impl<S> QualifierSet<S> {
    pub fn new() -> Self {
        Self::from_tokens(BTreeSet::new())
    }

    fn from_tokens(tokens: BTreeSet<String>) -> Self {
        Self {
            tokens,
            scope: PhantomData,
        }
    }

    /// One qualifier, quoted if needed but never split
    pub(crate) fn single(token: impl AsRef<str>) -> Self {
        let mut tokens = BTreeSet::new();
        tokens.insert(requote(token.as_ref()));
        Self::from_tokens(tokens)
    }

    pub(crate) fn keyed(key: &str, value: impl fmt::Display) -> Self {
        Self::single(format!("{}:{}", key, value))
    }

    pub(crate) fn compared<T: QualifierValue>(key: &str, value: Comparison<T>) -> Self {
        Self::keyed(key, value.render())
    }

    /// Parse raw `+`-separated qualifiers, re-quoting tokens with spaces
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split('+')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(requote)
            .collect();
        Self::from_tokens(tokens)
    }

    pub fn union(mut self, other: Self) -> Self {
        self.tokens.extend(other.tokens);
        self
    }

    pub fn intersect(self, other: Self) -> Self {
        let tokens = self.tokens.intersection(&other.tokens).cloned().collect();
        Self::from_tokens(tokens)
    }

    pub fn symmetric_difference(self, other: Self) -> Self {
        let tokens = self
            .tokens
            .symmetric_difference(&other.tokens)
            .cloned()
            .collect();
        Self::from_tokens(tokens)
    }

    /// Negate every token with a leading `-`
    ///
    /// Excluding an already excluded token includes it again.
    pub fn exclude(self) -> Self {
        let tokens = self
            .tokens
            .into_iter()
            .map(|t| match t.strip_prefix('-') {
                Some(included) => included.to_string(),
                None => format!("-{}", t),
            })
            .collect();
        Self::from_tokens(tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Tokens in sorted order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens joined with `+`
    pub fn to_query_string(&self) -> String {
        self.tokens().collect::<Vec<_>>().join("+")
    }

    /// `fork:true` or `fork:only`
    pub fn fork(fork: ForkSearch) -> Self {
        Self::keyed("fork", fork.as_str())
    }

    /// In-query sort such as `sort:interactions-asc`
    pub fn sort_by(sort: QualifierSort) -> Self {
        Self::keyed("sort", sort.render())
    }
}

impl<S> Clone for QualifierSet<S> {
    fn clone(&self) -> Self {
        Self::from_tokens(self.tokens.clone())
    }
}

impl<S> Default for QualifierSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PartialEq for QualifierSet<S> {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl<S> Eq for QualifierSet<S> {}

impl<S> fmt::Debug for QualifierSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.tokens.iter()).finish()
    }
}

impl<S> fmt::Display for QualifierSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<S> From<&str> for QualifierSet<S> {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl<S> FromStr for QualifierSet<S> {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

/// Union of all sets
impl<S> FromIterator<QualifierSet<S>> for QualifierSet<S> {
    fn from_iter<I: IntoIterator<Item = QualifierSet<S>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::union)
    }
}

/// A field an `in:` qualifier can target
pub trait SearchField: Copy {
    fn as_str(&self) -> &'static str;
}

/// Families supporting `in:`
pub trait InQualifiable {
    type Field: SearchField;
}

/// Families supporting `user:`
pub trait UserQualifiable {}

/// Families supporting `org:`
pub trait OrgQualifiable {}

/// Families supporting `repo:owner/name`
pub trait RepoQualifiable {}

/// Families supporting `created:`
pub trait CreatedQualifiable {}

/// Families supporting `is:public` / `is:private`
pub trait VisibilityQualifiable {}

/// Families supporting `archived:`
pub trait ArchivedQualifiable {}

/// Families supporting `language:`
pub trait LanguageQualifiable {}

/// Unit a family's `size:` qualifier is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
}

/// Families supporting `size:`
pub trait SizeQualifiable {
    const SIZE_UNIT: SizeUnit;
}

impl<S: InQualifiable> QualifierSet<S> {
    /// `in:a,b` restricting where keywords are matched
    pub fn in_(fields: impl IntoIterator<Item = S::Field>) -> Self {
        let fields: Vec<&str> = fields.into_iter().map(|f| f.as_str()).collect();
        Self::keyed("in", fields.join(","))
    }
}

impl<S: UserQualifiable> QualifierSet<S> {
    pub fn user(username: &str) -> Self {
        Self::keyed("user", username)
    }
}

impl<S: OrgQualifiable> QualifierSet<S> {
    pub fn org(org: &str) -> Self {
        Self::keyed("org", org)
    }
}

impl<S: RepoQualifiable> QualifierSet<S> {
    pub fn repo(owner: &str, name: &str) -> Self {
        Self::single(format!("repo:{}/{}", owner, name))
    }
}

impl<S: CreatedQualifiable> QualifierSet<S> {
    pub fn created<D: QualifierValue>(when: impl Into<Comparison<D>>) -> Self {
        Self::compared("created", when.into())
    }
}

impl<S: VisibilityQualifiable> QualifierSet<S> {
    pub fn is_public() -> Self {
        Self::keyed("is", "public")
    }

    pub fn is_private() -> Self {
        Self::keyed("is", "private")
    }
}

impl<S: ArchivedQualifiable> QualifierSet<S> {
    pub fn archived(archived: bool) -> Self {
        Self::keyed("archived", archived)
    }
}

impl<S: LanguageQualifiable> QualifierSet<S> {
    pub fn language(language: &str) -> Self {
        Self::keyed("language", language)
    }
}

impl<S: SizeQualifiable> QualifierSet<S> {
    /// `size:` in the unit the family counts in
    pub fn size(size: impl Into<Comparison<ByteSize>>) -> Self {
        let unit = S::SIZE_UNIT;
        let value = size.into().map(|s| match unit {
            SizeUnit::Bytes => s.as_bytes(),
            SizeUnit::Kilobytes => s.as_kilobytes(),
        });
        Self::compared("size", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_requotes() {
        let q = RepositoryQualifier::parse("language:swift+location:San Francisco+hello world");
        let tokens: Vec<&str> = q.tokens().collect();
        assert_eq!(
            tokens,
            vec!["\"hello world\"", "language:swift", "location:\"San Francisco\""]
        );
    }

    #[test]
    fn test_parse_keeps_quoted_tokens() {
        let q = RepositoryQualifier::parse("label:\"help wanted\"+\"exact phrase\"");
        assert!(q.contains("label:\"help wanted\""));
        assert!(q.contains("\"exact phrase\""));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_union_is_order_independent() {
        let a = RepositoryQualifier::language("swift");
        let b = RepositoryQualifier::parse("stars:>100");
        let ab = a.clone().union(b.clone());
        let ba = b.union(a);
        assert_eq!(ab, ba);
        assert_eq!(ab.len(), 2);
        assert_eq!(ab.to_query_string(), "language:swift+stars:>100");
    }

    #[test]
    fn test_union_deduplicates() {
        let q = RepositoryQualifier::language("rust").union(RepositoryQualifier::language("rust"));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_intersect_and_symmetric_difference() {
        let a = IssueQualifier::parse("is:open+label:bug");
        let b = IssueQualifier::parse("label:bug+no:assignee");
        assert_eq!(a.clone().intersect(b.clone()).to_query_string(), "label:bug");
        assert_eq!(
            a.symmetric_difference(b).to_query_string(),
            "is:open+no:assignee"
        );
    }

    #[test]
    fn test_exclude() {
        let q = CodeQualifier::language("c").union(CodeQualifier::user("octocat"));
        let excluded = q.clone().exclude();
        assert_eq!(excluded.to_query_string(), "-language:c+-user:octocat");
        assert_eq!(excluded.exclude(), q);
    }

    #[test]
    fn test_empty() {
        assert!(UserQualifier::new().is_empty());
        assert!(UserQualifier::parse("++").is_empty());
        assert_eq!(UserQualifier::default().to_query_string(), "");
    }

    #[test]
    fn test_size_units() {
        let kb = RepositoryQualifier::size(Comparison::gt(ByteSize::megabytes(1)));
        assert_eq!(kb.to_query_string(), "size:>1024");

        let bytes = CodeQualifier::size(Comparison::lt(ByteSize::kilobytes(1)));
        assert_eq!(bytes.to_query_string(), "size:<1024");
    }

    #[test]
    fn test_shared_constructors() {
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let q: IssueQualifier = [
            IssueQualifier::repo("rust-lang", "rust"),
            IssueQualifier::created(day..),
            IssueQualifier::is_public(),
            IssueQualifier::archived(false),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            q.to_query_string(),
            "archived:false+created:>=2020-01-01+is:public+repo:rust-lang/rust"
        );
    }

    #[test]
    fn test_fork_and_sort_qualifiers() {
        let q = CommitQualifier::fork(ForkSearch::Only)
            .union(CommitQualifier::sort_by(QualifierSort::AuthorDate(
                crate::search::sort::SortOrder::Asc,
            )));
        assert_eq!(q.to_query_string(), "fork:only+sort:author-date-asc");
    }

    #[test]
    fn test_single_does_not_split_on_plus() {
        let q = IssueQualifier::keyed("label", "c++");
        assert_eq!(q.to_query_string(), "label:c++");
        assert_eq!(q.len(), 1);
    }
}
