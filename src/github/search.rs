//! Search operations
//!
//! One builder per search family. The `q` parameter is escaped term by term
//! and then expanded in reserved mode, so qualifier syntax (`:`, `+`, `..`)
//! reaches GitHub unescaped while `#` or `&` inside a term cannot end it.

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::GitHub;
use crate::http::connector::CallOptions;
use crate::http::endpoint::{paginate, Endpoint, EndpointTemplate};
use crate::http::param::Params;
use crate::http::response::SearchResponse;
use crate::http::route::{ApiRequest, Route};
use crate::models::{Code, Commit, Issue, Label, Repository, Topic, User};
use crate::search::keyword::SearchKeyword;
use crate::search::qualifier::{scope, QualifierSet};
use crate::search::query::SearchQuery;
use crate::search::sort::{
    CodeSort, CommitSort, IssueSort, LabelSort, RepositorySort, SearchSort, SortOrder, TopicSort,
    UserSort,
};

/// Preview media type required by commit search
pub const COMMITS_PREVIEW: &str = "application/vnd.github.cloak-preview";
/// Preview media type required by topic search
pub const TOPICS_PREVIEW: &str = "application/vnd.github.mercy-preview+json";
/// Preview media type required by label search
pub const LABELS_PREVIEW: &str = "application/vnd.github.symmetra-preview+json";

fn search_endpoint(family: &str, preview: Option<&'static str>) -> Endpoint {
    let template = EndpointTemplate::in_category("search", &format!("/{family}?q={{+q}}"))
        .expect("Invalid search endpoint template");
    let endpoint = Endpoint::new(template);
    match preview {
        Some(media_type) => endpoint.with_accept(media_type),
        None => endpoint,
    }
}

static REPOSITORIES: Lazy<Endpoint> = Lazy::new(|| search_endpoint("repositories", None));
static COMMITS: Lazy<Endpoint> = Lazy::new(|| search_endpoint("commits", Some(COMMITS_PREVIEW)));
static CODE: Lazy<Endpoint> = Lazy::new(|| search_endpoint("code", None));
static ISSUES: Lazy<Endpoint> = Lazy::new(|| search_endpoint("issues", None));
static USERS: Lazy<Endpoint> = Lazy::new(|| search_endpoint("users", None));
static TOPICS: Lazy<Endpoint> = Lazy::new(|| search_endpoint("topics", Some(TOPICS_PREVIEW)));
static LABELS: Lazy<Endpoint> = Lazy::new(|| search_endpoint("labels", Some(LABELS_PREVIEW)));

/// A searchable resource family
pub trait SearchFamily: Sized {
    type Item: DeserializeOwned;
    type Sort: SearchSort;

    fn endpoint() -> &'static Endpoint;
}

macro_rules! search_family {
    ($scope:ty, $item:ty, $sort:ty, $endpoint:ident) => {
        impl SearchFamily for $scope {
            type Item = $item;
            type Sort = $sort;

            fn endpoint() -> &'static Endpoint {
                &$endpoint
            }
        }
    };
}

search_family!(scope::Repositories, Repository, RepositorySort, REPOSITORIES);
search_family!(scope::Commits, Commit, CommitSort, COMMITS);
search_family!(scope::Code, Code, CodeSort, CODE);
search_family!(scope::Issues, Issue, IssueSort, ISSUES);
search_family!(scope::Users, User, UserSort, USERS);
search_family!(scope::Topics, Topic, TopicSort, TOPICS);
search_family!(scope::Labels, Label, LabelSort, LABELS);

/// Search operations handler
pub struct SearchHandler<'a> {
    client: &'a GitHub,
}

impl<'a> SearchHandler<'a> {
    /// Create a new handler
    pub fn new(client: &'a GitHub) -> Self {
        Self { client }
    }

    // GitHub API: GET /search/repositories
    pub fn repositories(&self) -> SearchBuilder<'a, scope::Repositories> {
        SearchBuilder::new(self.client)
    }

    // GitHub API: GET /search/commits
    pub fn commits(&self) -> SearchBuilder<'a, scope::Commits> {
        SearchBuilder::new(self.client)
    }

    // GitHub API: GET /search/code
    pub fn code(&self) -> SearchBuilder<'a, scope::Code> {
        SearchBuilder::new(self.client)
    }

    // GitHub API: GET /search/issues
    pub fn issues(&self) -> SearchBuilder<'a, scope::Issues> {
        SearchBuilder::new(self.client)
    }

    // GitHub API: GET /search/users
    pub fn users(&self) -> SearchBuilder<'a, scope::Users> {
        SearchBuilder::new(self.client)
    }

    // GitHub API: GET /search/topics
    pub fn topics(&self) -> SearchBuilder<'a, scope::Topics> {
        SearchBuilder::new(self.client)
    }

    /// Labels of one repository
    // GitHub API: GET /search/labels?repository_id=..
    pub fn labels(&self, repository_id: u64) -> SearchBuilder<'a, scope::Labels> {
        let mut builder = SearchBuilder::new(self.client);
        builder.extra.insert("repository_id", repository_id);
        builder
    }
}

/// A search call under construction
pub struct SearchBuilder<'a, F: SearchFamily> {
    client: &'a GitHub,
    keywords: SearchKeyword,
    qualifiers: QualifierSet<F>,
    sort: F::Sort,
    order: SortOrder,
    page: Option<u32>,
    per_page: Option<u32>,
    extra: Params,
}

impl<'a, F: SearchFamily> SearchBuilder<'a, F> {
    fn new(client: &'a GitHub) -> Self {
        Self {
            client,
            keywords: SearchKeyword::new(),
            qualifiers: QualifierSet::new(),
            sort: F::Sort::default(),
            order: SortOrder::default(),
            page: None,
            per_page: None,
            extra: Params::new(),
        }
    }

    /// Add free-text keywords
    pub fn keywords(mut self, keywords: impl Into<SearchKeyword>) -> Self {
        self.keywords = self.keywords.union(keywords.into());
        self
    }

    /// Add qualifiers
    pub fn qualifiers(mut self, qualifiers: QualifierSet<F>) -> Self {
        self.qualifiers = self.qualifiers.union(qualifiers);
        self
    }

    pub fn sort(mut self, sort: F::Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// The `q` value this builder sends
    pub fn query(&self) -> SearchQuery<F> {
        SearchQuery::new(&self.keywords, &self.qualifiers)
    }

    pub async fn send(self) -> Result<SearchResponse<F::Item>> {
        self.send_with(&CallOptions::default()).await
    }

    pub async fn send_with(self, options: &CallOptions) -> Result<SearchResponse<F::Item>> {
        let response = self.client.execute_with(&self, options).await?;
        tracing::debug!(
            total = response.total,
            returned = response.len(),
            incomplete = response.incomplete_results,
            "search completed"
        );
        Ok(response)
    }
}

impl<F: SearchFamily> Route for SearchBuilder<'_, F> {
    fn endpoint(&self) -> &Endpoint {
        F::endpoint()
    }

    fn params(&self) -> Params {
        let mut params = self.extra.clone();
        params.insert("q", self.query().to_wire());
        // Best match and descending are the API defaults
        if !self.sort.is_best_match() {
            params.insert("sort", self.sort);
            if self.order == SortOrder::Asc {
                params.insert("order", self.order);
            }
        }
        paginate(params, self.page, self.per_page)
    }
}

impl<F: SearchFamily> ApiRequest for SearchBuilder<'_, F> {
    type Output = SearchResponse<F::Item>;
}
