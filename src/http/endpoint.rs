//! Endpoint templates
//!
//! Endpoints are written as URI templates using the subset of RFC 6570 that
//! GitHub's API and hypermedia links rely on:
//! - `{var}` simple expansion, fully percent-encoded
//! - `{+var}` / `{#var}` reserved expansion, reserved characters kept
//! - `{/a,b}` path segments, `{.ext}` labels
//! - `{?a,b}` / `{&a,b}` query parameters
//!
//! Parameters consumed by the template are never repeated in the query
//! string. Everything left over either becomes a query parameter (read calls)
//! or goes to the request body (write calls).

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT};

use crate::error::{GitHubError, Result};
use crate::http::param::{ParamValue, Params};

/// API default for `per_page`
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Largest `per_page` the API honours
pub const MAX_PER_PAGE: u32 = 100;

static EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]*)\}").expect("Invalid regex pattern for template expressions"));

static VARIABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").expect("Invalid regex pattern for variable names"));

/// Page-size policy applied to every expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn new(default_per_page: u32, max_per_page: u32) -> Self {
        let max_per_page = max_per_page.max(1);
        Self {
            default_per_page: default_per_page.clamp(1, max_per_page),
            max_per_page,
        }
    }

    /// Fold `page` and `per_page` into their canonical form
    ///
    /// `perPage` is accepted as an alias. Values equal to the API defaults
    /// are dropped, everything else is clamped into range.
    pub fn normalize(&self, params: &mut Params) {
        if let Some(alias) = params.remove("perPage") {
            if !params.contains("per_page") {
                params.insert("per_page", alias);
            }
        }

        if let Some(per_page) = params.get("per_page").and_then(ParamValue::as_int) {
            let clamped = per_page.clamp(1, i64::from(self.max_per_page));
            if clamped == i64::from(self.default_per_page) {
                params.remove("per_page");
            } else {
                params.insert("per_page", clamped);
            }
        }

        if let Some(page) = params.get("page").and_then(ParamValue::as_int) {
            if page <= 1 {
                params.remove("page");
            } else {
                params.insert("page", page);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    Path,
    Query,
    Continuation,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::Path),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::Continuation),
            _ => None,
        }
    }

    /// Whether a missing value is a caller error rather than an omitted part
    fn is_required(self) -> bool {
        matches!(self, Operator::Simple | Operator::Reserved)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Expression { op: Operator, vars: Vec<String> },
}

/// A parsed URI template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate {
    source: String,
    parts: Vec<Part>,
}

/// Result of expanding a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Expanded path (may already carry a literal query component)
    pub path: String,
    /// Percent-encoded query pairs, in expansion order
    pub query: Vec<(String, String)>,
}

impl Expansion {
    /// Path plus query string
    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let mut url = self.path.clone();
        let mut sep = if url.contains('?') { '&' } else { '?' };
        for (key, value) in &self.query {
            url.push(sep);
            url.push_str(key);
            url.push('=');
            url.push_str(value);
            sep = '&';
        }
        url
    }

    /// Look up a query value by key (value stays percent-encoded)
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl EndpointTemplate {
    /// Parse a template, rejecting anything this engine cannot expand
    pub fn parse(source: &str) -> Result<Self> {
        let malformed = |reason: &str| GitHubError::Template {
            template: source.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = Vec::new();
        let mut last = 0;

        for caps in EXPRESSION.captures_iter(source) {
            let whole = caps.get(0).ok_or_else(|| malformed("empty match"))?;
            push_literal(&mut parts, &source[last..whole.start()], &malformed)?;
            last = whole.end();

            let body = &caps[1];
            let mut chars = body.chars();
            let (op, rest) = match chars.next() {
                None => return Err(malformed("empty expression")),
                Some(c) => match Operator::from_char(c) {
                    Some(op) => (op, chars.as_str()),
                    None if c.is_ascii_alphanumeric() || c == '_' => (Operator::Simple, body),
                    None => return Err(malformed(&format!("unsupported operator '{c}'"))),
                },
            };

            let vars = rest
                .split(',')
                .map(|name| {
                    if VARIABLE_NAME.is_match(name) {
                        Ok(name.to_string())
                    } else {
                        Err(malformed(&format!("invalid variable name '{name}'")))
                    }
                })
                .collect::<Result<Vec<_>>>()?;

            parts.push(Part::Expression { op, vars });
        }
        push_literal(&mut parts, &source[last..], &malformed)?;

        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    /// Template under a fixed category segment, e.g. `/search` + `/repositories`
    pub fn in_category(category: &str, suffix: &str) -> Result<Self> {
        let category = category.trim_matches('/');
        Self::parse(&format!("/{category}{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of every variable the template consumes
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Literal(_) => None,
                Part::Expression { vars, .. } => Some(vars),
            })
            .flatten()
            .map(String::as_str)
    }

    /// Expand with the default pagination policy; leftovers become query pairs
    pub fn expand(&self, params: &Params) -> Result<Expansion> {
        self.expand_with(params, &Pagination::default())
    }

    /// Expand with an explicit pagination policy; leftovers become query pairs
    pub fn expand_with(&self, params: &Params, pagination: &Pagination) -> Result<Expansion> {
        let (mut expansion, leftover) = self.expand_split(params, pagination)?;
        for (key, value) in leftover {
            expansion
                .query
                .push((encode_unreserved(&key), encode_unreserved(&value.render())));
        }
        Ok(expansion)
    }

    /// Expand, handing back the parameters the template did not consume
    pub fn expand_split(
        &self,
        params: &Params,
        pagination: &Pagination,
    ) -> Result<(Expansion, Params)> {
        let mut remaining = params.clone();
        pagination.normalize(&mut remaining);

        let mut path = String::new();
        let mut query = Vec::new();

        for part in &self.parts {
            let (op, vars) = match part {
                Part::Literal(text) => {
                    path.push_str(text);
                    continue;
                }
                Part::Expression { op, vars } => (*op, vars),
            };

            let mut first = true;
            for name in vars {
                let value = match remaining.remove(name) {
                    Some(value) => value.render(),
                    None if op.is_required() => {
                        return Err(GitHubError::InvalidInput(format!(
                            "Missing value for '{name}' in {}",
                            self.source
                        )))
                    }
                    None => continue,
                };

                match op {
                    Operator::Simple => {
                        if !first {
                            path.push(',');
                        }
                        path.push_str(&encode_unreserved(&value));
                    }
                    Operator::Reserved | Operator::Fragment => {
                        if first && op == Operator::Fragment {
                            path.push('#');
                        } else if !first {
                            path.push(',');
                        }
                        path.push_str(&encode_reserved(&value));
                    }
                    Operator::Label => {
                        path.push('.');
                        path.push_str(&encode_unreserved(&value));
                    }
                    Operator::Path => {
                        path.push('/');
                        path.push_str(&encode_unreserved(&value));
                    }
                    Operator::Query | Operator::Continuation => {
                        query.push((encode_unreserved(name), encode_unreserved(&value)));
                    }
                }
                first = false;
            }
        }

        Ok((Expansion { path, query }, remaining))
    }
}

impl std::fmt::Display for EndpointTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn push_literal(
    parts: &mut Vec<Part>,
    text: &str,
    malformed: &impl Fn(&str) -> GitHubError,
) -> Result<()> {
    if text.contains('{') || text.contains('}') {
        return Err(malformed("unbalanced brace"));
    }
    if !text.is_empty() {
        parts.push(Part::Literal(text.to_string()));
    }
    Ok(())
}

/// Percent-encode everything outside the unreserved set
pub(crate) fn encode_unreserved(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Percent-encode, keeping reserved characters and existing escapes intact
pub(crate) fn encode_reserved(value: &str) -> String {
    const RESERVED: &[u8] = b":/?#[]@!$&'()*+,;=";

    let bytes = value.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let is_escape = b == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if b.is_ascii_alphanumeric() || b"-._~".contains(&b) || RESERVED.contains(&b) || is_escape
        {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
        i += 1;
    }
    out
}

/// Percent-encode one term of a search query
///
/// Qualifier punctuation (`:`, `/`, `,`, `*` and the `..` of ranges) stays
/// literal. Everything else outside the unreserved set is escaped, including
/// `+`, `#`, `&`, `=`, `?` and `%`.
pub(crate) fn encode_search_term(term: &str) -> String {
    const KEEP: &[u8] = b"-._~:/,*";

    let mut out = String::with_capacity(term.len());
    for b in term.bytes() {
        if b.is_ascii_alphanumeric() || KEEP.contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// A template plus the headers this endpoint needs on top of the defaults
#[derive(Debug, Clone)]
pub struct Endpoint {
    template: EndpointTemplate,
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl Endpoint {
    pub fn new(template: EndpointTemplate) -> Self {
        Self {
            template,
            headers: Vec::new(),
        }
    }

    /// Parse a template string into an endpoint
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self::new(EndpointTemplate::parse(source)?))
    }

    /// Override the `Accept` header, e.g. for preview media types
    pub fn with_accept(self, media_type: &'static str) -> Self {
        self.with_header(ACCEPT, HeaderValue::from_static(media_type))
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.retain(|(n, _)| *n != name);
        self.headers.push((name, value));
        self
    }

    pub fn template(&self) -> &EndpointTemplate {
        &self.template
    }

    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }
}

/// Adds `page`/`per_page` to a parameter set when set
pub(crate) fn paginate(params: Params, page: Option<u32>, per_page: Option<u32>) -> Params {
    params.with_opt("page", page).with_opt("per_page", per_page)
}
