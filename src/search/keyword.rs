//! Free-text search keywords

use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

use crate::search::qualifier::is_quoted;

const NOT_PREFIX: &str = "NOT ";

/// Quote a keyword containing spaces, leaving a `NOT ` prefix outside the quotes
fn requote(keyword: &str) -> String {
    if !keyword.contains(' ') {
        return keyword.to_string();
    }
    if let Some(negated) = keyword.strip_prefix(NOT_PREFIX) {
        if !negated.contains(' ') || is_quoted(negated) {
            return keyword.to_string();
        }
        return format!("{}\"{}\"", NOT_PREFIX, negated);
    }
    if is_quoted(keyword) {
        keyword.to_string()
    } else {
        format!("\"{}\"", keyword)
    }
}

/// A set of search keywords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchKeyword {
    keywords: BTreeSet<String>,
}

impl SearchKeyword {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `+`-separated keywords
    pub fn parse(raw: &str) -> Self {
        let keywords = raw
            .split('+')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(requote)
            .collect();
        Self { keywords }
    }

    /// Negate every keyword with `NOT`
    pub fn not(keyword: SearchKeyword) -> Self {
        let keywords = keyword
            .keywords
            .into_iter()
            .map(|k| requote(&format!("{}{}", NOT_PREFIX, k)))
            .collect();
        Self { keywords }
    }

    pub fn union(mut self, other: Self) -> Self {
        self.keywords.extend(other.keywords);
        self
    }

    pub fn intersect(self, other: Self) -> Self {
        Self {
            keywords: self.keywords.intersection(&other.keywords).cloned().collect(),
        }
    }

    pub fn symmetric_difference(self, other: Self) -> Self {
        Self {
            keywords: self
                .keywords
                .symmetric_difference(&other.keywords)
                .cloned()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn to_query_string(&self) -> String {
        self.tokens().collect::<Vec<_>>().join("+")
    }
}

impl fmt::Display for SearchKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl From<&str> for SearchKeyword {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl FromStr for SearchKeyword {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl FromIterator<SearchKeyword> for SearchKeyword {
    fn from_iter<I: IntoIterator<Item = SearchKeyword>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quotes_phrases() {
        let k = SearchKeyword::parse("tetris+game engine");
        assert_eq!(k.to_query_string(), "\"game engine\"+tetris");
    }

    #[test]
    fn test_not_keeps_prefix_outside_quotes() {
        let k = SearchKeyword::not(SearchKeyword::parse("hello world"));
        assert_eq!(k.to_query_string(), "NOT \"hello world\"");

        let single = SearchKeyword::not("cats".into());
        assert_eq!(single.to_query_string(), "NOT cats");
    }

    #[test]
    fn test_not_applies_to_each_keyword() {
        let k = SearchKeyword::not(SearchKeyword::parse("a+b"));
        let tokens: Vec<&str> = k.tokens().collect();
        assert_eq!(tokens, vec!["NOT a", "NOT b"]);
    }

    #[test]
    fn test_parse_negated_phrase() {
        let k = SearchKeyword::parse("NOT red panda");
        assert_eq!(k.to_query_string(), "NOT \"red panda\"");
    }

    #[test]
    fn test_set_algebra() {
        let a = SearchKeyword::parse("rust+async");
        let b = SearchKeyword::parse("async+tokio");
        assert_eq!(a.clone().union(b.clone()).len(), 3);
        assert_eq!(a.clone().intersect(b.clone()).to_query_string(), "async");
        assert_eq!(a.symmetric_difference(b).to_query_string(), "rust+tokio");
    }
}
