//! The `q` parameter of a search

use std::fmt;

use crate::http::endpoint::encode_search_term;
use crate::search::keyword::SearchKeyword;
use crate::search::qualifier::QualifierSet;

/// Keywords followed by qualifiers, joined with `+`
pub struct SearchQuery<S> {
    terms: Vec<String>,
    raw: String,
    scope: std::marker::PhantomData<fn() -> S>,
}

impl<S> SearchQuery<S> {
    pub fn new(keywords: &SearchKeyword, qualifiers: &QualifierSet<S>) -> Self {
        let terms: Vec<String> = keywords
            .tokens()
            .chain(qualifiers.tokens())
            .map(str::to_string)
            .collect();
        let raw = terms.join("+");
        Self {
            terms,
            raw,
            scope: std::marker::PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Query text as sent on the wire
    ///
    /// Each term is escaped on its own and the separators stay literal `+`,
    /// so a `#`, `&` or `+` inside a term cannot split the query string.
    pub fn to_wire(&self) -> String {
        self.terms
            .iter()
            .map(|term| encode_search_term(term))
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl<S> Clone for SearchQuery<S> {
    fn clone(&self) -> Self {
        Self {
            terms: self.terms.clone(),
            raw: self.raw.clone(),
            scope: std::marker::PhantomData,
        }
    }
}

impl<S> fmt::Debug for SearchQuery<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SearchQuery").field(&self.raw).finish()
    }
}

impl<S> fmt::Display for SearchQuery<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::qualifier::RepositoryQualifier;

    #[test]
    fn test_keywords_then_qualifiers() {
        let q = SearchQuery::new(
            &SearchKeyword::parse("tetris"),
            &RepositoryQualifier::language("assembly"),
        );
        assert_eq!(q.as_str(), "tetris+language:assembly");
    }

    #[test]
    fn test_one_side_empty() {
        let only_keywords = SearchQuery::new(&SearchKeyword::parse("tetris"), &RepositoryQualifier::new());
        assert_eq!(only_keywords.as_str(), "tetris");

        let only_qualifiers = SearchQuery::new(&SearchKeyword::new(), &RepositoryQualifier::language("go"));
        assert_eq!(only_qualifiers.as_str(), "language:go");

        assert!(SearchQuery::<()>::new(&SearchKeyword::new(), &QualifierSet::new()).is_empty());
    }

    #[test]
    fn test_wire_form_escapes_inside_terms() {
        let q = SearchQuery::new(
            &SearchKeyword::parse("c#"),
            &RepositoryQualifier::language("c++"),
        );
        assert_eq!(q.as_str(), "c#+language:c++");
        assert_eq!(q.to_wire(), "c%23+language:c%2B%2B");

        let amp = SearchQuery::new(&SearchKeyword::parse("rock&roll=yes?"), &QualifierSet::<()>::new());
        assert_eq!(amp.to_wire(), "rock%26roll%3Dyes%3F");
    }

    #[test]
    fn test_wire_form_keeps_ranges_and_paths() {
        let q = SearchQuery::new(
            &SearchKeyword::new(),
            &RepositoryQualifier::stars(crate::search::comparison::Comparison::between(10, 50)),
        );
        assert_eq!(q.to_wire(), "stars:10..50");

        let path = SearchQuery::new(&SearchKeyword::parse("in:name,path+100%"), &QualifierSet::<()>::new());
        assert_eq!(path.to_wire(), "100%25+in:name,path");
    }
}
