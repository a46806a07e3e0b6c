//! Code search results

use serde::Deserialize;
use url::Url;

use crate::models::repository::BasicRepository;

/// A file matched by code search
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Code {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub repository: BasicRepository,
    #[serde(default)]
    pub score: Option<f64>,

    #[serde(rename = "url")]
    pub(crate) api_url: Url,
    pub(crate) git_url: Url,
    pub(crate) html_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeApiUrls {
    /// Contents API link for the file at the matched ref
    pub contents: Url,
    /// Git blob link
    pub blob: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeUrls {
    pub api: CodeApiUrls,
    pub webpage: Url,
}

impl Code {
    /// Link view, computed on each call
    pub fn urls(&self) -> CodeUrls {
        CodeUrls {
            api: CodeApiUrls {
                contents: self.api_url.clone(),
                blob: self.git_url.clone(),
            },
            webpage: self.html_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_code() {
        let code: Code =
            serde_json::from_str(include_str!("../../tests/fixtures/code.json")).unwrap();
        assert_eq!(code.name, "classes.js");
        assert_eq!(code.path, "src/attributes/classes.js");
        assert_eq!(code.repository.name, "Hello-World");

        let urls = code.urls();
        assert_eq!(
            urls.api.contents.query(),
            Some("ref=825ac3773694e0cd23ee74895fd5aeb535b27da4")
        );
        assert!(urls.webpage.as_str().ends_with("/src/attributes/classes.js"));
    }
}
