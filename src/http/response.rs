//! Response envelope and decoding

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{GitHubError, Result};
use crate::http::connector::RawResponse;

/// Envelope returned by every `/search/*` endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(rename = "total_count")]
    pub total: u64,
    #[serde(rename = "incomplete_results")]
    pub incomplete_results: bool,
    #[serde(rename = "items")]
    pub items: Vec<T>,
}

impl<T> SearchResponse<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for SearchResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Decode a JSON body into `T`
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| GitHubError::decode(e, body))
}

impl RawResponse {
    /// Any 2xx status counts as success
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn a non-2xx response into [`GitHubError::Api`]
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(GitHubError::api(self.status, &self.body))
        }
    }

    /// Check the status, then decode the body
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.error_for_status()?;
        decode(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::rate_limit::RateLimit;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
            rate_limit: RateLimit::default(),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn test_search_envelope() {
        let body = r#"{"total_count": 2, "incomplete_results": false,
            "items": [{"name": "a"}, {"name": "b", "extra": 1}]}"#;
        let resp: SearchResponse<Item> = raw(200, body).json().unwrap();
        assert_eq!(resp.total, 2);
        assert!(!resp.incomplete_results);
        assert_eq!(resp.len(), 2);
        assert_eq!(resp.items[1].name, "b");
    }

    #[test]
    fn test_missing_field_is_decode_error() {
        let err = raw(200, r#"{"total_count": 1, "items": []}"#)
            .json::<SearchResponse<Item>>()
            .unwrap_err();
        assert!(matches!(err, GitHubError::Decode { .. }));
    }

    #[test]
    fn test_any_2xx_is_success() {
        let item: Item = raw(201, r#"{"name": "created"}"#).json().unwrap();
        assert_eq!(item.name, "created");
        assert!(raw(204, "").error_for_status().is_ok());
    }

    #[test]
    fn test_non_success_is_api_error() {
        let err = raw(404, r#"{"message": "Not Found"}"#)
            .json::<Item>()
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        match err {
            GitHubError::Api { message, body, .. } => {
                assert_eq!(message, "Not Found");
                assert!(body.contains("Not Found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_redirect_status_is_not_success() {
        assert!(raw(304, "").error_for_status().is_err());
    }
}
