//! Custom error types for ghrest
//!
//! Every failure a call can hit is surfaced as a [`GitHubError`]; nothing in
//! the library aborts the process.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Longest body excerpt kept on decode and API errors
const BODY_EXCERPT_LIMIT: usize = 512;

/// Main error type for the ghrest library
#[derive(Error, Debug)]
pub enum GitHubError {
    /// An endpoint or hypermedia template could not be parsed
    #[error("Malformed URI template '{template}': {reason}")]
    Template { template: String, reason: String },

    /// A parameter could not be rendered into its wire form
    #[error("Cannot encode request parameter: {0}")]
    Encoding(String),

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {source}\n\n  → Body started with: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// GitHub answered with a non-success status
    #[error("GitHub API returned {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        body: String,
    },

    /// Network request error
    #[error("Network request failed: {0}\n\n  → Check your internet connection.")]
    Network(#[from] reqwest::Error),

    /// The per-call deadline elapsed before a response arrived
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The call was cancelled by its caller
    #[error("Operation cancelled.")]
    Cancelled,

    /// Invalid input from the caller
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl GitHubError {
    /// Build a decode error, keeping only the start of the offending body
    pub fn decode(source: serde_json::Error, body: &[u8]) -> Self {
        GitHubError::Decode {
            source,
            body: excerpt(body),
        }
    }

    /// Build an API error from a non-success response
    ///
    /// GitHub error bodies look like `{"message": "...", "documentation_url": "..."}`;
    /// the message is lifted out when present.
    pub fn api(status: StatusCode, body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });

        GitHubError::Api {
            status,
            message,
            body: excerpt(body),
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GitHubError::Api { status, .. } => Some(*status),
            GitHubError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the resource does not exist (or is hidden from this credential)
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the call was rejected for exhausting the rate limit
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GitHubError::Api {
                status, message, ..
            } => {
                *status == StatusCode::TOO_MANY_REQUESTS
                    || (*status == StatusCode::FORBIDDEN
                        && message.to_lowercase().contains("rate limit"))
            }
            _ => false,
        }
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() <= BODY_EXCERPT_LIMIT {
        return text.into_owned();
    }
    let mut cut: String = text.chars().take(BODY_EXCERPT_LIMIT).collect();
    cut.push('…');
    cut
}

impl From<toml::de::Error> for GitHubError {
    fn from(err: toml::de::Error) -> Self {
        GitHubError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for GitHubError {
    fn from(err: toml::ser::Error) -> Self {
        GitHubError::Toml(err.to_string())
    }
}

/// Result type alias using GitHubError
pub type Result<T> = std::result::Result<T, GitHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_lifts_message() {
        let err = GitHubError::api(
            StatusCode::NOT_FOUND,
            br#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#,
        );
        match &err {
            GitHubError::Api {
                status, message, ..
            } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_not_found());
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_api_error_without_json_body() {
        let err = GitHubError::api(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        match err {
            GitHubError::Api { message, body, .. } => {
                assert_eq!(message, "Bad Gateway");
                assert_eq!(body, "<html>oops</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rate_limited_detection() {
        let err = GitHubError::api(
            StatusCode::FORBIDDEN,
            br#"{"message":"API rate limit exceeded for 127.0.0.1."}"#,
        );
        assert!(err.is_rate_limited());

        let err = GitHubError::api(StatusCode::FORBIDDEN, br#"{"message":"Forbidden"}"#);
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let body = "x".repeat(BODY_EXCERPT_LIMIT + 10);
        let cut = excerpt(body.as_bytes());
        assert_eq!(cut.chars().count(), BODY_EXCERPT_LIMIT + 1);
        assert!(cut.ends_with('…'));
    }
}
