//! Credential handling
//!
//! A client carries at most one credential, fixed at construction:
//! - basic auth (`username` + `password`, sent base64-encoded)
//! - a token (personal access token or OAuth token)
//!
//! ## Environment Variable Fallback
//!
//! [`Auth::from_env`] looks for, in order:
//! - `GITHUB_TOKEN`
//! - `GITHUB_USERNAME` together with `GITHUB_PASSWORD`

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{GitHubError, Result};

// Environment variable names
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const GITHUB_USERNAME_ENV: &str = "GITHUB_USERNAME";
pub const GITHUB_PASSWORD_ENV: &str = "GITHUB_PASSWORD";

/// Credential injected into every request
#[derive(Debug)]
pub enum Auth {
    Basic {
        username: String,
        password: SecretString,
    },
    Token(SecretString),
}

impl Auth {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Auth::Token(SecretString::from(token.into()))
    }

    /// Credential from the process environment, if any
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Credential from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty(GITHUB_TOKEN_ENV) {
            tracing::debug!("Using GitHub token from environment variable");
            return Some(Auth::token(token));
        }

        match (non_empty(GITHUB_USERNAME_ENV), non_empty(GITHUB_PASSWORD_ENV)) {
            (Some(user), Some(pass)) => {
                tracing::debug!("Using GitHub basic credentials from environment variables");
                Some(Auth::basic(user, pass))
            }
            _ => None,
        }
    }

    /// Value of the `Authorization` header for this credential
    pub fn header_value(&self) -> Result<HeaderValue> {
        let raw = match self {
            Auth::Basic { username, password } => {
                let pair = format!("{}:{}", username, password.expose_secret());
                format!("Basic {}", STANDARD.encode(pair))
            }
            Auth::Token(token) => format!("token {}", token.expose_secret()),
        };

        let mut value = HeaderValue::from_str(&raw).map_err(|_| {
            GitHubError::InvalidInput("Credential contains characters not allowed in a header".into())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Short description that never reveals the secret
    pub fn describe(&self) -> String {
        match self {
            Auth::Basic { username, .. } => format!("basic auth as {}", username),
            Auth::Token(token) => format!("token {}", mask_token(token)),
        }
    }
}

/// Mask a token for display (show first 4 and last 4 chars)
pub fn mask_token(token: &SecretString) -> String {
    let exposed = token.expose_secret();
    let chars: Vec<char> = exposed.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_mask_token() {
        let short = SecretString::from("abc");
        assert_eq!(mask_token(&short), "***");

        let long = SecretString::from("ghp_1234567890abcdef");
        assert_eq!(mask_token(&long), "ghp_...cdef");
    }

    #[test]
    fn test_basic_header() {
        let auth = Auth::basic("octocat", "hunter2");
        let value = auth.header_value().unwrap();
        // base64("octocat:hunter2")
        assert_eq!(value, "Basic b2N0b2NhdDpodW50ZXIy");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_token_header() {
        let auth = Auth::token("ghp_abc");
        assert_eq!(auth.header_value().unwrap(), "token ghp_abc");
    }

    #[test]
    fn test_token_preferred_over_basic() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (GITHUB_TOKEN_ENV, "ghp_1234567890abcdef"),
            (GITHUB_USERNAME_ENV, "octocat"),
            (GITHUB_PASSWORD_ENV, "pw"),
        ]);
        let auth = Auth::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert!(matches!(auth, Auth::Token(_)));
        assert_eq!(auth.describe(), "token ghp_...cdef");
    }

    #[test]
    fn test_basic_needs_both_parts() {
        let vars: HashMap<&str, &str> = HashMap::from([(GITHUB_USERNAME_ENV, "octocat")]);
        assert!(Auth::from_lookup(|k| vars.get(k).map(|v| v.to_string())).is_none());

        let vars: HashMap<&str, &str> =
            HashMap::from([(GITHUB_USERNAME_ENV, "octocat"), (GITHUB_PASSWORD_ENV, "pw")]);
        let auth = Auth::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(auth.describe(), "basic auth as octocat");
    }

    #[test]
    fn test_blank_token_ignored() {
        let vars: HashMap<&str, &str> = HashMap::from([(GITHUB_TOKEN_ENV, "  ")]);
        assert!(Auth::from_lookup(|k| vars.get(k).map(|v| v.to_string())).is_none());
    }
}
