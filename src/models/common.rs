//! Building blocks shared by the resource records

use std::fmt;

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::{GitHubError, Result};
use crate::http::endpoint::EndpointTemplate;
use crate::http::param::Params;

/// A hypermedia link that is itself a URI template,
/// e.g. `https://api.github.com/repos/o/r/keys{/key_id}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct UriTemplate(String);

impl UriTemplate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand the template into a concrete URL
    pub fn expand(&self, params: &Params) -> Result<Url> {
        let expansion = EndpointTemplate::parse(&self.0)?.expand(params)?;
        let url = expansion.to_url();
        Url::parse(&url)
            .map_err(|e| GitHubError::InvalidInput(format!("Expanded link '{}' is not a URL: {}", url, e)))
    }

    /// The link with every optional part left out
    pub fn base(&self) -> Result<Url> {
        self.expand(&Params::new())
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A size in bytes
///
/// The API reports repository sizes in kilobytes and file sizes in bytes;
/// both are normalised to bytes here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteSize(u64);

impl ByteSize {
    pub const fn bytes(n: u64) -> Self {
        ByteSize(n)
    }

    pub const fn kilobytes(n: u64) -> Self {
        ByteSize(n.saturating_mul(1024))
    }

    pub const fn megabytes(n: u64) -> Self {
        ByteSize(n.saturating_mul(1024 * 1024))
    }

    pub const fn gigabytes(n: u64) -> Self {
        ByteSize(n.saturating_mul(1024 * 1024 * 1024))
    }

    pub const fn as_bytes(&self) -> u64 {
        self.0
    }

    /// Whole kilobytes, rounded down
    pub const fn as_kilobytes(&self) -> u64 {
        self.0 / 1024
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        let mut value = self.0 as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            write!(f, "{} B", self.0)
        } else {
            write!(f, "{:.1} {}", value, UNITS[unit])
        }
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u64::deserialize(deserializer).map(ByteSize::bytes)
    }
}

/// Deserialize a kilobyte count into a [`ByteSize`]
pub(crate) fn kilobytes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<ByteSize, D::Error> {
    u64::deserialize(deserializer).map(ByteSize::kilobytes)
}

/// Deserialize a media-type string into a [`mime::Mime`]
pub(crate) fn media_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<mime::Mime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid media type '{}'", raw)))
}

/// Treat `""` like a missing value
pub(crate) fn empty_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_template_expansion() {
        let t: UriTemplate =
            serde_json::from_str(r#""https://api.github.com/repos/o/r/keys{/key_id}""#).unwrap();
        assert_eq!(t.base().unwrap().as_str(), "https://api.github.com/repos/o/r/keys");
        let url = t.expand(&Params::new().with("key_id", 7)).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/o/r/keys/7");
    }

    #[test]
    fn test_uri_template_query_link() {
        let t: UriTemplate = serde_json::from_str(
            r#""https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}""#,
        )
        .unwrap();
        let url = t.expand(&Params::new().with("name", "a b.zip")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://uploads.github.com/repos/o/r/releases/1/assets?name=a%20b.zip"
        );
    }

    #[test]
    fn test_byte_size_units() {
        assert_eq!(ByteSize::kilobytes(2).as_bytes(), 2048);
        assert_eq!(ByteSize::bytes(4096).as_kilobytes(), 4);
        assert_eq!(ByteSize::megabytes(1), ByteSize::kilobytes(1024));
        assert_eq!(ByteSize::bytes(512).to_string(), "512 B");
        assert_eq!(ByteSize::kilobytes(1536).to_string(), "1.5 MB");
    }

    #[test]
    fn test_media_type_rejects_garbage() {
        #[derive(Debug, Deserialize)]
        struct F {
            #[serde(deserialize_with = "media_type")]
            #[allow(dead_code)]
            kind: mime::Mime,
        }
        assert!(serde_json::from_str::<F>(r#"{"kind": "text/plain"}"#).is_ok());
        assert!(serde_json::from_str::<F>(r#"{"kind": "not a media type"}"#).is_err());
    }
}
