//! Topics

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A topic as returned by topic search
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Topic {
    pub name: String,
    pub display_name: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<String>,
    /// Free-form release note, e.g. "December 21, 1995"
    pub released: Option<String>,
    #[serde(rename = "created_at")]
    pub created: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated: DateTime<Utc>,
    pub featured: bool,
    pub curated: bool,
    #[serde(default)]
    pub score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_topic() {
        let topic: Topic =
            serde_json::from_str(include_str!("../../tests/fixtures/topic.json")).unwrap();
        assert_eq!(topic.name, "ruby");
        assert_eq!(topic.display_name.as_deref(), Some("Ruby"));
        assert_eq!(topic.created_by.as_deref(), Some("Yukihiro Matsumoto"));
        assert!(topic.featured);
        assert!(topic.curated);
        assert_eq!(topic.score, Some(1750.5872));
    }
}
