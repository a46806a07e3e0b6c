//! Issue labels

use serde::Deserialize;
use url::Url;

/// A repository label
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct Label {
    pub id: u64,
    pub node_id: String,
    pub url: Url,
    pub name: String,
    /// Hex colour without the leading `#`
    pub color: String,
    pub default: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_label() {
        let label: Label =
            serde_json::from_str(include_str!("../../tests/fixtures/label.json")).unwrap();
        assert_eq!(label.id, 418327088);
        assert_eq!(label.name, "enhancement");
        assert_eq!(label.color, "84b6eb");
        assert!(label.default);
        assert_eq!(label.description.as_deref(), Some("New feature or request."));
        assert_eq!(label.score, Some(1.0));
    }
}
