//! Bookmark entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Color assigned to new bookmarks when none is given
pub const DEFAULT_COLOR: &str = "#3498db";

/// A saved website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Unique within the collection; derived from the creation timestamp (ms)
    pub id: i64,
    pub name: String,
    /// Always carries an explicit http:// or https:// scheme
    pub url: String,
    /// Hex color used for the tile
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// Ensure the URL carries an explicit scheme; bare hosts get https.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com/a?b=1 "), "https://example.com/a?b=1");
    }

    #[test]
    fn explicit_schemes_are_preserved() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let bookmark = Bookmark {
            id: 1,
            name: "docs".into(),
            url: "https://example.com".into(),
            color: DEFAULT_COLOR.into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&bookmark).unwrap();
        assert!(json.get("createdAt").is_some());
    }
}
