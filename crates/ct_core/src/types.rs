use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user bookmark. Identity is its position in the bookmark list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    #[serde(rename = "favicon", alias = "faviconUrl")]
    pub favicon_url: String,
}

/// A curated content row as returned by the remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content_type: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCache {
    pub last_fetch_time: Option<DateTime<Utc>>,
    pub deep_research_items: Option<Vec<ContentItem>>,
    pub other_items: Option<Vec<ContentItem>>,
}

impl ContentCache {
    /// Both item sets are present, so the cache can be rendered without a fetch.
    pub fn is_complete(&self) -> bool {
        self.deep_research_items.is_some() && self.other_items.is_some()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub base_url: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Which display bucket an item ended up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Panel {
    Left,
    NonTech,
    Right,
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Left => write!(f, "left"),
            Panel::NonTech => write!(f, "non-tech"),
            Panel::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub title: String,
    pub content: String,
    pub has_expandable_content: bool,
    pub read_url: Option<String>,
}

/// Placement of the first occurrence of a title and the one dropped in its favour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateTitle {
    pub title: String,
    pub kept_panel: Panel,
    pub kept_content_type: String,
    pub dropped_panel: Panel,
    pub dropped_content_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBuckets {
    pub left: Vec<DisplayRecord>,
    pub non_tech: Vec<DisplayRecord>,
    pub tech: Vec<DisplayRecord>,
    pub duplicates: Vec<DuplicateTitle>,
}

impl ContentBuckets {
    pub fn total(&self) -> usize {
        self.left.len() + self.non_tech.len() + self.tech.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_uses_favicon_field_name() {
        let bookmark = Bookmark {
            url: "https://example.com".to_string(),
            title: "example.com".to_string(),
            favicon_url: "https://www.google.com/s2/favicons?sz=32&domain=example.com".to_string(),
        };
        let value = serde_json::to_value(&bookmark).unwrap();
        assert!(value.get("favicon").is_some());

        let parsed: Bookmark = serde_json::from_value(serde_json::json!({
            "url": "https://a.org",
            "title": "a.org",
            "faviconUrl": "x"
        }))
        .unwrap();
        assert_eq!(parsed.favicon_url, "x");
    }

    #[test]
    fn test_content_item_tolerates_nulls_and_extra_fields() {
        let item: ContentItem = serde_json::from_value(serde_json::json!({
            "id": 12,
            "title": null,
            "content": null,
            "content_type": "rss_tech",
            "source_url": "https://news.example",
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(item.title, "");
        assert!(item.content.is_none());
        assert_eq!(item.source_url.as_deref(), Some("https://news.example"));
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = Credentials::new("https://db.example/", "secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret"));
        assert_eq!(creds.trimmed_base_url(), "https://db.example");
    }
}
