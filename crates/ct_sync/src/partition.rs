use ct_core::{ContentBuckets, ContentItem, DisplayRecord, DuplicateTitle, Panel};
use std::collections::HashMap;
use tracing::warn;

pub const UNTITLED: &str = "Untitled";
pub const NO_CONTENT: &str = "No content available";

/// First-seen-wins title filter, case-insensitive.
#[derive(Debug, Default)]
struct TitleDeduper {
    seen: HashMap<String, (Panel, String)>,
}

impl TitleDeduper {
    /// Returns the duplicate record when `item` was already placed somewhere.
    fn admit(&mut self, item: &ContentItem, panel: Panel) -> Option<DuplicateTitle> {
        let key = item.title.to_lowercase();
        if let Some((kept_panel, kept_content_type)) = self.seen.get(&key) {
            return Some(DuplicateTitle {
                title: item.title.clone(),
                kept_panel: *kept_panel,
                kept_content_type: kept_content_type.clone(),
                dropped_panel: panel,
                dropped_content_type: item.content_type.clone(),
            });
        }
        self.seen.insert(key, (panel, item.content_type.clone()));
        None
    }
}

pub fn to_display_record(item: &ContentItem) -> DisplayRecord {
    let content = item.content.as_deref().filter(|c| !c.is_empty());
    DisplayRecord {
        title: if item.title.is_empty() {
            UNTITLED.to_string()
        } else {
            item.title.clone()
        },
        content: content.unwrap_or(NO_CONTENT).to_string(),
        has_expandable_content: content.is_some(),
        read_url: item.source_url.clone().filter(|u| !u.is_empty()),
    }
}

/// Split fetched rows into the left, non-tech and tech buckets.
///
/// Deep research rows are placed first, then the remaining rows in API order.
/// A title already placed in any bucket is dropped.
pub fn partition(deep_research: &[ContentItem], other: &[ContentItem], non_tech_type: &str) -> ContentBuckets {
    let mut deduper = TitleDeduper::default();
    let mut buckets = ContentBuckets::default();

    let placements = deep_research
        .iter()
        .map(|item| (item, Panel::Left))
        .chain(other.iter().map(|item| {
            let panel = if item.content_type == non_tech_type {
                Panel::NonTech
            } else {
                Panel::Right
            };
            (item, panel)
        }));

    for (item, panel) in placements {
        if let Some(duplicate) = deduper.admit(item, panel) {
            warn!(
                "Duplicate title found: {:?} (kept in {} as {}, dropped from {} as {})",
                duplicate.title,
                duplicate.kept_panel,
                duplicate.kept_content_type,
                duplicate.dropped_panel,
                duplicate.dropped_content_type
            );
            buckets.duplicates.push(duplicate);
            continue;
        }

        let record = to_display_record(item);
        match panel {
            Panel::Left => buckets.left.push(record),
            Panel::NonTech => buckets.non_tech.push(record),
            Panel::Right => buckets.tech.push(record),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::NON_TECH_TYPE;

    fn item(title: &str, content_type: &str) -> ContentItem {
        ContentItem {
            title: title.to_string(),
            content: Some(format!("{} body", title)),
            content_type: content_type.to_string(),
            source_url: Some(format!("https://src.example/{}", title)),
        }
    }

    #[test]
    fn test_case_insensitive_duplicate_keeps_deep_research() {
        let deep = vec![item("Foo", "openai_deep_research")];
        let other = vec![item("foo", "rss_tech")];

        let buckets = partition(&deep, &other, NON_TECH_TYPE);
        assert_eq!(buckets.total(), 1);
        assert_eq!(buckets.left[0].title, "Foo");
        assert!(buckets.tech.is_empty());

        let duplicate = &buckets.duplicates[0];
        assert_eq!(duplicate.kept_panel, Panel::Left);
        assert_eq!(duplicate.kept_content_type, "openai_deep_research");
        assert_eq!(duplicate.dropped_panel, Panel::Right);
        assert_eq!(duplicate.dropped_content_type, "rss_tech");
    }

    #[test]
    fn test_good_news_goes_to_non_tech() {
        let other = vec![item("Puppies rescued", NON_TECH_TYPE), item("New CPU", "rss_tech")];
        let buckets = partition(&[], &other, NON_TECH_TYPE);
        assert_eq!(buckets.non_tech.len(), 1);
        assert_eq!(buckets.non_tech[0].title, "Puppies rescued");
        assert_eq!(buckets.tech.len(), 1);
        assert_eq!(buckets.tech[0].title, "New CPU");
    }

    #[test]
    fn test_first_seen_wins_within_other_items() {
        let other = vec![
            item("Same story", NON_TECH_TYPE),
            item("SAME STORY", "rss_tech"),
            item("Other", "rss_tech"),
        ];
        let buckets = partition(&[], &other, NON_TECH_TYPE);
        assert_eq!(buckets.non_tech.len(), 1);
        assert_eq!(buckets.tech.len(), 1);
        assert_eq!(buckets.tech[0].title, "Other");
        assert_eq!(buckets.duplicates[0].kept_panel, Panel::NonTech);
    }

    #[test]
    fn test_order_is_preserved() {
        let deep = vec![item("b", "perplexity_deep_research"), item("a", "openai_deep_research")];
        let other = vec![item("z", "rss_tech"), item("y", "rss_tech")];
        let buckets = partition(&deep, &other, NON_TECH_TYPE);
        let left: Vec<_> = buckets.left.iter().map(|r| r.title.as_str()).collect();
        let tech: Vec<_> = buckets.tech.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(left, ["b", "a"]);
        assert_eq!(tech, ["z", "y"]);
    }

    #[test]
    fn test_display_record_placeholders() {
        let bare = ContentItem {
            title: String::new(),
            content: None,
            content_type: "rss_tech".to_string(),
            source_url: None,
        };
        let record = to_display_record(&bare);
        assert_eq!(record.title, UNTITLED);
        assert_eq!(record.content, NO_CONTENT);
        assert!(!record.has_expandable_content);
        assert!(record.read_url.is_none());

        let full = to_display_record(&item("Full", "rss_tech"));
        assert_eq!(full.content, "Full body");
        assert!(full.has_expandable_content);
        assert_eq!(full.read_url.as_deref(), Some("https://src.example/Full"));
    }
}
