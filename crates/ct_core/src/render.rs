use std::time::Duration;
use crate::types::{Bookmark, ContentBuckets};

/// Page-level failures that replace whole panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Credentials could not be set up or verified; content is not fetched.
    Initialization(String),
    /// Content could not be loaded; shown in all three content buckets.
    Content(String),
}

/// The UI layer. Implementations own all presentation, including expand/collapse.
pub trait Renderer: Send + Sync {
    fn render_bookmarks(&self, bookmarks: &[Bookmark]);

    fn render_content(&self, buckets: &ContentBuckets);

    /// Transient message next to the bookmark form; the form stays open.
    fn show_bookmark_error(&self, message: &str, hide_after: Duration);

    fn collapse_bookmark_form(&self) {}

    fn show_page_error(&self, error: &PageError);
}
