use ct_core::{Bookmark, ContentBuckets, DisplayRecord, PageError, Renderer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Prints the page to stdout, one section per panel.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    mute_bookmarks: AtomicBool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mute_bookmarks(&self, mute: bool) {
        self.mute_bookmarks.store(mute, Ordering::SeqCst);
    }
}

fn print_section(header: &str, records: &[DisplayRecord]) {
    println!("\n== {} ({}) ==", header, records.len());
    for record in records {
        match &record.read_url {
            Some(url) => println!("• {} <{}>", record.title, url),
            None => println!("• {}", record.title),
        }
        if record.has_expandable_content {
            let preview: String = record.content.chars().take(160).collect();
            let ellipsis = if preview.len() < record.content.len() { "…" } else { "" };
            println!("    {}{}", preview.replace('\n', " "), ellipsis);
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render_bookmarks(&self, bookmarks: &[Bookmark]) {
        if self.mute_bookmarks.load(Ordering::SeqCst) {
            return;
        }
        println!("== Bookmarks ({}) ==", bookmarks.len());
        for (index, bookmark) in bookmarks.iter().enumerate() {
            println!("{:>3}. {} - {}", index, bookmark.title, bookmark.url);
        }
    }

    fn render_content(&self, buckets: &ContentBuckets) {
        print_section("Deep research", &buckets.left);
        print_section("Tech RSS feeds (good and neutral)", &buckets.tech);
        print_section("Good news outside tech", &buckets.non_tech);
    }

    fn show_bookmark_error(&self, message: &str, _hide_after: Duration) {
        eprintln!("⚠️ {}", message);
    }

    fn show_page_error(&self, error: &PageError) {
        match error {
            PageError::Initialization(message) => eprintln!("❌ Error initializing: {}", message),
            PageError::Content(message) => eprintln!("❌ Error fetching content: {}", message),
        }
    }
}
