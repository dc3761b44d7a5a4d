use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use ct_core::{
    Bookmark, Clock, ContentApi, ContentBuckets, ContentFilter, ContentItem, Error, KeyValueStore,
    PageError, ProbeStatus, Renderer, Result,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory store that counts `set_many` calls and can be told to fail them.
#[derive(Default)]
pub struct CountingStore {
    entries: Mutex<HashMap<String, Value>>,
    writes: AtomicUsize,
    fail: AtomicBool,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyValueStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Storage("disk full".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().extend(entries);
        Ok(())
    }
}

pub fn content(title: &str, content_type: &str) -> ContentItem {
    ContentItem {
        title: title.to_string(),
        content: Some(format!("About {}", title)),
        content_type: content_type.to_string(),
        source_url: None,
    }
}

/// Canned remote backend. A `None` result set makes that query fail.
pub struct FakeApi {
    pub probe: Result<ProbeStatus>,
    pub deep_research: Option<Vec<ContentItem>>,
    pub other: Option<Vec<ContentItem>>,
    pub fetches: AtomicUsize,
}

impl FakeApi {
    pub fn new(deep_research: Option<Vec<ContentItem>>, other: Option<Vec<ContentItem>>) -> Self {
        Self {
            probe: Ok(ProbeStatus::Ok),
            deep_research,
            other,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_probe(mut self, probe: Result<ProbeStatus>) -> Self {
        self.probe = probe;
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentApi for FakeApi {
    async fn probe(&self) -> Result<ProbeStatus> {
        match &self.probe {
            Ok(status) => Ok(*status),
            Err(e) => Err(Error::Connectivity(e.to_string())),
        }
    }

    async fn fetch(&self, filter: &ContentFilter) -> Result<Vec<ContentItem>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let rows = match filter {
            ContentFilter::In(_) => &self.deep_research,
            ContentFilter::NotIn(_) => &self.other,
        };
        rows.clone()
            .ok_or_else(|| Error::Fetch(format!("{}: HTTP 500", filter.to_query())))
    }
}

pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    pub fn at(day: u32, hour: u32, minute: u32) -> Self {
        Self(
            FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2025, 3, day, hour, minute, 0)
                .unwrap(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Bookmarks(Vec<Bookmark>),
    Content(ContentBuckets),
    BookmarkError(String, Duration),
    CollapseForm,
    PageError(PageError),
}

#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Renderer for RecordingRenderer {
    fn render_bookmarks(&self, bookmarks: &[Bookmark]) {
        self.push(RenderEvent::Bookmarks(bookmarks.to_vec()));
    }

    fn render_content(&self, buckets: &ContentBuckets) {
        self.push(RenderEvent::Content(buckets.clone()));
    }

    fn show_bookmark_error(&self, message: &str, hide_after: Duration) {
        self.push(RenderEvent::BookmarkError(message.to_string(), hide_after));
    }

    fn collapse_bookmark_form(&self) {
        self.push(RenderEvent::CollapseForm);
    }

    fn show_page_error(&self, error: &PageError) {
        self.push(RenderEvent::PageError(error.clone()));
    }
}
