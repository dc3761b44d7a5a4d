use ct_core::storage::{self, keys};
use ct_core::{Bookmark, Error, KeyValueStore, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

const FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons?sz=32&domain=";

/// Prefix `https://` unless the input already names an http(s) scheme, then parse.
pub fn normalize_url(raw_url: &str) -> Result<(String, Url)> {
    let trimmed = raw_url.trim();
    let lower = trimmed.to_ascii_lowercase();
    let normalized = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&normalized)
        .map_err(|e| Error::InvalidUrl(format!("{:?}: {}", raw_url, e)))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(Error::InvalidUrl(format!("{:?}: missing host", raw_url)));
    }
    Ok((normalized, parsed))
}

/// Host without a leading `www.`, or the raw input when there is no host.
pub fn derive_title(url: &Url, raw_url: &str) -> String {
    match url.host_str() {
        Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
        None => raw_url.to_string(),
    }
}

pub fn favicon_url(url: &Url) -> String {
    format!("{}{}", FAVICON_ENDPOINT, url.host_str().unwrap_or_default())
}

/// Ordered bookmark list, written through to storage on every mutation.
///
/// The list lock is held across the storage write so concurrent callers see
/// mutations one at a time and memory never runs ahead of storage.
pub struct BookmarkStore {
    store: Arc<dyn KeyValueStore>,
    bookmarks: Mutex<Vec<Bookmark>>,
}

impl BookmarkStore {
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let bookmarks: Vec<Bookmark> = storage::get_json(store.as_ref(), keys::BOOKMARKS)
            .await?
            .unwrap_or_default();
        info!("🔖 Loaded {} bookmarks", bookmarks.len());
        Ok(Self {
            store,
            bookmarks: Mutex::new(bookmarks),
        })
    }

    pub async fn list(&self) -> Vec<Bookmark> {
        self.bookmarks.lock().await.clone()
    }

    pub async fn add(&self, raw_url: &str, title: Option<&str>) -> Result<Bookmark> {
        let (url, parsed) = normalize_url(raw_url)?;
        let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => title.to_string(),
            None => derive_title(&parsed, raw_url),
        };
        let bookmark = Bookmark {
            url,
            title,
            favicon_url: favicon_url(&parsed),
        };

        let mut bookmarks = self.bookmarks.lock().await;
        let mut next = bookmarks.clone();
        next.push(bookmark.clone());
        self.persist(&next).await?;
        *bookmarks = next;

        info!("➕ Added bookmark {} ({})", bookmark.title, bookmark.url);
        Ok(bookmark)
    }

    /// Remove by position. Out-of-range indices are ignored and nothing is written.
    pub async fn remove(&self, index: usize) -> Result<Option<Bookmark>> {
        let mut bookmarks = self.bookmarks.lock().await;
        if index >= bookmarks.len() {
            debug!("Ignoring removal of bookmark {} (have {})", index, bookmarks.len());
            return Ok(None);
        }

        let mut next = bookmarks.clone();
        let removed = next.remove(index);
        self.persist(&next).await?;
        *bookmarks = next;

        info!("➖ Removed bookmark {} ({})", removed.title, removed.url);
        Ok(Some(removed))
    }

    async fn persist(&self, bookmarks: &[Bookmark]) -> Result<()> {
        self.store
            .set(keys::BOOKMARKS, serde_json::to_value(bookmarks)?)
            .await
    }
}
