use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use ct_core::storage::{self, keys};
use ct_core::{Clock, ContentApi, ContentBuckets, ContentCache, ContentItem, Error, KeyValueStore, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use crate::logging::Logger;
use crate::partition::partition;
use crate::refresh::{next_refresh, should_refresh};
use crate::settings::SyncSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    Cached,
    Fetched,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub source: CacheSource,
    pub last_fetch_time: Option<DateTime<Utc>>,
    pub next_refresh: Option<DateTime<FixedOffset>>,
    pub buckets: ContentBuckets,
}

/// Decides between cached and fresh content and turns it into display buckets.
pub struct ContentSync {
    store: Arc<dyn KeyValueStore>,
    api: Arc<dyn ContentApi>,
    clock: Arc<dyn Clock>,
    settings: SyncSettings,
    logger: Logger,
}

impl ContentSync {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn ContentApi>,
        clock: Arc<dyn Clock>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            store,
            api,
            clock,
            settings,
            logger: Logger::new().with_prefix("[content]".to_string()),
        }
    }

    pub async fn load_cache(&self) -> Result<ContentCache> {
        let store = self.store.as_ref();
        let last_fetch_time = match storage::get_json::<String>(store, keys::LAST_FETCH_TIME).await? {
            Some(raw) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(time) => Some(time.with_timezone(&Utc)),
                Err(e) => {
                    self.logger.warn(&format!("Ignoring unreadable last fetch time {:?}: {}", raw, e));
                    None
                }
            },
            None => None,
        };

        Ok(ContentCache {
            last_fetch_time,
            deep_research_items: self.load_items(keys::DEEP_RESEARCH_DATA).await?,
            other_items: self.load_items(keys::OTHER_CONTENT_DATA).await?,
        })
    }

    /// A stored item set that no longer parses counts as missing, so the next run refetches it.
    async fn load_items(&self, key: &str) -> Result<Option<Vec<ContentItem>>> {
        match storage::get_json::<Vec<ContentItem>>(self.store.as_ref(), key).await {
            Err(Error::Serialization(e)) => {
                self.logger.warn(&format!("Ignoring unreadable {}: {}", key, e));
                Ok(None)
            }
            other => other,
        }
    }

    /// Fetch both item sets and store them with the fetch time in one write.
    ///
    /// Nothing is written unless both queries succeed.
    pub async fn refresh(&self) -> Result<ContentCache> {
        let logger = self.logger.child("[refresh]");
        logger.info("🌐 Fetching fresh data...");
        let deep_filter = self.settings.deep_research_filter();
        let other_filter = self.settings.other_content_filter();

        let (deep, other) = tokio::join!(
            self.api.fetch(&deep_filter),
            self.api.fetch(&other_filter)
        );

        let (deep, other) = match (deep, other) {
            (Ok(deep), Ok(other)) => (deep, other),
            (deep, other) => {
                let describe = |result: &Result<Vec<ContentItem>>| match result {
                    Ok(items) => format!("ok ({} rows)", items.len()),
                    Err(e) => e.to_string(),
                };
                let message = format!(
                    "deep research: {}; other content: {}",
                    describe(&deep),
                    describe(&other)
                );
                logger.error(&format!("Error responses: {}", message));
                return Err(Error::Fetch(message));
            }
        };

        let fetched_at = self.clock.now().with_timezone(&Utc);
        self.store
            .set_many(vec![
                (
                    keys::LAST_FETCH_TIME.to_string(),
                    Value::String(fetched_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ),
                storage::entry(keys::DEEP_RESEARCH_DATA, &deep)?,
                storage::entry(keys::OTHER_CONTENT_DATA, &other)?,
            ])
            .await?;
        logger.info(&format!(
            "💾 Cached {} deep research and {} other items at {}",
            deep.len(),
            other.len(),
            fetched_at.to_rfc3339()
        ));

        Ok(ContentCache {
            last_fetch_time: Some(fetched_at),
            deep_research_items: Some(deep),
            other_items: Some(other),
        })
    }

    /// Reuse the cache while it is valid, otherwise refresh, then partition.
    pub async fn run(&self) -> Result<SyncOutcome> {
        let cache = self.load_cache().await?;
        let now = self.clock.now();
        let hours = &self.settings.boundary_hours;

        self.logger.debug(&format!(
            "Cache status: complete={} last_fetch={:?}",
            cache.is_complete(),
            cache.last_fetch_time
        ));

        let stale = should_refresh(cache.last_fetch_time, &now, hours);
        let (cache, source) = if !stale && cache.is_complete() {
            let next = next_refresh(&now, hours)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "never".to_string());
            self.logger.info(&format!("📦 Using cached data - next fetch at {}", next));
            (cache, CacheSource::Cached)
        } else {
            if !stale {
                self.logger.warn("Cache is incomplete, fetching despite valid timestamp");
            }
            (self.refresh().await?, CacheSource::Fetched)
        };

        let deep = cache.deep_research_items.unwrap_or_default();
        let other = cache.other_items.unwrap_or_default();
        let buckets = partition(&deep, &other, &self.settings.non_tech_type);
        self.logger.info(&format!(
            "🗂️ {} left, {} non-tech, {} tech, {} duplicates dropped",
            buckets.left.len(),
            buckets.non_tech.len(),
            buckets.tech.len(),
            buckets.duplicates.len()
        ));

        Ok(SyncOutcome {
            source,
            last_fetch_time: cache.last_fetch_time,
            next_refresh: next_refresh(&now, hours),
            buckets,
        })
    }
}
