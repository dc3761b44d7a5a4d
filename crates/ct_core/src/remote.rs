use async_trait::async_trait;
use crate::types::ContentItem;
use crate::Result;

/// Row filter on `content_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentFilter {
    In(Vec<String>),
    NotIn(Vec<String>),
}

impl ContentFilter {
    /// Query-string form understood by the REST backend, e.g. `content_type=in.(a,b)`.
    pub fn to_query(&self) -> String {
        match self {
            ContentFilter::In(types) => format!("content_type=in.({})", types.join(",")),
            ContentFilter::NotIn(types) => format!("content_type=not.in.({})", types.join(",")),
        }
    }
}

/// Result of the one-row connectivity probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Ok,
    /// The content table does not exist yet.
    NotProvisioned,
}

#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Request at most one row to verify the credentials.
    async fn probe(&self) -> Result<ProbeStatus>;

    /// Fetch every row matching the filter, in API order.
    async fn fetch(&self, filter: &ContentFilter) -> Result<Vec<ContentItem>>;
}
