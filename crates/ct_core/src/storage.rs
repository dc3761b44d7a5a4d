use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use crate::Result;

/// Well-known storage keys shared with the browser extension layout.
pub mod keys {
    pub const BOOKMARKS: &str = "bookmarks";
    pub const REMOTE_URL: &str = "supabaseUrl";
    pub const REMOTE_KEY: &str = "supabaseKey";
    pub const LAST_FETCH_TIME: &str = "lastFetchTime";
    pub const DEEP_RESEARCH_DATA: &str = "deepResearchData";
    pub const OTHER_CONTENT_DATA: &str = "otherContentData";
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a single key; `None` when it was never written.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write all entries as one unit: either every entry lands or none does.
    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<()>;

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.set_many(vec![(key.to_string(), value)]).await
    }
}

/// Read and deserialize a key.
pub async fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Read a string key, treating an empty string as absent.
pub async fn get_non_empty_string(store: &dyn KeyValueStore, key: &str) -> Result<Option<String>> {
    Ok(get_json::<String>(store, key).await?.filter(|s| !s.is_empty()))
}

pub fn entry<T: Serialize>(key: &str, value: &T) -> Result<(String, Value)> {
    Ok((key.to_string(), serde_json::to_value(value)?))
}
