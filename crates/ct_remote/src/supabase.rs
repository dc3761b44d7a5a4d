use async_trait::async_trait;
use ct_core::{ContentApi, ContentFilter, ContentItem, Credentials, Error, ProbeStatus, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub const CONTENT_TABLE: &str = "curated_content";

/// Read-only client for the curated content table of a PostgREST backend.
///
/// The key travels both as the `apikey` header and as a bearer token. No cookie
/// store is configured, so nothing is ever sent as a cookie.
pub struct RestContentClient {
    client: Arc<Client>,
    credentials: Credentials,
}

impl RestContentClient {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            credentials,
        })
    }

    fn table_url(&self, query: &str) -> String {
        format!(
            "{}/rest/v1/{}?select=*&{}",
            self.credentials.trimmed_base_url(),
            CONTENT_TABLE,
            query
        )
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let key = &self.credentials.api_key;
        self.client
            .get(url)
            .header("apikey", key)
            .bearer_auth(key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
    }
}

impl fmt::Debug for RestContentClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestContentClient")
            .field("client", &"<reqwest::Client>")
            .field("credentials", &self.credentials)
            .finish()
    }
}

#[async_trait]
impl ContentApi for RestContentClient {
    async fn probe(&self) -> Result<ProbeStatus> {
        let url = self.table_url("limit=1");
        debug!("Probing {}", url);
        let response = self.get(&url)
            .send()
            .await
            .map_err(|e| Error::Connectivity(format!("Request failed: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(ProbeStatus::NotProvisioned),
            status if status.is_success() => Ok(ProbeStatus::Ok),
            status => Err(Error::Connectivity(format!("HTTP error! status: {}", status.as_u16()))),
        }
    }

    async fn fetch(&self, filter: &ContentFilter) -> Result<Vec<ContentItem>> {
        let query = filter.to_query();
        let url = self.table_url(&query);
        let response = self.get(&url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{}: request failed: {}", query, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Fetch(format!("{}: HTTP {}: {}", query, status.as_u16(), body)));
        }

        let items: Vec<ContentItem> = response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("{}: invalid response body: {}", query, e)))?;
        info!("📥 {} rows for {}", items.len(), query);
        Ok(items)
    }
}
