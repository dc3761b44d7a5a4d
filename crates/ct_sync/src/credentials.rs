use ct_core::storage::{self, keys};
use ct_core::{ContentApi, Credentials, Error, KeyValueStore, ProbeStatus, Result};
use ct_remote::{RemoteConfig, RestContentClient};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use crate::settings::SyncSettings;

/// Builds the content API client once credentials are known.
pub type ApiFactory =
    Arc<dyn Fn(&Credentials, &SyncSettings) -> Result<Arc<dyn ContentApi>> + Send + Sync>;

pub fn rest_api_factory() -> ApiFactory {
    Arc::new(|credentials: &Credentials, settings: &SyncSettings| -> Result<Arc<dyn ContentApi>> {
        let client = RestContentClient::new(credentials.clone(), settings.request_timeout)?;
        Ok(Arc::new(client) as Arc<dyn ContentApi>)
    })
}

/// A verified handle on the remote backend.
pub struct Connection {
    pub api: Arc<dyn ContentApi>,
    pub status: ProbeStatus,
}

/// Stored credentials win; configuration only seeds a store that lacks either value.
pub async fn load_or_seed_credentials(store: &dyn KeyValueStore, config: &RemoteConfig) -> Result<Credentials> {
    let url = storage::get_non_empty_string(store, keys::REMOTE_URL).await?;
    let key = storage::get_non_empty_string(store, keys::REMOTE_KEY).await?;

    if let (Some(url), Some(key)) = (url, key) {
        debug!("Using stored credentials for {}", url);
        return Ok(Credentials::new(url, key));
    }

    info!("🔑 No stored credentials, seeding from configuration");
    let credentials = config.credentials().ok_or_else(|| {
        Error::Config("no remote URL/key in storage or configuration".to_string())
    })?;
    store
        .set_many(vec![
            (keys::REMOTE_URL.to_string(), Value::String(credentials.base_url.clone())),
            (keys::REMOTE_KEY.to_string(), Value::String(credentials.api_key.clone())),
        ])
        .await?;
    Ok(credentials)
}

/// Resolve credentials and verify them with a one-row probe.
///
/// A missing content table is reported as [`ProbeStatus::NotProvisioned`] and is
/// not an error. Any other failure is a connectivity error.
pub async fn ensure_credentials(
    store: &dyn KeyValueStore,
    config: &RemoteConfig,
    settings: &SyncSettings,
    factory: &ApiFactory,
) -> Result<Connection> {
    info!("🔌 Starting remote initialization...");
    let credentials = load_or_seed_credentials(store, config).await?;
    let api = factory(&credentials, settings)?;

    let status = api.probe().await.map_err(|e| match e {
        Error::Connectivity(_) => e,
        other => Error::Connectivity(other.to_string()),
    })?;

    match status {
        ProbeStatus::Ok => info!("✨ Remote connection test successful"),
        ProbeStatus::NotProvisioned => {
            info!("Content table does not exist yet, this is expected for first run")
        }
    }

    Ok(Connection {
        api,
        status,
    })
}
