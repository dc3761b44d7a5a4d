use ct_core::Credentials;
use std::fmt;
use std::time::Duration;

/// Credentials baked in at build time; only used until storage holds its own copy.
pub const BUILD_REMOTE_URL: Option<&str> = option_env!("CALMTAB_REMOTE_URL");
pub const BUILD_REMOTE_KEY: Option<&str> = option_env!("CALMTAB_REMOTE_KEY");

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Default)]
pub struct RemoteConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl RemoteConfig {
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        Self { base_url, api_key }
    }

    pub fn from_build() -> Self {
        Self {
            base_url: BUILD_REMOTE_URL.map(str::to_string),
            api_key: BUILD_REMOTE_KEY.map(str::to_string),
        }
    }

    /// Layer explicit values over this config; `None` keeps the current value.
    pub fn with_overrides(mut self, base_url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn credentials(&self) -> Option<Credentials> {
        match (self.base_url.as_deref(), self.api_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => {
                Some(Credentials::new(url, key))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_present_values() {
        let config = RemoteConfig::new(Some("https://a.example".into()), Some("k1".into()))
            .with_overrides(None, Some("k2".into()));
        assert_eq!(config.base_url.as_deref(), Some("https://a.example"));
        assert_eq!(config.api_key.as_deref(), Some("k2"));
    }

    #[test]
    fn test_credentials_require_both_values() {
        assert!(RemoteConfig::new(Some("https://a.example".into()), None).credentials().is_none());
        assert!(RemoteConfig::new(Some("".into()), Some("k".into())).credentials().is_none());
        let creds = RemoteConfig::new(Some("https://a.example".into()), Some("k".into()))
            .credentials()
            .unwrap();
        assert_eq!(creds.api_key, "k");
    }
}
