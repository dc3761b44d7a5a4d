use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    /// User supplied something that does not parse as a URL, even after adding a scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Credential verification against the remote backend failed.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// One or both content queries failed; the cache was left untouched.
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
