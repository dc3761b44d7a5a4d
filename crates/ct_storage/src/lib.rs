use async_trait::async_trait;
use ct_core::{Error, KeyValueStore, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

#[async_trait]
pub trait StorageBackend: Send + Sync + Sized {
    fn get_error_message() -> &'static str;
    async fn open(path: &Path) -> Result<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    File,
    #[cfg(feature = "sqlite")]
    SQLite,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(Self::SQLite),
            other => Err(Error::Config(format!("Unknown storage backend: {}", other))),
        }
    }
}

impl StorageKind {
    pub fn default_path(&self) -> PathBuf {
        match self {
            Self::Memory => PathBuf::new(),
            Self::File => PathBuf::from("calmtab.json"),
            #[cfg(feature = "sqlite")]
            Self::SQLite => PathBuf::from("calmtab.db"),
        }
    }
}

async fn open_backend<T: StorageBackend + KeyValueStore + 'static>(path: &Path) -> Result<Arc<dyn KeyValueStore>> {
    match T::open(path).await {
        Ok(storage) => Ok(Arc::new(storage) as Arc<dyn KeyValueStore>),
        Err(e) => {
            tracing::error!("{} ({})", T::get_error_message(), e);
            Err(e)
        }
    }
}

/// Open the backend named by `kind`, at `path` or the backend's default location.
pub async fn create_storage(kind: &str, path: Option<&Path>) -> Result<Arc<dyn KeyValueStore>> {
    let kind = StorageKind::from_str(kind)?;
    let path = path.map(Path::to_path_buf).unwrap_or_else(|| kind.default_path());
    let storage = match kind {
        StorageKind::Memory => open_backend::<MemoryStorage>(&path).await?,
        StorageKind::File => open_backend::<FileStorage>(&path).await?,
        #[cfg(feature = "sqlite")]
        StorageKind::SQLite => open_backend::<SQLiteStorage>(&path).await?,
    };
    info!("💾 Storage ready ({:?} at {})", kind, path.display());
    Ok(storage)
}

pub mod prelude {
    pub use super::{create_storage, StorageBackend, StorageKind};
    pub use super::backends::*;
}
