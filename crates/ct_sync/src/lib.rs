pub mod bookmarks;
pub mod content;
pub mod credentials;
pub mod logging;
pub mod page;
pub mod partition;
pub mod refresh;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bookmarks::BookmarkStore;
pub use content::{CacheSource, ContentSync, SyncOutcome};
pub use credentials::{ensure_credentials, ApiFactory, Connection};
pub use page::{NullRenderer, Page, PageContext};
pub use partition::partition;
pub use refresh::{next_refresh, should_refresh};
pub use settings::SyncSettings;

pub mod prelude {
    pub use super::{BookmarkStore, ContentSync, Page, PageContext, SyncSettings};
    pub use ct_core::{Bookmark, ContentBuckets, DisplayRecord, Error, PageError, Renderer, Result};
}
