use ct_core::{
    Bookmark, Clock, ContentApi, ContentBuckets, Error, KeyValueStore, PageError, Renderer, Result,
    SystemClock,
};
use ct_remote::RemoteConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;
use crate::bookmarks::BookmarkStore;
use crate::content::{ContentSync, SyncOutcome};
use crate::credentials::{ensure_credentials, rest_api_factory, ApiFactory, Connection};
use crate::settings::SyncSettings;

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";
pub const BOOKMARK_ERROR_TIMEOUT: Duration = Duration::from_secs(3);

/// Everything a page needs, passed explicitly instead of living in globals.
#[derive(Clone)]
pub struct PageContext {
    pub store: Arc<dyn KeyValueStore>,
    pub remote: RemoteConfig,
    pub settings: SyncSettings,
    pub clock: Arc<dyn Clock>,
    pub api_factory: ApiFactory,
}

impl PageContext {
    pub fn new(store: Arc<dyn KeyValueStore>, remote: RemoteConfig) -> Self {
        Self {
            store,
            remote,
            settings: SyncSettings::default(),
            clock: Arc::new(SystemClock),
            api_factory: rest_api_factory(),
        }
    }

    pub fn with_settings(mut self, settings: SyncSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_api_factory(mut self, api_factory: ApiFactory) -> Self {
        self.api_factory = api_factory;
        self
    }
}

/// Renderer that discards everything, for headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_bookmarks(&self, _bookmarks: &[Bookmark]) {}
    fn render_content(&self, _buckets: &ContentBuckets) {}
    fn show_bookmark_error(&self, _message: &str, _hide_after: Duration) {}
    fn show_page_error(&self, _error: &PageError) {}
}

/// One new-tab page: bookmarks plus curated content, wired to a renderer.
pub struct Page {
    context: PageContext,
    bookmarks: BookmarkStore,
    renderer: Arc<dyn Renderer>,
}

impl Page {
    /// Load the bookmark list (or start empty) and render it.
    pub async fn open(context: PageContext, renderer: Arc<dyn Renderer>) -> Result<Self> {
        let bookmarks = BookmarkStore::load(context.store.clone()).await?;
        renderer.render_bookmarks(&bookmarks.list().await);
        Ok(Self {
            context,
            bookmarks,
            renderer,
        })
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Verify credentials, then sync content and hand it to the renderer.
    ///
    /// Failures are logged and shown on the page before being returned. Anything that goes
    /// wrong while setting up the remote is an initialization error, whatever its kind.
    pub async fn load(&self) -> Result<SyncOutcome> {
        let connection = match self.connect().await {
            Ok(connection) => connection,
            Err(e) => {
                error!("Error initializing remote: {}", e);
                self.renderer.show_page_error(&PageError::Initialization(e.to_string()));
                return Err(e);
            }
        };

        match self.sync_content(connection.api).await {
            Ok(outcome) => {
                self.renderer.render_content(&outcome.buckets);
                Ok(outcome)
            }
            Err(e) => {
                error!("Error fetching content: {}", e);
                self.renderer.show_page_error(&PageError::Content(e.to_string()));
                Err(e)
            }
        }
    }

    async fn connect(&self) -> Result<Connection> {
        let ctx = &self.context;
        ensure_credentials(ctx.store.as_ref(), &ctx.remote, &ctx.settings, &ctx.api_factory).await
    }

    async fn sync_content(&self, api: Arc<dyn ContentApi>) -> Result<SyncOutcome> {
        let ctx = &self.context;
        let sync = ContentSync::new(ctx.store.clone(), api, ctx.clock.clone(), ctx.settings.clone());
        sync.run().await.map_err(|e| match e {
            Error::Connectivity(message) | Error::Config(message) => Error::Fetch(message),
            other => other,
        })
    }

    pub async fn add_bookmark(&self, raw_url: &str, title: Option<&str>) -> Result<Bookmark> {
        match self.bookmarks.add(raw_url, title).await {
            Ok(bookmark) => {
                self.renderer.render_bookmarks(&self.bookmarks.list().await);
                self.renderer.collapse_bookmark_form();
                Ok(bookmark)
            }
            Err(e) => {
                error!("Error adding bookmark: {}", e);
                if matches!(e, Error::InvalidUrl(_)) {
                    self.renderer.show_bookmark_error(INVALID_URL_MESSAGE, BOOKMARK_ERROR_TIMEOUT);
                }
                Err(e)
            }
        }
    }

    pub async fn remove_bookmark(&self, index: usize) -> Result<Option<Bookmark>> {
        let removed = self.bookmarks.remove(index).await.map_err(|e| {
            error!("Error removing bookmark {}: {}", index, e);
            e
        })?;
        if removed.is_some() {
            self.renderer.render_bookmarks(&self.bookmarks.list().await);
        }
        Ok(removed)
    }
}
