//! Page loaders for the portfolio site
//!
//! Pages never hold fetched data of their own: every load goes through the
//! shared [`ResourceCache`], and the result is a [`PageView`] in one of the
//! loading, error, empty or ready states. An error replaces the page content
//! entirely; there is no partial content alongside an error.

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::cache::ResourceCache;
use crate::app::models::{Collection, Directory};
use crate::constants::site;

pub mod about;
pub mod routes;

pub use about::{AboutContent, ABOUT};
pub use routes::{document_title, match_path, resolve, Route, RouteMatch};

/// Join the present, non-empty error messages with `"; "`
pub fn aggregate_errors<I, S>(errors: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    errors
        .into_iter()
        .flatten()
        .filter(|error| !error.as_ref().is_empty())
        .map(|error| error.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(site::ERROR_SEPARATOR)
}

/// What a page currently displays
#[derive(Debug, Clone, PartialEq)]
pub enum PageStatus {
    /// Data requested but not settled
    Loading,
    /// Failure message shown instead of content
    Error(String),
    /// Loaded, but nothing to show
    Empty,
    /// Loaded content
    Ready(PageContent),
}

/// Loaded page content
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    About(&'static AboutContent),
    Directory(Arc<Directory>),
    Collection(CollectionView),
}

/// A collection prepared for display
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionView {
    pub heading: String,
    pub subheading: String,
    pub collection: Arc<Collection>,
}

impl CollectionView {
    fn new(collection: Arc<Collection>) -> Self {
        Self {
            heading: collection.heading(),
            subheading: collection.subheading(),
            collection,
        }
    }
}

/// A route together with its document title and display state
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub route: Route,
    pub document_title: String,
    pub status: PageStatus,
}

impl PageView {
    /// Check if the page is still waiting on data
    pub fn is_loading(&self) -> bool {
        matches!(self.status, PageStatus::Loading)
    }

    /// The error shown in place of content, if any
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            PageStatus::Error(error) => Some(error),
            _ => None,
        }
    }
}

/// Loads pages from a shared resource cache
#[derive(Debug, Clone)]
pub struct Pages {
    cache: Arc<ResourceCache>,
    site_title: String,
}

impl Pages {
    /// Create page loaders over `cache`, titling documents with `site_title`
    pub fn new(cache: Arc<ResourceCache>, site_title: impl Into<String>) -> Self {
        Self {
            cache,
            site_title: site_title.into(),
        }
    }

    /// The cache pages read from
    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    /// View shown while `route` is loading
    pub fn pending(&self, route: &Route) -> PageView {
        PageView {
            route: route.clone(),
            document_title: route.document_title(&self.site_title),
            status: PageStatus::Loading,
        }
    }

    /// Resolve `path` and load the page it leads to
    pub async fn load_path(&self, path: &str) -> PageView {
        self.load(&resolve(path)).await
    }

    /// Load the page for `route`
    pub async fn load(&self, route: &Route) -> PageView {
        info!("Loading page {}", route);
        let view = match route {
            Route::About => self.about(),
            Route::Collections => self.directory_page().await,
            Route::Collection { id } => self.collection_page(id).await,
        };
        debug!("Page {} settled: {:?}", route, view.status);
        view
    }

    fn about(&self) -> PageView {
        PageView {
            status: PageStatus::Ready(PageContent::About(&ABOUT)),
            ..self.pending(&Route::About)
        }
    }

    async fn directory_page(&self) -> PageView {
        let status = match self.cache.directory().await.into_result() {
            Err(error) => PageStatus::Error(error),
            Ok(directory) if directory.is_empty() => PageStatus::Empty,
            Ok(directory) => PageStatus::Ready(PageContent::Directory(directory)),
        };

        PageView {
            status,
            ..self.pending(&Route::Collections)
        }
    }

    async fn collection_page(&self, id: &str) -> PageView {
        let route = Route::Collection { id: id.to_string() };
        let (directory, collection) = self.cache.directory_and_collection(id).await;

        let error = aggregate_errors([directory.error(), collection.error()]);

        let document_title = match collection.data() {
            Some(collection) => document_title(Some(&collection.title), &self.site_title),
            None => route.document_title(&self.site_title),
        };

        let status = match collection.into_result() {
            _ if !error.is_empty() => PageStatus::Error(error),
            Ok(collection) => PageStatus::Ready(PageContent::Collection(CollectionView::new(
                collection,
            ))),
            Err(error) => PageStatus::Error(error),
        };

        PageView {
            route,
            document_title,
            status,
        }
    }
}
