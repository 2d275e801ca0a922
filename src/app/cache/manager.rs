//! Resource cache for the portfolio's JSON documents
//!
//! The directory is a singleton resource; collections are keyed by their
//! identifier. Both keyspaces are independent stores sharing one client.

use std::sync::Arc;

use tracing::debug;

use crate::app::client::PortfolioClient;
use crate::app::models::{Collection, Directory, FetchResult};
use crate::constants::data;

use super::stats::CacheStats;
use super::store::ResourceStore;

/// Process-lifetime cache of portfolio resources
///
/// Build one per session and share it by reference or `Arc`; pages never keep
/// their own copies of fetched data. Values are never invalidated, failures
/// are never stored.
#[derive(Debug)]
pub struct ResourceCache {
    client: PortfolioClient,
    directory: ResourceStore<(), Directory>,
    collections: ResourceStore<String, Collection>,
}

impl ResourceCache {
    /// Create an empty cache backed by `client`
    pub fn new(client: PortfolioClient) -> Self {
        Self {
            client,
            directory: ResourceStore::new("directory"),
            collections: ResourceStore::new("collection"),
        }
    }

    /// Create an empty cache wrapped for sharing between tasks
    pub fn shared(client: PortfolioClient) -> Arc<Self> {
        Arc::new(Self::new(client))
    }

    /// The directory listing
    pub async fn directory(&self) -> FetchResult<Directory> {
        let client = self.client.clone();
        self.directory
            .get((), move || async move {
                client.fetch_json::<Directory>(data::DIRECTORY_RESOURCE).await
            })
            .await
    }

    /// Full detail for the collection `id`
    pub async fn collection(&self, id: &str) -> FetchResult<Collection> {
        let client = self.client.clone();
        let resource = data::collection_resource(id);
        self.collections
            .get(id.to_string(), move || async move {
                client.fetch_json::<Collection>(&resource).await
            })
            .await
    }

    /// Directory and collection `id`, requested concurrently
    pub async fn directory_and_collection(
        &self,
        id: &str,
    ) -> (FetchResult<Directory>, FetchResult<Collection>) {
        tokio::join!(self.directory(), self.collection(id))
    }

    /// Resolved directory, without fetching
    pub async fn cached_directory(&self) -> Option<Arc<Directory>> {
        self.directory.peek(&()).await
    }

    /// Resolved collection, without fetching
    pub async fn cached_collection(&self, id: &str) -> Option<Arc<Collection>> {
        self.collections.peek(&id.to_string()).await
    }

    /// Number of collections resolved so far
    pub async fn cached_collection_count(&self) -> usize {
        self.collections.len().await
    }

    /// Combined activity of both keyspaces
    pub fn stats(&self) -> CacheStats {
        let stats = self.directory.stats() + self.collections.stats();
        debug!("Cache stats: {:?}", stats);
        stats
    }
}
