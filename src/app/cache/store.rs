//! Keyed resource store with in-flight request coalescing
//!
//! Each key has at most one resolved value and at most one in-flight fetch.
//! The in-flight fetch runs as its own tokio task behind a [`Shared`] handle,
//! so every concurrent caller for a key awaits the same request and receives
//! the same settled result. The task settles the store even when every caller
//! has gone away.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::debug;

use super::stats::{CacheCounters, CacheStats};
use crate::app::models::FetchResult;

/// Shared handle to a fetch that has not settled yet
pub type InFlight<T> = Shared<BoxFuture<'static, FetchResult<T>>>;

struct StoreState<K, T> {
    resolved: HashMap<K, Arc<T>>,
    in_flight: HashMap<K, InFlight<T>>,
}

/// Memoizing store for one kind of resource
pub struct ResourceStore<K, T> {
    name: &'static str,
    state: Arc<Mutex<StoreState<K, T>>>,
    counters: Arc<CacheCounters>,
}

impl<K, T> ResourceStore<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    /// Create an empty store; `name` only appears in logs
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(Mutex::new(StoreState {
                resolved: HashMap::new(),
                in_flight: HashMap::new(),
            })),
            counters: Arc::new(CacheCounters::default()),
        }
    }

    /// Resolve `key`, fetching it with `fetch` only when neither a resolved
    /// value nor an in-flight request exists
    ///
    /// Lookup and registration happen under one lock acquisition, so two
    /// calls for the same key can never both start a fetch. Storing the
    /// value and clearing the in-flight entry run inside the spawned fetch
    /// task, before any caller observes the result. Must be called from
    /// within a tokio runtime.
    pub async fn get<F, Fut>(&self, key: K, fetch: F) -> FetchResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        let handle = {
            let mut state = self.state.lock().await;

            if let Some(value) = state.resolved.get(&key) {
                debug!("{} {:?}: cache hit", self.name, key);
                self.counters.record_hit();
                return FetchResult::Loaded(Arc::clone(value));
            }

            if let Some(handle) = state.in_flight.get(&key) {
                debug!("{} {:?}: joining in-flight fetch", self.name, key);
                self.counters.record_join();
                handle.clone()
            } else {
                debug!("{} {:?}: fetching", self.name, key);
                self.counters.record_fetch();
                let handle = self.settle(key.clone(), fetch());
                state.in_flight.insert(key, handle.clone());
                handle
            }
        };

        handle.await
    }

    /// Run a fetch as its own task so that it settles the store exactly once,
    /// whether or not any caller is still waiting on it
    fn settle<Fut>(&self, key: K, request: Fut) -> InFlight<T>
    where
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        let counters = Arc::clone(&self.counters);
        let name = self.name;
        let task_key = key.clone();

        let task = tokio::spawn(async move {
            let key = task_key;
            let result = AssertUnwindSafe(request)
                .catch_unwind()
                .await
                .unwrap_or_else(|_| FetchResult::failed(format!("Fetch for {:?} panicked", key)));

            let mut state = state.lock().await;
            state.in_flight.remove(&key);
            match &result {
                FetchResult::Loaded(value) => {
                    state.resolved.insert(key, Arc::clone(value));
                }
                FetchResult::Failed(error) => {
                    debug!("{} {:?}: not cached after failure: {}", name, key, error);
                    counters.record_failure();
                }
            }

            result
        });

        task.map(move |joined| {
            joined.unwrap_or_else(|e| {
                FetchResult::failed(format!("Fetch for {:?} did not complete: {}", key, e))
            })
        })
        .boxed()
        .shared()
    }

    /// Resolved value for `key`, without fetching
    pub async fn peek(&self, key: &K) -> Option<Arc<T>> {
        self.state.lock().await.resolved.get(key).cloned()
    }

    /// Check if a fetch for `key` is currently in flight
    pub async fn is_in_flight(&self, key: &K) -> bool {
        self.state.lock().await.in_flight.contains_key(key)
    }

    /// Number of resolved values held
    pub async fn len(&self) -> usize {
        self.state.lock().await.resolved.len()
    }

    /// Check if no value has been resolved yet
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Activity counters for this store
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

impl<K, T> fmt::Debug for ResourceStore<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStore")
            .field("name", &self.name)
            .field("stats", &self.counters.snapshot())
            .finish()
    }
}
