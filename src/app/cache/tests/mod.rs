//! Behavioural tests for the resource cache
//!
//! Every test builds its own cache over a scripted transport, so no state
//! leaks between tests.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio_test::{assert_pending, assert_ready, task};

use crate::app::cache::{CacheStats, ResourceCache};
use crate::app::client::mock::MockTransport;
use crate::app::client::{PortfolioClient, RawResponse};
use crate::app::models::{Collection, CollectionSummary, CoverPhoto, Directory, Photo, PhotoType};

fn directory() -> Directory {
    Directory {
        collections: vec![CollectionSummary {
            id: "seattle".to_string(),
            title: "Seattle".to_string(),
            cover: CoverPhoto {
                src: "/images/seattle/cover.jpg".to_string(),
            },
        }],
    }
}

fn collection(id: &str) -> Collection {
    Collection {
        id: id.to_string(),
        title: id.to_uppercase(),
        date: "2020-11".to_string(),
        camera: "Olympus XA".to_string(),
        film: "HP5".to_string(),
        photos: vec![Photo {
            src: format!("/images/{}/1.jpg", id),
            alt: "Pier".to_string(),
            photo_type: PhotoType::Portrait,
        }],
    }
}

fn cache_over(transport: &Arc<MockTransport>) -> ResourceCache {
    let transport: Arc<MockTransport> = Arc::clone(transport);
    ResourceCache::new(PortfolioClient::with_transport(transport))
}

/// Yield to the runtime until `done` holds, so spawned fetch tasks can run
async fn yield_until(mut done: impl FnMut() -> bool) {
    let waited = tokio::time::timeout(Duration::from_secs(1), async {
        while !done() {
            tokio::task::yield_now().await;
        }
    })
    .await;
    assert!(waited.is_ok(), "condition not reached within 1s");
}

fn server_error() -> RawResponse {
    RawResponse {
        status: 500,
        status_text: "Internal Server Error".to_string(),
        content_type: Some("text/plain".to_string()),
        body: Ok(b"oops".to_vec()),
    }
}

#[tokio::test]
async fn test_directory_fetched_once_and_shared() {
    let transport = Arc::new(MockTransport::new());
    transport.json("directory.json", &directory());
    let cache = cache_over(&transport);

    let first = cache.directory().await;
    let second = cache.directory().await;

    assert_eq!(transport.calls(), 1);
    assert!(Arc::ptr_eq(first.data().unwrap(), second.data().unwrap()));
    assert_eq!(first.data().unwrap().as_ref(), &directory());
    assert!(second.error().is_none());
}

#[tokio::test]
async fn test_concurrent_collection_requests_coalesce() {
    let transport = Arc::new(MockTransport::delayed(Duration::from_millis(20)));
    transport.json("collections/seattle.json", &collection("seattle"));
    let cache = cache_over(&transport);

    let results = join_all((0..8).map(|_| cache.collection("seattle"))).await;

    assert_eq!(transport.calls_for("collections/seattle.json"), 1);
    let first = results[0].data().unwrap();
    for result in &results {
        assert!(Arc::ptr_eq(first, result.data().unwrap()));
    }

    let stats = cache.stats();
    assert_eq!(stats.fetches, 1);
    assert_eq!(stats.joins, 7);
}

#[tokio::test]
async fn test_second_caller_joins_before_first_settles() {
    let gate = Arc::new(Semaphore::new(0));
    let transport = Arc::new(MockTransport::gated(Arc::clone(&gate)));
    transport.json("collections/seattle.json", &collection("seattle"));
    let cache = cache_over(&transport);

    let mut first = task::spawn(cache.collection("seattle"));
    let mut second = task::spawn(cache.collection("seattle"));

    assert_pending!(first.poll());
    assert_pending!(second.poll());
    yield_until(|| transport.calls() > 0).await;
    assert_eq!(transport.calls(), 1);

    gate.add_permits(1);
    yield_until(|| first.is_woken() && second.is_woken()).await;

    let first = assert_ready!(first.poll());
    let second = assert_ready!(second.poll());
    assert_eq!(first, second);
    assert!(Arc::ptr_eq(first.data().unwrap(), second.data().unwrap()));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_concurrent_failure_is_shared_by_all_callers() {
    let transport = Arc::new(MockTransport::delayed(Duration::from_millis(20)));
    transport.respond("collections/seattle.json", server_error());
    let cache = cache_over(&transport);

    let (a, b) = tokio::join!(cache.collection("seattle"), cache.collection("seattle"));

    assert_eq!(transport.calls(), 1);
    assert_eq!(a.error(), b.error());
    assert!(a.error().unwrap().contains("500"));
}

#[tokio::test]
async fn test_different_collections_fetch_independently() {
    let gate = Arc::new(Semaphore::new(0));
    let transport = Arc::new(MockTransport::gated(Arc::clone(&gate)));
    transport.json("collections/seattle.json", &collection("seattle"));
    transport.json("collections/joshua-tree.json", &collection("joshua-tree"));
    let cache = cache_over(&transport);

    let mut seattle = task::spawn(cache.collection("seattle"));
    let mut desert = task::spawn(cache.collection("joshua-tree"));
    assert_pending!(seattle.poll());
    assert_pending!(desert.poll());
    yield_until(|| transport.calls() == 2).await;

    gate.add_permits(2);
    yield_until(|| seattle.is_woken() && desert.is_woken()).await;
    let desert = assert_ready!(desert.poll());
    let seattle = assert_ready!(seattle.poll());

    assert_eq!(desert.data().unwrap().id, "joshua-tree");
    assert_eq!(seattle.data().unwrap().id, "seattle");
    assert_eq!(cache.cached_collection_count().await, 2);
}

#[tokio::test]
async fn test_failed_fetch_is_retried_on_next_call() {
    let transport = Arc::new(MockTransport::new());
    transport
        .respond("directory.json", server_error())
        .json("directory.json", &directory());
    let cache = cache_over(&transport);

    let failed = cache.directory().await;
    assert!(failed.data().is_none());
    assert!(failed.error().unwrap().contains("500"));
    assert!(cache.cached_directory().await.is_none());

    let recovered = cache.directory().await;
    assert_eq!(recovered.data().unwrap().as_ref(), &directory());
    assert_eq!(transport.calls(), 2);

    // Now resolved for good
    let third = cache.directory().await;
    assert!(third.is_loaded());
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_directory_and_collection_do_not_share_state() {
    let transport = Arc::new(MockTransport::new());
    transport
        .json("directory.json", &directory())
        .unreachable("collections/seattle.json", "connection refused");
    let cache = cache_over(&transport);

    let (dir, coll) = cache.directory_and_collection("seattle").await;

    assert!(dir.is_loaded());
    assert_eq!(
        coll.error(),
        Some(r#"Fetch for "collections/seattle.json" failed: "connection refused""#)
    );
    assert!(cache.cached_directory().await.is_some());
    assert!(cache.cached_collection("seattle").await.is_none());
}

#[tokio::test]
async fn test_stats_track_hits_joins_and_failures() {
    let transport = Arc::new(MockTransport::delayed(Duration::from_millis(5)));
    transport
        .json("directory.json", &directory())
        .respond("collections/gone.json", server_error());
    let cache = cache_over(&transport);

    let _ = tokio::join!(cache.directory(), cache.directory());
    let _ = cache.directory().await;
    let _ = cache.collection("gone").await;

    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            joins: 1,
            fetches: 2,
            failures: 1,
        }
    );
}

#[tokio::test]
async fn test_fresh_caches_are_isolated() {
    let transport = Arc::new(MockTransport::new());
    transport.json("directory.json", &directory());

    let first = cache_over(&transport);
    let second = cache_over(&transport);
    let _ = first.directory().await;
    let _ = second.directory().await;

    assert_eq!(transport.calls(), 2);
}
