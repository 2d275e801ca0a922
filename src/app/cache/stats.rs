//! Cache statistics
//!
//! Counters are updated by the resource stores and never influence caching
//! decisions.

use std::ops::Add;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Snapshot of cache activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Requests answered from the resolved store
    pub hits: u64,
    /// Requests that attached to an in-flight fetch
    pub joins: u64,
    /// Fetches started
    pub fetches: u64,
    /// Fetches that settled with an error
    pub failures: u64,
}

impl CacheStats {
    /// Total requests served, however they were satisfied
    pub fn requests(&self) -> u64 {
        self.hits + self.joins + self.fetches
    }

    /// Fraction of requests that caused no network activity
    pub fn network_savings(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            0.0
        } else {
            (self.hits + self.joins) as f64 / requests as f64
        }
    }
}

impl Add for CacheStats {
    type Output = CacheStats;

    fn add(self, other: CacheStats) -> CacheStats {
        CacheStats {
            hits: self.hits + other.hits,
            joins: self.joins + other.joins,
            fetches: self.fetches + other.fetches,
            failures: self.failures + other.failures,
        }
    }
}

/// Lock-free counters behind a [`CacheStats`] snapshot
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    joins: AtomicU64,
    fetches: AtomicU64,
    failures: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_join(&self) {
        self.joins.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            joins: self.joins.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
