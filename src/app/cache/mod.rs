//! In-memory resource cache with request coalescing
//!
//! This module memoizes the portfolio's JSON resources for the lifetime of
//! the cache object. Concurrent requests for the same resource share one
//! network call; different resources never block each other.
//!
//! # Module Organization
//!
//! - [`store`] - Generic keyed store holding resolved values and in-flight fetches
//! - [`manager`] - Directory and collection keyspaces over a [`PortfolioClient`]
//! - [`stats`] - Hit, join, fetch and failure counters
//!
//! [`PortfolioClient`]: crate::app::client::PortfolioClient
//!
//! # Examples
//!
//! ```rust,no_run
//! use film_portfolio::app::cache::ResourceCache;
//! use film_portfolio::app::client::{ClientConfig, PortfolioClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PortfolioClient::new(&ClientConfig::with_origin("https://film.example.com"))?;
//! let cache = ResourceCache::new(client);
//!
//! // Both calls share one request
//! let (first, second) = tokio::join!(cache.collection("seattle"), cache.collection("seattle"));
//! match first.error() {
//!     Some(error) => eprintln!("{}", error),
//!     None => println!("{} photos", first.data().unwrap().photos.len()),
//! }
//! assert_eq!(first.is_loaded(), second.is_loaded());
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod stats;
pub mod store;

#[cfg(test)]
mod tests;

// Re-export main public API
pub use manager::ResourceCache;
pub use stats::CacheStats;
pub use store::{InFlight, ResourceStore};
