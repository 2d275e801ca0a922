//! Core application logic for the film portfolio
//!
//! This module contains the data client, the request-coalescing resource
//! cache, the page loaders that read from it, and the JPEG optimizer.
//!
//! # Examples
//!
//! ```rust,no_run
//! use film_portfolio::app::{ClientConfig, Pages, PortfolioClient, ResourceCache};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PortfolioClient::new(&ClientConfig::with_origin("https://example.com"))?;
//! let pages = Pages::new(ResourceCache::shared(client), "Film by Eric");
//!
//! let view = pages.load_path("/collections/seattle").await;
//! println!("{}", view.document_title);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod models;
pub mod optimizer;
pub mod pages;

// Re-export main public API
pub use cache::{CacheStats, ResourceCache, ResourceStore};
pub use client::{ClientConfig, HttpTransport, PortfolioClient, RawResponse, Transport};
pub use models::{
    Collection, CollectionSummary, CoverPhoto, Directory, FetchResult, Photo, PhotoType,
};
pub use optimizer::{optimize_images, parse_quality, OptimizeConfig, OptimizeReport};
pub use pages::{
    aggregate_errors, resolve, CollectionView, PageContent, PageStatus, PageView, Pages, Route,
};
