//! Prelude module for Film Portfolio Library
//!
//! Re-exports the items most integrations need with a single
//! `use film_portfolio::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use film_portfolio::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let client = PortfolioClient::new(&config.to_runtime_config())?;
//!     let cache = ResourceCache::shared(client);
//!
//!     let directory = cache.directory().await;
//!     match directory.error() {
//!         Some(error) => eprintln!("{}", error),
//!         None => println!("{} collections", directory.data().map_or(0, |d| d.collections.len())),
//!     }
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, FetchError, Result};

// Configuration
pub use crate::config::AppConfig;

// Essential app components
pub use crate::app::{
    CacheStats, ClientConfig, Collection, Directory, FetchResult, OptimizeConfig, PageStatus,
    PageView, Pages, PortfolioClient, ResourceCache, Route, Transport,
};

// Commonly used constants
pub use crate::constants::{DEFAULT_QUALITY, DEFAULT_TITLE, USER_AGENT};

pub use std::sync::Arc;

pub use tokio;
