//! Film Portfolio Library
//!
//! Data layer for a film photography portfolio: a JSON client for the site's
//! static data, a request-coalescing resource cache shared by every page, page
//! loaders with route resolution, and a batch JPEG optimizer for the image sets.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
