//! Application constants for Film Portfolio
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Overrides the data origin for the `portfolio` CLI
    pub const ORIGIN: &str = "PORTFOLIO_ORIGIN";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("Film-Portfolio/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Static JSON data layout on the site origin
pub mod data {
    /// Origin used when neither config, environment nor CLI name one
    pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

    /// Fixed base path every resource path is resolved against
    pub const BASE_PATH: &str = "/data/";

    /// Relative path of the directory listing
    pub const DIRECTORY_RESOURCE: &str = "directory.json";

    /// Folder holding one JSON document per collection
    pub const COLLECTIONS_FOLDER: &str = "collections";

    /// Substring a content type must contain to be accepted
    pub const JSON_CONTENT_TYPE: &str = "application/json";

    /// Relative path of a single collection document
    pub fn collection_resource(id: &str) -> String {
        format!("{}/{}.json", COLLECTIONS_FOLDER, id)
    }
}

/// Site presentation constants
pub mod site {
    /// Site title used in document titles and the header
    pub const DEFAULT_TITLE: &str = "Film by Eric";

    /// Separator between aggregated error messages
    pub const ERROR_SEPARATOR: &str = "; ";

    /// Placeholder for missing collection metadata
    pub const UNKNOWN: &str = "Unknown";

    /// Placeholder shown while a page is loading
    pub const LOADING_TEXT: &str = "LOADING...";

    /// Upper bound on redirects followed while resolving a route
    pub const MAX_REDIRECTS: usize = 4;
}

/// Image optimization constants
pub mod images {
    /// Root folder holding one subfolder per image set
    pub const DEFAULT_IMAGE_ROOT: &str = "images";

    /// Subfolder of an image set holding the original film scans
    pub const FILM_SUBDIR: &str = "film";

    /// JPEG quality applied when none is given
    pub const DEFAULT_QUALITY: u8 = 60;

    /// Lowest accepted JPEG quality
    pub const MIN_QUALITY: u8 = 1;

    /// Highest accepted JPEG quality
    pub const MAX_QUALITY: u8 = 100;

    /// File extensions treated as JPEG (compared case-insensitively)
    pub const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

    /// Temporary file suffix for atomic writes
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file
    pub const LOCAL_FILE: &str = "portfolio.toml";

    /// Folder under the user config directory
    pub const APP_DIR: &str = "film-portfolio";

    /// File name inside [`APP_DIR`]
    pub const FILE_NAME: &str = "config.toml";
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use data::{BASE_PATH as DATA_BASE_PATH, DEFAULT_ORIGIN, DIRECTORY_RESOURCE};
pub use env::ORIGIN as ENV_ORIGIN;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use images::DEFAULT_QUALITY;
pub use site::{DEFAULT_TITLE, ERROR_SEPARATOR};
