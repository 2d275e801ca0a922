//! Error types for Film Portfolio
//!
//! Fetch failures are typed here but flattened into the string channel of
//! [`FetchResult`](crate::app::FetchResult) at the client boundary. Everything
//! else (configuration, client construction, image optimization) propagates
//! through [`AppError`].

use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single JSON resource fetch
///
/// The display strings are the user-facing messages shown in place of page
/// content, so their wording is part of the public contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, refused connection, timeout)
    #[error("Fetch for \"{path}\" failed: \"{cause}\"")]
    Transport { path: String, cause: String },

    /// The server answered with a non-success status
    #[error("Fetch for \"{path}\" returned {status}:{status_text}")]
    Status {
        path: String,
        status: u16,
        status_text: String,
    },

    /// The response is not declared as JSON
    #[error("Fetch for \"{path}\" returned \"{}\"", .content_type.as_deref().unwrap_or("null"))]
    ContentType {
        path: String,
        content_type: Option<String>,
    },

    /// The body could not be read or parsed into the expected shape
    #[error("JSON parsing for \"{path}\" failed: \"{cause}\"")]
    JsonParse { path: String, cause: String },
}

impl FetchError {
    /// Relative resource path the failure belongs to
    pub fn path(&self) -> &str {
        match self {
            FetchError::Transport { path, .. }
            | FetchError::Status { path, .. }
            | FetchError::ContentType { path, .. }
            | FetchError::JsonParse { path, .. } => path,
        }
    }
}

/// HTTP client construction errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// reqwest refused the builder configuration
    #[error("Failed to build HTTP client")]
    Http(#[from] reqwest::Error),

    /// The configured origin is not a usable base URL
    #[error("Invalid origin URL: {origin} - {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file exists but could not be read
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML or unexpected field types
    #[error("Failed to parse config file {path}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A field parsed but its value is unusable
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Batch JPEG optimization errors
#[derive(Error, Debug)]
pub enum OptimizeError {
    /// Input or output directory is missing
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Quality is not an integer in 1..=100
    #[error("Invalid value:\t{value}")]
    InvalidQuality { value: String },

    /// Reading, writing or renaming a file failed
    #[error("File I/O error for {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding or encoding an image failed
    #[error("Image processing failed for {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A blocking encode task panicked or was cancelled
    #[error("Image task failed")]
    Task(#[from] tokio::task::JoinError),

    /// Progress bar template error
    #[error("Progress display error: {reason}")]
    Progress { reason: String },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP client error
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Image optimization error
    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Client(_) => "client",
            AppError::Config(_) => "config",
            AppError::Optimize(_) => "optimize",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Client construction result type alias
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Optimization result type alias
pub type OptimizeResult<T> = std::result::Result<T, OptimizeError>;
