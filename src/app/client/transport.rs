//! Transport seam between the fetch adapter and the network
//!
//! A transport performs one GET for a relative resource path and hands back
//! the parts of the response the adapter gates on. It does not interpret
//! status codes or content types.

use std::fmt;

use futures::future::BoxFuture;

/// Error raised when no response could be obtained at all
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a single transport request
pub type TransportResult = Result<RawResponse, TransportError>;

/// Response parts needed to validate and parse a JSON resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Numeric HTTP status
    pub status: u16,
    /// Reason phrase for the status, empty if unknown
    pub status_text: String,
    /// Declared `content-type` header, if any
    pub content_type: Option<String>,
    /// Body bytes, or the reason the body could not be read
    pub body: Result<Vec<u8>, String>,
}

impl RawResponse {
    /// Build a `200 OK` response carrying a JSON body
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            content_type: Some("application/json".to_string()),
            body: Ok(body.into()),
        }
    }

    /// Check if the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests for relative resource paths
pub trait Transport: Send + Sync + fmt::Debug {
    /// Fetch `path`, resolved against the transport's base location
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, TransportResult>;
}
