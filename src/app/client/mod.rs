//! Data client for the portfolio's static JSON resources
//!
//! This module is the fetch adapter: it requests a relative resource path,
//! gates on transport success, HTTP status and content type, parses the body,
//! and collapses every failure into a [`FetchResult`] error string. It never
//! returns an `Err` or panics on bad input.
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `transport`: the seam the adapter talks to
//! - `http`: reqwest implementation of the transport

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::app::models::FetchResult;
use crate::constants::data;
use crate::errors::{ClientResult, FetchError};

// Module declarations
pub mod config;
pub mod http;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(test)]
mod tests;

pub use config::ClientConfig;
pub use http::HttpTransport;
pub use transport::{RawResponse, Transport, TransportError, TransportResult};

/// Fetch adapter for portfolio resources
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    transport: Arc<dyn Transport>,
}

impl PortfolioClient {
    /// Creates a client that talks HTTP to the configured origin
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the origin is invalid or the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(config)?;
        tracing::info!("Created portfolio client for {}", transport.base_url());
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Creates a client over an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch and parse a JSON resource
    ///
    /// `path` is relative to the data base path, e.g. `directory.json`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        match self.try_fetch_json(path).await {
            Ok(value) => {
                debug!("Fetched \"{}\"", path);
                FetchResult::loaded(value)
            }
            Err(e) => {
                warn!("{}", e);
                FetchResult::failed(e)
            }
        }
    }

    async fn try_fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response =
            self.transport
                .get(path)
                .await
                .map_err(|e| FetchError::Transport {
                    path: path.to_string(),
                    cause: e.to_string(),
                })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: response.status,
                status_text: response.status_text,
            });
        }

        let is_json = response
            .content_type
            .as_deref()
            .is_some_and(|content_type| content_type.contains(data::JSON_CONTENT_TYPE));
        if !is_json {
            return Err(FetchError::ContentType {
                path: path.to_string(),
                content_type: response.content_type,
            });
        }

        let parse_error = |cause: String| FetchError::JsonParse {
            path: path.to_string(),
            cause,
        };
        let body = response.body.map_err(parse_error)?;
        serde_json::from_slice(&body).map_err(|e| parse_error(e.to_string()))
    }
}
