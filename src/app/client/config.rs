//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the reqwest
//! client used to read static JSON data from the site origin.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{data, http};
use crate::errors::{ClientError, ClientResult};

/// Configuration for the data client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Site origin; resources live under `<origin>/data/`
    pub origin: String,
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum number of idle connections per host
    pub pool_max_per_host: usize,
    /// Honour `HTTP_PROXY` and friends from the environment
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: data::DEFAULT_ORIGIN.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            system_proxy: true,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for a specific origin
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Default::default()
        }
    }

    /// Base URL all resource paths are joined onto (`<origin>/data/`)
    pub fn data_base_url(&self) -> ClientResult<Url> {
        let invalid = |reason: String| ClientError::InvalidOrigin {
            origin: self.origin.clone(),
            reason,
        };

        let origin = Url::parse(&self.origin).map_err(|e| invalid(e.to_string()))?;
        if origin.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", origin.scheme())));
        }

        origin
            .join(data::BASE_PATH)
            .map_err(|e| invalid(e.to_string()))
    }

    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> ClientResult<Client> {
        let mut client_builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(http::USER_AGENT)
            .pool_max_idle_per_host(self.pool_max_per_host)
            .pool_idle_timeout(self.pool_idle_timeout);

        if !self.system_proxy {
            client_builder = client_builder.no_proxy();
        }

        client_builder.build().map_err(ClientError::Http)
    }
}
