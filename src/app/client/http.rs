//! reqwest-backed transport
//!
//! Issues GET requests against `<origin>/data/<path>` and collects the status,
//! content type and body. No retries: every failure is terminal for the
//! request it belongs to.

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::config::ClientConfig;
use super::transport::{RawResponse, Transport, TransportResult};
use crate::errors::ClientResult;

/// HTTP transport for the static data origin
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport from client configuration
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the origin is invalid or the client cannot be built
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = config.build_http_client()?;
        let base_url = config.data_base_url()?;
        Ok(Self { client, base_url })
    }

    /// Base URL resource paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch(&self, path: &str) -> TransportResult {
        let url = self.base_url.join(path)?;
        debug!("GET {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| e.to_string());

        debug!("{} -> {}", url, status);

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, TransportResult> {
        self.fetch(path).boxed()
    }
}
