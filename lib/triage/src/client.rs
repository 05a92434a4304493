//! HTTP transport implementation using hyper-util.

use std::collections::HashMap;

use bytes::Bytes;
use futures_util::TryStreamExt;
use http_body_util::{BodyStream, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use triage_core::{BoxError, Error, RawResponse, Request, Result, Transport};

use crate::{config::ClientConfig, connector::https_connector};

/// HTTP transport using hyper-util with connection pooling and rustls TLS.
///
/// Implements [`Transport`]: every failure before a full response (connect,
/// DNS, TLS, deadline) maps to [`Error::Network`] with the original error as
/// source, and the response body is handed back unread so the classifier
/// can buffer it exactly once.
///
/// Cache tags on the request are advisory; this transport has no cache and
/// ignores them.
///
/// # Example
///
/// ```ignore
/// use triage::{HyperClient, TransportExt};
///
/// let client = HyperClient::new();
/// let payload = client.get_json("https://api.example.com/styles/1").await?;
/// ```
#[derive(Clone)]
pub struct HyperClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a new client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let connector = https_connector();

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a hyper request from a triage request.
    fn build_hyper_request(request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body, _cache_tags) = request.into_parts();

        let mut builder = http::Request::builder().method(method).uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperClient {
    async fn send(&self, request: Request) -> Result<RawResponse> {
        let hyper_request = Self::build_hyper_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(Error::network)?
            .map_err(Error::network)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default();
        let response_headers = Self::extract_headers(response.headers());

        // Hand the body back unread; buffering it is the classifier's job.
        let body = BodyStream::new(response.into_body())
            .map_ok(|frame| frame.into_data().unwrap_or_default())
            .map_err(|err| Box::new(err) as BoxError);

        Ok(RawResponse::new(
            status.as_u16(),
            status_text,
            response_headers,
            Box::pin(body),
        ))
    }
}

/// Builder for [`HyperClient`].
///
/// # Example
///
/// ```ignore
/// use triage::HyperClient;
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .pool_idle_per_host(8)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct HyperClientBuilder {
    config: crate::config::ClientConfigBuilder,
}

impl HyperClientBuilder {
    /// Set the request deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        HyperClient::with_config(self.config.build())
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn client_default() {
        let client = HyperClient::new();
        check!(client.config().timeout == std::time::Duration::from_secs(30));
    }

    #[test]
    fn client_builder() {
        let client = HyperClient::builder()
            .timeout(std::time::Duration::from_secs(60))
            .pool_idle_per_host(16)
            .build();

        check!(client.config().timeout == std::time::Duration::from_secs(60));
        check!(client.config().pool_idle_per_host == 16);
    }

    #[test]
    fn client_is_clone() {
        let client = HyperClient::new();
        let _cloned = client.clone();
    }

    #[test]
    fn client_is_debug() {
        let client = HyperClient::new();
        let debug = format!("{client:?}");
        check!(debug.contains("HyperClient"));
    }

    #[test]
    fn hyper_request_carries_method_headers_and_body() {
        let url = url::Url::parse("https://api.example.com/styles").expect("url");
        let request = Request::builder(http::Method::POST, url)
            .header("Accept", "application/json")
            .body("{}")
            .cache_tag("styles")
            .build();

        let hyper_request = HyperClient::build_hyper_request(request).expect("request");
        check!(hyper_request.method() == http::Method::POST);
        check!(hyper_request.uri().path() == "/styles");
        check!(
            hyper_request
                .headers()
                .get("Accept")
                .map(|v| v.to_str().expect("ascii"))
                == Some("application/json")
        );
    }
}
