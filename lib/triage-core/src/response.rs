//! HTTP response handling.
//!
//! [`RawResponse`] is what a [`crate::Transport`] hands back: status, status
//! text, headers, and a body stream that may be consumed **at most once**.
//! [`RawResponse::text`] buffers the stream into a `String`; reading it a
//! second time is an error ([`crate::Error::BodyReused`]), never a panic.
//!
//! Classification ([`crate::fetch_json`]) performs the single read and then
//! inspects the buffered text repeatedly, so the invariant holds by
//! construction for normal use.

use std::collections::HashMap;
use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

use crate::error::BoxError;
use crate::{Error, Result};

/// A response body: chunks of bytes arriving over time.
///
/// Chunk errors are transport-level (e.g., a connection reset mid-body) and
/// classify as [`crate::Error::Network`].
pub type BodyStream = Pin<Box<dyn Stream<Item = std::result::Result<Bytes, BoxError>> + Send>>;

/// An HTTP response whose body has not been read yet.
pub struct RawResponse {
    status: u16,
    status_text: String,
    headers: HashMap<String, String>,
    body: Option<BodyStream>,
}

impl std::fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .field("body_consumed", &self.body.is_none())
            .finish()
    }
}

impl RawResponse {
    /// Creates a new response with a streaming body.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, String>,
        body: BodyStream,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body: Some(body),
        }
    }

    /// Creates a response whose body is already in memory.
    ///
    /// Useful for stub transports in tests; the bytes are wrapped in a
    /// one-shot stream so the single-read accounting still applies.
    #[must_use]
    pub fn buffered(
        status: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<Bytes>,
    ) -> Self {
        let bytes = body.into();
        let stream = futures_util::stream::once(async move { Ok::<_, BoxError>(bytes) });
        Self::new(status, status_text, headers, Box::pin(stream))
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// HTTP status text (e.g., "Not Found").
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether the body stream has already been consumed.
    #[must_use]
    pub const fn is_body_consumed(&self) -> bool {
        self.body.is_none()
    }

    /// Buffer the entire body into text, consuming the stream.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, matching what
    /// browsers' `response.text()` does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyReused`] if the body was already consumed, or
    /// [`Error::Network`] if reading a chunk fails.
    pub async fn text(&mut self) -> Result<String> {
        let Some(mut body) = self.body.take() else {
            return Err(Error::body_reused(
                "body stream was taken by an earlier read",
            ));
        };

        let mut collected = Vec::new();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(Error::network)?;
            collected.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&collected).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = RawResponse::buffered(200, "OK", headers, r#"{"id":1}"#);

        check!(response.status() == 200);
        check!(response.status_text() == "OK");
        check!(response.header("Content-Type") == Some("application/json"));
        check!(response.is_success());
        check!(!response.is_body_consumed());
    }

    #[test]
    fn response_status_ranges() {
        let response = RawResponse::buffered(204, "No Content", HashMap::new(), "");
        check!(response.is_success());

        let response = RawResponse::buffered(301, "Moved Permanently", HashMap::new(), "");
        check!(!response.is_success());

        let response = RawResponse::buffered(404, "Not Found", HashMap::new(), "");
        check!(!response.is_success());
    }

    #[tokio::test]
    async fn text_reads_body() {
        let mut response = RawResponse::buffered(200, "OK", HashMap::new(), "Hello, World!");

        let text = response.text().await.expect("text");
        check!(text == "Hello, World!");
        check!(response.is_body_consumed());
    }

    #[tokio::test]
    async fn text_collects_chunks() {
        let chunks: Vec<std::result::Result<Bytes, BoxError>> = vec![
            Ok(Bytes::from_static(b"{\"id\"")),
            Ok(Bytes::from_static(b":1}")),
        ];
        let stream = futures_util::stream::iter(chunks);
        let mut response = RawResponse::new(200, "OK", HashMap::new(), Box::pin(stream));

        let text = response.text().await.expect("text");
        check!(text == r#"{"id":1}"#);
    }

    #[tokio::test]
    async fn second_read_is_body_reused() {
        let mut response = RawResponse::buffered(200, "OK", HashMap::new(), "{}");

        response.text().await.expect("first read");
        let err = response.text().await.expect_err("second read must fail");
        check!(err.is_body_reused());
    }

    #[tokio::test]
    async fn chunk_error_is_network() {
        let chunks: Vec<std::result::Result<Bytes, BoxError>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset by peer",
            ))),
        ];
        let stream = futures_util::stream::iter(chunks);
        let mut response = RawResponse::new(200, "OK", HashMap::new(), Box::pin(stream));

        let err = response.text().await.expect_err("should fail");
        let_assert!(Error::Network { source } = err);
        check!(source.to_string().contains("reset by peer"));
    }
}
