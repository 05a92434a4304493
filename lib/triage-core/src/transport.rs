//! Transport traits.
//!
//! - [`Transport`] - Low-level HTTP execution yielding an unread response
//! - [`TransportExt`] - Convenience methods running the response classifier
//!
//! A transport performs exactly one network call per [`Transport::send`] and
//! must not touch the response body; buffering is the classifier's job.

use std::future::Future;

use http::Method;

use crate::{Payload, RawResponse, Request, Result};

/// Core transport trait.
///
/// Implementations map every transport-level failure (connection refused,
/// DNS, TLS, timeout, reset) to [`crate::Error::Network`] with the original
/// error as source, so classification can rely on the taxonomy.
///
/// Cancellation is propagated by dropping the returned future; a transport
/// deadline surfaces as [`crate::Error::Network`] as well.
pub trait Transport: Send + Sync {
    /// Execute an HTTP request and return the unread response.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Network`] if the request fails before a
    /// response is received.
    fn send(&self, request: Request) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// Extension trait for [`Transport`] running the response classifier.
pub trait TransportExt: Transport {
    /// Execute a request and classify the response.
    ///
    /// See [`crate::fetch_json`] for the classification rules.
    ///
    /// # Errors
    ///
    /// Returns a classified error; see [`crate::Error`].
    fn fetch_json(&self, request: Request) -> impl Future<Output = Result<Payload>> + Send
    where
        Self: Sized,
    {
        crate::classify::fetch_json(self, request)
    }

    /// Execute a GET request and classify the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the request fails.
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Payload>> + Send
    where
        Self: Sized,
    {
        async move {
            let url = url::Url::parse(url)?;
            let request = Request::builder(Method::GET, url)
                .header("Accept", "application/json")
                .build();
            crate::classify::fetch_json(self, request).await
        }
    }

    /// Execute a POST request with a JSON body and classify the response.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the request fails.
    fn post_json<T: serde::Serialize + Send + Sync>(
        &self,
        url: &str,
        body: &T,
    ) -> impl Future<Output = Result<Payload>> + Send
    where
        Self: Sized,
    {
        async move {
            let url = url::Url::parse(url)?;
            let request = Request::builder(Method::POST, url)
                .header("Accept", "application/json")
                .json(body)?
                .build();
            crate::classify::fetch_json(self, request).await
        }
    }

    /// Execute a PUT request with a JSON body and classify the response.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the request fails.
    fn put_json<T: serde::Serialize + Send + Sync>(
        &self,
        url: &str,
        body: &T,
    ) -> impl Future<Output = Result<Payload>> + Send
    where
        Self: Sized,
    {
        async move {
            let url = url::Url::parse(url)?;
            let request = Request::builder(Method::PUT, url)
                .header("Accept", "application/json")
                .json(body)?
                .build();
            crate::classify::fetch_json(self, request).await
        }
    }

    /// Execute a DELETE request and classify the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the request fails.
    fn delete_json(&self, url: &str) -> impl Future<Output = Result<Payload>> + Send
    where
        Self: Sized,
    {
        async move {
            let url = url::Url::parse(url)?;
            let request = Request::builder(Method::DELETE, url)
                .header("Accept", "application/json")
                .build();
            crate::classify::fetch_json(self, request).await
        }
    }
}

// Blanket implementation for all Transport implementors
impl<T: Transport> TransportExt for T {}
