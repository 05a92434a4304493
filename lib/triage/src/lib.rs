//! HTTP fetching with typed response classification.
//!
//! triage wraps one network call per invocation: the body is read exactly
//! once, successes parse into a [`Payload`], and every failure mode lands in
//! a closed set of typed errors with the original cause preserved for
//! diagnostics. See [`triage_core::fetch_json`] for the classification
//! rules.
//!
//! # Example
//!
//! ```ignore
//! use triage::{HyperClient, TransportExt};
//!
//! let client = HyperClient::new();
//! match client.get_json("https://api.example.com/styles/1").await {
//!     Ok(payload) => {
//!         let style: Style = payload.decode()?;
//!     }
//!     Err(err) if err.is_not_found() => { /* render a not-found page */ }
//!     Err(err) => return Err(err),
//! }
//! ```

mod client;
mod config;
mod connector;
pub mod prelude;

// Re-export client types
pub use client::{HyperClient, HyperClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use connector::https_connector;

// Re-export core types
pub use triage_core::{
    BodyStream, BoxError, Error, Payload, RawResponse, Request, RequestBuilder, Result, Transport,
    TransportExt, fetch_json, from_json, to_form, to_json,
};

// Re-export http types for methods, status codes, and headers
pub use triage_core::{Method, StatusCode, header};
