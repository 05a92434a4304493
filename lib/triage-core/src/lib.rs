//! Core types for triage response classification.
//!
//! This crate provides the transport-agnostic pieces:
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`RawResponse`] - unread HTTP response with a single-read body
//! - [`Error`] and [`Result`] - the closed failure taxonomy
//! - [`Transport`] - trait a concrete HTTP client implements
//! - [`fetch_json`] and [`Payload`] - the response classifier and its
//!   success outcome
//!
//! # Example
//!
//! ```ignore
//! use triage_core::TransportExt;
//!
//! let payload = transport.get_json("https://api.example.com/styles/1").await?;
//! let style: Style = payload.decode()?;
//! ```

mod classify;
pub mod codec;
mod error;
pub mod prelude;
mod request;
mod response;
mod transport;

pub use classify::{Payload, fetch_json};
pub use codec::{from_json, to_form, to_json};
pub use error::{BoxError, Error, Result};
pub use request::{Request, RequestBuilder};
pub use response::{BodyStream, RawResponse};
pub use transport::{Transport, TransportExt};

// Re-export http crate types for methods, status codes, and headers
pub use http::{Method, StatusCode, header};
