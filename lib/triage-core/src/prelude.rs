//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use triage_core::prelude::*;
//! ```

pub use crate::{
    BodyStream, Error, Method, Payload, RawResponse, Request, RequestBuilder, Result, Transport,
    TransportExt, fetch_json, from_json, to_form, to_json,
};
