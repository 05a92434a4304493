//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use triage::prelude::*;
//! ```

pub use crate::{
    ClientConfig, Error, HyperClient, Method, Payload, RawResponse, Request, RequestBuilder,
    Result, StatusCode, Transport, TransportExt, fetch_json, from_json, header, to_form, to_json,
};
pub use serde::{Deserialize, Serialize};
