//! Response classification.
//!
//! [`fetch_json`] wraps one transport call: it reads the body exactly once,
//! splits on the status class, sniffs infrastructure HTML error pages apart
//! from application JSON errors, and re-wraps every failure mode into the
//! closed [`crate::Error`] taxonomy with the original cause kept.
//!
//! Each invocation is stateless and independent; there are no retries and no
//! timeout at this layer. Logging along the way is advisory only and never
//! alters the outcome.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{Error, Request, Result, Transport};

/// Exact prefix marking an infrastructure HTML error page.
///
/// Deliberately narrow: lowercase doctypes, XHTML doctypes, or doctype-less
/// HTML fall through to the JSON-parse branch instead. Broadening this match
/// would silently reclassify such bodies, so it stays byte-exact.
const HTML_DOCTYPE_PREFIX: &str = "<!DOCTYPE html>";

/// How much body text to include in log output.
const BODY_PREVIEW_CHARS: usize = 500;

/// A successfully classified JSON payload.
///
/// Holds the value parsed from the single body read. [`Payload::json`]
/// returns that same value without re-parsing or re-reading anything, so
/// callers written against a response-shaped interface can keep calling
/// their usual "give me the JSON" accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    value: Value,
}

impl Payload {
    pub(crate) const fn new(value: Value) -> Self {
        Self { value }
    }

    /// The parsed JSON value, already resolved.
    #[must_use]
    pub const fn json(&self) -> &Value {
        &self.value
    }

    /// Consume into the parsed JSON value.
    #[must_use]
    pub fn into_json(self) -> Value {
        self.value
    }

    /// Decode the payload into a typed value with path-aware errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonDeserialization`] if the payload does not match
    /// `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        crate::codec::decode_value(&self.value)
    }
}

/// Executes `request` over `transport` and classifies the outcome.
///
/// The algorithm, in order:
///
/// 1. Send the request. A transport failure before a response arrives is
///    already [`Error::Network`] and propagates untouched.
/// 2. Buffer the whole body into text, exactly once. Everything below
///    inspects this buffer, never the stream.
/// 3. Non-2xx status: a body starting with `<!DOCTYPE html>` (trimmed,
///    case-sensitive) is [`Error::UnexpectedHtml`]; a body that is not valid
///    JSON is [`Error::MalformedErrorBody`]; valid JSON is [`Error::Api`]
///    with the payload's `message` field (or "unknown error") and the full
///    parsed payload attached.
/// 4. 2xx status: a body that is not valid JSON is
///    [`Error::InvalidSuccessBody`]; otherwise the parsed [`Payload`] is
///    returned.
///
/// # Errors
///
/// One of the classified variants above, or [`Error::BodyReused`] if the
/// body stream was consumed out of band before this call buffered it.
pub async fn fetch_json<T: Transport>(transport: &T, request: Request) -> Result<Payload> {
    let url = request.url().to_string();
    let method = request.method().clone();
    debug!(%method, %url, "sending request");

    let mut response = transport.send(request).await.inspect_err(|error| {
        warn!(%method, %url, %error, "transport failed before a response arrived");
    })?;

    let status = response.status();
    let status_text = response.status_text().to_string();
    let success = response.is_success();
    let text = response.text().await?;
    debug!(
        %url,
        status,
        body_preview = preview(&text),
        "response received"
    );

    if !success {
        return Err(classify_failure(&url, status, status_text, text));
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => {
            debug!(%url, status, "parsed JSON payload");
            Ok(Payload::new(value))
        }
        Err(source) => {
            warn!(
                %url,
                status,
                body_preview = preview(&text),
                "2xx response with a non-JSON body"
            );
            Err(Error::InvalidSuccessBody { body: text, source })
        }
    }
}

/// Classify a non-2xx response from its buffered body text.
fn classify_failure(url: &str, status: u16, status_text: String, body: String) -> Error {
    if body.trim().starts_with(HTML_DOCTYPE_PREFIX) {
        warn!(
            url,
            status,
            body_preview = preview(&body),
            "received an HTML error page instead of JSON"
        );
        return Error::UnexpectedHtml {
            status,
            status_text,
            body,
        };
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(payload) => {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            warn!(url, status, %message, "API returned a structured error");
            Error::Api {
                status,
                message,
                payload,
            }
        }
        Err(_) => {
            warn!(
                url,
                status,
                body_preview = preview(&body),
                "error body is not valid JSON"
            );
            Error::MalformedErrorBody {
                status,
                status_text,
                body,
            }
        }
    }
}

/// Char-boundary-safe truncation for log output.
fn preview(text: &str) -> &str {
    match text.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((index, _)) => text.get(..index).unwrap_or(text),
        None => text,
    }
}
