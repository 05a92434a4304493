//! Error types for triage.
//!
//! [`Error`] is the closed taxonomy produced by response classification, plus
//! the request-building errors that pass through it unchanged. Every
//! classified variant keeps its original cause: the transport error, the raw
//! body text, or the parsed error payload.

use derive_more::{Display, From};

/// Boxed error type used for transport-level causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for triage operations.
#[derive(Debug, Display, From)]
pub enum Error {
    /// Transport-level failure before a response was fully received.
    ///
    /// Covers connection refusal, DNS and TLS failures, timeouts, and
    /// connection resets while the body was still streaming.
    #[display("network error: {source}")]
    #[from(skip)]
    Network {
        /// The underlying transport error.
        source: BoxError,
    },

    /// The response body stream was read a second time.
    ///
    /// The classifier buffers the body exactly once, so this is only
    /// reachable when a caller consumes the stream out of band.
    #[display("response body already consumed: {detail}")]
    #[from(skip)]
    BodyReused {
        /// What consumed the body first.
        detail: String,
    },

    /// Non-2xx response carrying an HTML error page instead of JSON.
    ///
    /// Typically a reverse proxy or load balancer answering in place of the
    /// application.
    #[display("HTTP error {status} {status_text}: unexpected HTML response")]
    #[from(skip)]
    UnexpectedHtml {
        /// HTTP status code.
        status: u16,
        /// HTTP status text.
        status_text: String,
        /// Raw body text, kept for diagnostics.
        body: String,
    },

    /// Non-2xx response whose body is not valid JSON.
    #[display("HTTP error {status} {status_text}: invalid response format")]
    #[from(skip)]
    MalformedErrorBody {
        /// HTTP status code.
        status: u16,
        /// HTTP status text.
        status_text: String,
        /// Raw body text, kept for diagnostics.
        body: String,
    },

    /// Non-2xx response with a structured JSON error payload.
    #[display("API error {status}: {message}")]
    #[from(skip)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the payload's `message` field.
        message: String,
        /// The full parsed error payload.
        payload: serde_json::Value,
    },

    /// 2xx response whose body is not valid JSON.
    #[display("invalid JSON in successful response: {source}")]
    #[from(skip)]
    InvalidSuccessBody {
        /// Raw body text, kept for diagnostics.
        body: String,
        /// The JSON parse failure.
        source: serde_json::Error,
    },

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(String),

    /// JSON serialization error (request bodies).
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "style.images.0.url").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network { source } => Some(source.as_ref()),
            Self::InvalidSuccessBody { source, .. } | Self::JsonSerialization(source) => {
                Some(source)
            }
            Self::FormSerialization(source) => Some(source),
            Self::InvalidUrl(source) => Some(source),
            _ => None,
        }
    }
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a network error from any transport-level cause.
    #[must_use]
    pub fn network(source: impl Into<BoxError>) -> Self {
        Self::Network {
            source: source.into(),
        }
    }

    /// Create a body-reuse error.
    #[must_use]
    pub fn body_reused(detail: impl Into<String>) -> Self {
        Self::BodyReused {
            detail: detail.into(),
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a transport-level network error.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns `true` if the response body was consumed twice.
    #[must_use]
    pub const fn is_body_reused(&self) -> bool {
        matches!(self, Self::BodyReused { .. })
    }

    /// Returns `true` if this is a structured API error.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedHtml { status, .. }
            | Self::MalformedErrorBody { status, .. }
            | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the raw body text carried as a diagnostic cause, if any.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        match self {
            Self::UnexpectedHtml { body, .. }
            | Self::MalformedErrorBody { body, .. }
            | Self::InvalidSuccessBody { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns the parsed error payload if this is an [`Error::Api`].
    #[must_use]
    pub const fn api_payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Try to decode the API error payload into a typed value.
    ///
    /// Returns `None` if this is not an [`Error::Api`].
    pub fn decode_payload<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.api_payload().map(crate::codec::decode_value)
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn error_display() {
        let err = Error::Api {
            status: 404,
            message: "not found".to_string(),
            payload: serde_json::json!({"message": "not found"}),
        };
        check!(err.to_string() == "API error 404: not found");

        let err = Error::UnexpectedHtml {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "<!DOCTYPE html>".to_string(),
        };
        check!(
            err.to_string() == "HTTP error 500 Internal Server Error: unexpected HTML response"
        );

        let err = Error::body_reused("body stream taken by an earlier read");
        check!(
            err.to_string()
                == "response body already consumed: body stream taken by an earlier read"
        );
    }

    #[test]
    fn error_status() {
        let err = Error::Api {
            status: 404,
            message: "not found".to_string(),
            payload: serde_json::Value::Null,
        };
        check!(err.status() == Some(404));
        check!(err.is_client_error());
        check!(err.is_not_found());
        check!(!err.is_server_error());

        let err = Error::MalformedErrorBody {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: "upstream went away".to_string(),
        };
        check!(err.status() == Some(502));
        check!(err.is_server_error());

        let err = Error::network(std::io::Error::other("boom"));
        check!(err.status().is_none());
        check!(!err.is_client_error());
    }

    #[test]
    fn network_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = Error::network(cause);

        check!(err.is_network());
        let source = std::error::Error::source(&err).expect("source");
        check!(source.to_string().contains("reset by peer"));
    }

    #[test]
    fn error_body_text() {
        let err = Error::MalformedErrorBody {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "oops".to_string(),
        };
        check!(err.body_text() == Some("oops"));

        check!(Error::invalid_request("no").body_text().is_none());
    }

    #[test]
    fn error_decode_payload() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct ApiError {
            message: String,
        }

        let err = Error::Api {
            status: 404,
            message: "not found".to_string(),
            payload: serde_json::json!({"message": "not found"}),
        };

        let decoded: ApiError = err.decode_payload().expect("api error").expect("decodes");
        check!(
            decoded
                == ApiError {
                    message: "not found".to_string()
                }
        );

        check!(
            Error::invalid_request("no")
                .decode_payload::<ApiError>()
                .is_none()
        );
    }
}
