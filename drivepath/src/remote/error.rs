//! Remote failure type.

use serde::Deserialize;
use thiserror::Error;

/// Result type for remote primitives.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// A failure reported by the remote store.
///
/// # Examples
///
/// ```
/// use drivepath::remote::RemoteError;
///
/// let body = r#"{"error": {"code": 404, "message": "File not found: .",
///     "errors": [{"domain": "global", "reason": "notFound", "message": "File not found: ."}]}}"#;
/// let err = RemoteError::from_json(404, body);
/// assert_eq!(err.status, 404);
/// assert_eq!(err.reason.as_deref(), Some("notFound"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct RemoteError {
    /// Numeric status code.
    pub status: u16,
    /// Structured message from the store.
    pub message: String,
    /// Machine-readable reason of the first detail entry.
    pub reason: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    error: Payload,
}

#[derive(Deserialize)]
struct Payload {
    code: Option<u16>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<Detail>,
}

#[derive(Deserialize)]
struct Detail {
    reason: Option<String>,
}

impl RemoteError {
    /// A failure with `status` and `message`.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            reason: None,
        }
    }

    /// Attach a reason code.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Parse an error response body.
    ///
    /// The code inside the payload wins over the transport status. A body
    /// that is not a structured error keeps `status` and uses the raw body as
    /// the message.
    #[must_use]
    pub fn from_json(status: u16, body: &str) -> Self {
        match serde_json::from_str::<Envelope>(body) {
            Ok(Envelope { error }) => Self {
                status: error.code.unwrap_or(status),
                message: error.message,
                reason: error.errors.into_iter().find_map(|d| d.reason),
            },
            Err(_) => Self::new(status, body.trim()),
        }
    }
}
