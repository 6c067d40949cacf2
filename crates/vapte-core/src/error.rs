//! Flow-level error types shared across the client.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of flow errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowErrorKind {
    /// Missing required input, detected before any request is sent
    Validation,
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Success status but the response body was malformed or incomplete
    Parse,
    /// The request could not complete (connect failure, timeout, etc.)
    Transport,
}

impl fmt::Display for FlowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowErrorKind::Validation => write!(f, "validation"),
            FlowErrorKind::HttpStatus => write!(f, "http_status"),
            FlowErrorKind::Parse => write!(f, "parse"),
            FlowErrorKind::Transport => write!(f, "transport"),
        }
    }
}

/// Structured error from a flow with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowError {
    /// Error category
    pub kind: FlowErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw response body)
    pub details: Option<String>,
}

impl FlowError {
    /// Creates a new flow error.
    pub fn new(kind: FlowErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error (no request was sent).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::Validation, message)
    }

    /// Creates an HTTP status error.
    ///
    /// The server reports rejections as a JSON object with a `detail`
    /// field; when one is present it is lifted into the message and the
    /// raw body is kept as details.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {status}");
        let details = if body.is_empty() {
            None
        } else {
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(detail) = json.get("detail").and_then(|v| v.as_str())
            {
                return Self {
                    kind: FlowErrorKind::HttpStatus,
                    message: format!("HTTP {status}: {detail}"),
                    details: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            kind: FlowErrorKind::HttpStatus,
            message,
            details,
        }
    }

    /// Creates a parse error (malformed or incomplete response body).
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::Parse, message)
    }

    /// Creates a transport error from a failed request.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::Transport, message)
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FlowError {}

impl From<reqwest::Error> for FlowError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport(format!("request timed out: {err}"))
        } else {
            Self::transport(err.to_string())
        }
    }
}

/// Result type for flow operations.
pub type FlowResult<T> = std::result::Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// http_status lifts a JSON `detail` field into the message.
    #[test]
    fn test_http_status_extracts_detail() {
        let err = FlowError::http_status(400, r#"{"detail": "Username already taken."}"#);
        assert_eq!(err.kind, FlowErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 400: Username already taken.");
        assert!(err.details.unwrap().contains("Username already taken."));
    }

    /// http_status keeps non-JSON bodies as details only.
    #[test]
    fn test_http_status_plain_body() {
        let err = FlowError::http_status(502, "Bad Gateway");
        assert_eq!(err.message, "HTTP 502");
        assert_eq!(err.details.as_deref(), Some("Bad Gateway"));
    }

    /// http_status with an empty body has no details.
    #[test]
    fn test_http_status_empty_body() {
        let err = FlowError::http_status(500, "");
        assert_eq!(err.message, "HTTP 500");
        assert!(err.details.is_none());
    }

    /// A JSON body without `detail` does not change the message.
    #[test]
    fn test_http_status_json_without_detail() {
        let err = FlowError::http_status(400, r#"{"username": ["This field is required."]}"#);
        assert_eq!(err.message, "HTTP 400");
        assert!(err.details.is_some());
    }

    /// Display shows the one-line message.
    #[test]
    fn test_display_uses_message() {
        let err = FlowError::parse("Invalid response from server.");
        assert_eq!(err.to_string(), "Invalid response from server.");
    }
}
