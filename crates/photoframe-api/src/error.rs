//! Error types for backend requests.
//!
//! # Design
//! - Constant display strings; context lives in fields.
//! - `message()` renders the single human-readable line consumers surface.

use thiserror::Error;

/// Convenience alias for API wrapper results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures raised while configuring or calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed.
    #[error("invalid API base URL")]
    InvalidBaseUrl {
        /// Raw value that failed to parse.
        value: String,
        /// Underlying URL parse error.
        source: url::ParseError,
    },
    /// A default header value contained invalid characters.
    #[error("invalid header value")]
    InvalidHeader {
        /// Header name the value was destined for.
        name: &'static str,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    ClientBuild {
        /// Source reqwest error.
        source: reqwest::Error,
    },
    /// The request never produced a response.
    #[error("http request failed")]
    Transport {
        /// Operation identifier.
        operation: &'static str,
        /// URL used for the request.
        url: String,
        /// Source reqwest error.
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status.
    #[error("http response status error")]
    Status {
        /// Operation identifier.
        operation: &'static str,
        /// URL used for the request.
        url: String,
        /// HTTP status code returned by the backend.
        status: u16,
    },
    /// The response body was not the expected JSON.
    #[error("failed to decode response body")]
    Decode {
        /// Operation identifier.
        operation: &'static str,
        /// URL used for the request.
        url: String,
        /// Source JSON error.
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Human-readable description including the underlying cause.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidBaseUrl { value, source } => {
                format!("invalid API base URL '{value}': {source}")
            }
            Self::InvalidHeader { name } => format!("invalid value for header {name}"),
            Self::ClientBuild { source } => format!("failed to build HTTP client: {source}"),
            Self::Transport { url, source, .. } => format!("request to {url} failed: {source}"),
            Self::Status { status, .. } => format!("request failed with status code {status}"),
            Self::Decode { url, source, .. } => {
                format!("invalid response body from {url}: {source}")
            }
        }
    }

    /// HTTP status carried by the error, when the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
