//! Error types for geocoding lookups

use footprint_core::ErrorCode;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for geocoding operations
pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// Structural failures of the geocoding collaborator.
///
/// A place that simply has no match is not an error; lookups return
/// `Ok(None)` for that.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Geocoding service error ({status}): {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response could not be understood
    #[error("Malformed geocoding response: {0}")]
    MalformedResponse(String),

    /// Request timeout
    #[error("Geocoding request timed out after {0:?}")]
    Timeout(Duration),

    /// The client-side throttle would have waited longer than the timeout
    #[error("Geocoding throttled, retry in {retry_after:?}")]
    Throttled {
        /// Time until a request would be allowed
        retry_after: Duration,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeocodeError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP status error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Check if resubmitting later could plausibly succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout(_) | Self::Throttled { .. } => true,
            Self::MalformedResponse(_) | Self::Config(_) => false,
        }
    }

    /// Map onto the shared error code table
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout(_) => ErrorCode::LookupTimeout,
            Self::Throttled { .. } => ErrorCode::LookupThrottled,
            Self::Config(_) => ErrorCode::ConfigValidationError,
            Self::Request(_) | Self::Http { .. } | Self::MalformedResponse(_) => {
                ErrorCode::LookupFailed
            }
        }
    }
}

impl From<serde_json::Error> for GeocodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<footprint_core::Error> for GeocodeError {
    fn from(err: footprint_core::Error) -> Self {
        Self::Config(err.message)
    }
}
