//! Error types for Wrike and Webex API operations.

use thiserror::Error;

/// Errors during Wrike or Webex API operations.
///
/// These errors represent failures when communicating with either platform,
/// including HTTP error statuses, transport failures and unparseable bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP error response from the platform.
    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    /// The requested resource was not found.
    #[error("Resource not found")]
    NotFound,

    /// The bearer token was rejected.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The bearer token lacks access to the resource.
    #[error("Authorization failed")]
    AuthorizationFailed,

    /// Request to the platform timed out.
    #[error("Request timeout")]
    Timeout,

    /// The response body could not be parsed.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// HTTP client error (network, TLS, etc.).
    #[error("HTTP client error: {0}")]
    HttpClientError(#[source] reqwest::Error),

    /// The request was refused before being sent.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The HTTP client could not be constructed.
    #[error("Client configuration error: {message}")]
    Configuration { message: String },
}

impl ApiError {
    /// Check if this error represents a transient condition that may succeed if retried.
    ///
    /// The relay itself never retries; the classification picks the log level
    /// of a failed event.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpError { status, .. } => Self::is_transient_status(*status),
            Self::NotFound => false,
            Self::AuthenticationFailed => false,
            Self::AuthorizationFailed => false,
            Self::Timeout => true,
            Self::InvalidResponse { .. } => false,
            Self::InvalidRequest { .. } => false,
            Self::HttpClientError(_) => true,
            Self::Configuration { .. } => false,
        }
    }

    /// Server errors and rate limiting.
    pub fn is_transient_status(status: u16) -> bool {
        status >= 500 || status == 429
    }

    /// HTTP status carried by the error, if the platform answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            Self::NotFound => Some(404),
            Self::AuthenticationFailed => Some(401),
            Self::AuthorizationFailed => Some(403),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::InvalidResponse {
                message: error.to_string(),
            }
        } else {
            Self::HttpClientError(error)
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
