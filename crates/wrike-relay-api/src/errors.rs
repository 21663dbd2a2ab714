//! Error types for the HTTP service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};
use wrike_relay_core::{RelayError, ValidationError};

/// Webhook handler errors with HTTP status code mapping
///
/// - `400 Bad Request`: the payload is malformed; Wrike should not resend it
/// - `500 Internal Server Error`: the task lookup or the message post failed
///
/// # Security Considerations
///
/// Upstream error detail (response bodies, tokens in URLs) is logged
/// server-side only. Clients receive a short, fixed description.
#[derive(Debug, thiserror::Error)]
pub enum WebhookHandlerError {
    /// Missing, empty or malformed webhook payload
    ///
    /// Maps to: `400 Bad Request`
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] ValidationError),

    /// The relay pipeline failed after the payload was accepted
    ///
    /// Maps to: `500 Internal Server Error`, or `400` for validation failures
    /// raised inside the pipeline.
    #[error("Relay failed: {0}")]
    RelayFailed(#[from] RelayError),
}

impl WebhookHandlerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::RelayFailed(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::RelayFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::InvalidPayload(e) => {
                warn!(error = %e, "Rejected webhook payload");
                self.to_string()
            }
            Self::RelayFailed(e) if e.is_client_error() => {
                warn!(error = %e, "Rejected webhook event");
                e.to_string()
            }
            Self::RelayFailed(e) => {
                if e.is_transient() {
                    warn!(error = %e, category = e.category(), "Upstream temporarily unavailable; event not relayed");
                } else {
                    error!(error = %e, category = e.category(), "Failed to relay webhook event");
                }
                format!("Event could not be relayed ({} failure)", e.category())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        (status, Json(body)).into_response()
    }
}

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl ServiceError {
    /// Process exit code for the service binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BindFailed { .. } => 1,
            Self::ServerFailed { .. } => 2,
            Self::Configuration(_) => 3,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {key}")]
    Missing { key: String },

    #[error("Configuration loading failed: {0}")]
    Loading(#[from] config::ConfigError),
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
