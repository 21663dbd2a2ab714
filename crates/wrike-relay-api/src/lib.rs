//! # Wrike Relay HTTP Service
//!
//! HTTP server receiving Wrike task webhooks and relaying them into Webex
//! rooms through [`wrike_relay_core::EventRelay`].
//!
//! This service provides:
//! - the webhook endpoint, including Wrike's verification handshakes
//! - a health check endpoint
//! - a Prometheus metrics endpoint

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod handshake;
pub mod metrics;

pub use bootstrap::build_relay;
pub use config::{LogFormat, ServiceConfig};
pub use errors::{ConfigError, ServiceError, WebhookHandlerError};
pub use handshake::Handshake;
pub use metrics::RelayMetrics;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn, Level};
use wrike_relay_core::{
    event::extract_first_event, EventRelay, RelayOutcome, RoomId, TaskId, TaskRelay,
};

/// Longest payload excerpt written to the log for a rejected request.
const PAYLOAD_LOG_LIMIT: usize = 512;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: Arc<ServiceConfig>,

    /// Relay pipeline for accepted events
    pub relay: Arc<dyn EventRelay>,

    /// Metrics collector for observability
    pub metrics: Arc<RelayMetrics>,

    /// Number of folders with a destination room, reported by `/health`
    pub routed_folders: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: ServiceConfig,
        relay: Arc<dyn EventRelay>,
        metrics: Arc<RelayMetrics>,
        routed_folders: usize,
    ) -> Self {
        Self {
            config: Arc::new(config),
            relay,
            metrics,
            routed_folders,
        }
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(&state.config.webhook_path, post(handle_webhook))
        .route("/health", get(handle_health_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .into_inner(),
        )
        .with_state(state)
}

/// Start HTTP server
pub async fn start_server(config: ServiceConfig, relay: Arc<TaskRelay>) -> Result<(), ServiceError> {
    let metrics = RelayMetrics::new().map_err(|e| {
        ServiceError::Configuration(ConfigError::Invalid {
            message: format!("Failed to initialize metrics: {}", e),
        })
    })?;

    let address = format!("{}:{}", config.host, config.port);
    let shutdown_timeout = std::time::Duration::from_secs(config.shutdown_timeout_seconds);

    let routed_folders = relay.settings().rooms.len();
    let state = AppState::new(config, relay, metrics, routed_folders);
    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: address.clone(),
                message: e.to_string(),
            })?;

    info!("Starting HTTP server on {}", address);

    // In-flight requests finish before serve() returns.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal(timeout: std::time::Duration) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    info!(signal, timeout_secs = timeout.as_secs(), "Shutting down, draining in-flight requests");
}

// ============================================================================
// Webhook Handler
// ============================================================================

/// Handle Wrike webhook requests
///
/// 1. Answer a verification handshake if one is present (body ignored)
/// 2. Extract the first event of the payload (400 when malformed)
/// 3. Relay it: 200 when delivered, 204 when no room is mapped, 500 on
///    lookup or delivery failure
#[instrument(skip(state, headers, body), fields(body_bytes = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, WebhookHandlerError> {
    let metrics = &state.metrics;
    metrics.webhooks_total.inc();
    let _timer = metrics.webhook_duration_seconds.start_timer();

    if let Some(handshake) = Handshake::detect(&headers) {
        metrics.handshakes_total.inc();
        info!(kind = handshake.kind(), "Answering webhook verification handshake");
        return Ok(handshake.into_response());
    }

    let extracted = extract_first_event(&body).map_err(|e| {
        metrics.invalid_payloads_total.inc();
        warn!(
            error = %e,
            payload = %payload_excerpt(&body),
            "Rejecting malformed webhook payload"
        );
        e
    })?;

    if extracted.dropped > 0 {
        info!(
            dropped = extracted.dropped,
            "Only the first event of the batch is relayed"
        );
    }

    let event = extracted.event;
    info!(
        task_id = %event.task_id,
        event_type = ?event.event_type,
        "Received Wrike event"
    );

    match state.relay.relay(&event).await {
        Ok(RelayOutcome::Delivered { task_id, room_id }) => {
            metrics.notifications_delivered_total.inc();
            Ok(Json(WebhookResponse {
                status: "delivered".to_string(),
                task_id,
                room_id,
            })
            .into_response())
        }
        Ok(RelayOutcome::NoRoute {
            task_id,
            parent_ids,
        }) => {
            metrics.events_unrouted_total.inc();
            info!(task_id = %task_id, parent_ids = ?parent_ids, "Event has no destination room");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        Err(e) => {
            metrics.failures_total.inc();
            Err(WebhookHandlerError::RelayFailed(e))
        }
    }
}

/// Lossy UTF-8 view of the first bytes of a payload.
fn payload_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() <= PAYLOAD_LOG_LIMIT {
        return text.into_owned();
    }
    let mut excerpt: String = text.chars().take(PAYLOAD_LOG_LIMIT).collect();
    excerpt.push_str("...");
    excerpt
}

// ============================================================================
// Health and Observability Handlers
// ============================================================================

/// Basic health check endpoint
#[instrument(skip(state))]
async fn handle_health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        routed_folders: state.routed_folders,
    })
}

/// Prometheus metrics endpoint
#[instrument(skip_all)]
async fn metrics_endpoint(State(state): State<AppState>) -> Result<String, StatusCode> {
    state.metrics.render().map_err(|e| {
        error!(error = %e, "Failed to encode metrics");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

// ============================================================================
// Middleware
// ============================================================================

/// Request logging middleware with correlation ID tracking
///
/// Reuses the caller's `x-correlation-id` or generates one and echoes it in
/// the response headers. Status and duration land on the request span, so the
/// completion line only has to pick its level.
#[instrument(skip(request, next), fields(
    method = %request.method(),
    uri = %request.uri(),
    correlation_id,
    status = tracing::field::Empty,
    duration_ms = tracing::field::Empty
))]
async fn request_logging_middleware(
    mut request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let start = std::time::Instant::now();

    let correlation_id = request
        .headers()
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = tracing::Span::current();
    span.record("correlation_id", correlation_id.as_str());
    request.extensions_mut().insert(correlation_id.clone());

    let mut response = next.run(request).await;

    if let Ok(header_value) = correlation_id.parse() {
        response
            .headers_mut()
            .insert("x-correlation-id", header_value);
    }

    let status = response.status();
    span.record("status", status.as_u16());
    span.record("duration_ms", start.elapsed().as_millis() as u64);

    let level = completion_level(status);
    if level == Level::ERROR {
        error!("Request completed with server error");
    } else if level == Level::WARN {
        warn!("Request completed with client error");
    } else {
        info!("Request completed");
    }

    response
}

/// Log level for a finished request, by status class.
fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Acknowledgement for a delivered event
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
    pub task_id: TaskId,
    pub room_id: RoomId,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub routed_folders: usize,
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
