//! End-to-end tests for requests answered without relaying: verification
//! handshakes and malformed payloads.

mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::*;
use tower::ServiceExt;

// ============================================================================
// Handshakes
// ============================================================================

/// The request token is echoed as the body and no upstream is contacted.
#[tokio::test]
async fn test_request_token_handshake_is_echoed() {
    let upstreams = Upstreams::start().await;
    let app = create_default_app(&upstreams).await;

    let request = Request::builder()
        .method("POST")
        .uri("/wrike-webhook")
        .header("x-request-token", "token-from-wrike")
        .body(Body::from(event_payload("TASK_1", "TaskCreated")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"token-from-wrike".to_vec());
    assert_eq!(upstreams.outbound_calls().await, 0);
}

/// The hook secret comes back as a response header.
#[tokio::test]
async fn test_hook_secret_handshake_is_echoed() {
    let upstreams = Upstreams::start().await;
    let app = create_default_app(&upstreams).await;

    let request = Request::builder()
        .method("POST")
        .uri("/wrike-webhook")
        .header("x-hook-secret", "secret-from-wrike")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-hook-secret"], "secret-from-wrike");
    assert_eq!(upstreams.outbound_calls().await, 0);
}

// ============================================================================
// Malformed payloads
// ============================================================================

/// Malformed bodies are rejected with 400 before any upstream call.
#[tokio::test]
async fn test_malformed_payloads_make_no_outbound_calls() {
    let cases = [
        "",
        "   ",
        "not json",
        "[]",
        "{}",
        r#"{"data": []}"#,
        r#"[{"eventType":"TaskCreated"}]"#,
        r#"[{"taskId":""}]"#,
        r#"[{"taskId":"../folders/FOLDER_ROUTED"}]"#,
        r#"[{"taskId":"TASK_1/../../contacts"}]"#,
        r#""TASK_1""#,
    ];

    for body in cases {
        let upstreams = Upstreams::start().await;
        upstreams.mount_webex(200).await;
        let (app, metrics) = create_app(upstreams.environment()).await;

        let response = app.oneshot(webhook_request(body)).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body {:?} should be rejected",
            body
        );
        assert_eq!(upstreams.outbound_calls().await, 0, "body {:?}", body);
        assert_eq!(metrics.invalid_payloads_total.get(), 1);
    }
}

/// The wrapped `{"data": [...]}` shape is accepted.
#[tokio::test]
async fn test_wrapped_payload_is_accepted() {
    let upstreams = Upstreams::start().await;
    upstreams.mount_task(routed_task("TASK_W")).await;
    upstreams.mount_webex(200).await;
    let app = create_default_app(&upstreams).await;

    let response = app
        .oneshot(webhook_request(r#"{"data":[{"taskId":"TASK_W"}]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstreams.posted_messages().await.len(), 1);
}

// ============================================================================
// Service endpoints
// ============================================================================

/// Health reports the number of routed folders from configuration.
#[tokio::test]
async fn test_health_reports_configured_folders() {
    let upstreams = Upstreams::start().await;
    let mut environment = upstreams.environment();
    environment.insert(
        "FOLDER_TO_ROOM_MAP".to_string(),
        "F1:R1, F2:R2, broken".to_string(),
    );
    let (app, _) = create_app(environment).await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["routed_folders"], 2);
}
