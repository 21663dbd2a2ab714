//! Tests for HTTP error mapping.

use super::*;
use wrike_relay_core::{DeliveryError, LookupError, RoomId, TaskId};
use wrike_relay_sdk::ApiError;

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_invalid_payload_maps_to_400() {
    let error = WebhookHandlerError::from(ValidationError::Required {
        field: "taskId".to_string(),
    });

    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("taskId"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_lookup_failure_maps_to_500_without_detail() {
    let error = WebhookHandlerError::from(RelayError::from(LookupError::Api {
        task_id: TaskId::from("T1"),
        source: ApiError::HttpError {
            status: 502,
            message: "upstream body with secrets".to_string(),
        },
    }));

    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["status"], 500);
    assert_eq!(body["error"], "Event could not be relayed (lookup failure)");
}

#[tokio::test]
async fn test_delivery_failure_maps_to_500() {
    let error = WebhookHandlerError::from(RelayError::from(DeliveryError::Rejected {
        room_id: RoomId::from("R1"),
        status: 404,
        message: "room not found".to_string(),
    }));

    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Event could not be relayed (delivery failure)");
}

#[test]
fn test_relay_validation_failure_is_client_error() {
    let error = WebhookHandlerError::from(RelayError::from(ValidationError::Required {
        field: "taskId".to_string(),
    }));

    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transient_lookup_failure_still_maps_to_500() {
    let error = WebhookHandlerError::from(RelayError::from(LookupError::Api {
        task_id: TaskId::from("T1"),
        source: ApiError::Timeout,
    }));

    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Event could not be relayed (lookup failure)");
}

#[test]
fn test_service_error_exit_codes() {
    let bind = ServiceError::BindFailed {
        address: "0.0.0.0:3000".to_string(),
        message: "in use".to_string(),
    };
    let server = ServiceError::ServerFailed {
        message: "boom".to_string(),
    };
    let config = ServiceError::from(ConfigError::Missing {
        key: "BOT_TOKEN".to_string(),
    });

    assert_eq!(bind.exit_code(), 1);
    assert_eq!(server.exit_code(), 2);
    assert_eq!(config.exit_code(), 3);
}
