//! Common test utilities for end-to-end relay tests.
//!
//! Every test runs the real router against two wiremock servers standing in
//! for the Wrike and Webex APIs. Configuration goes through the same
//! environment loading path as the service binary.

use axum::{body::Body, http::Request, response::Response, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wrike_relay_api::{build_relay, create_router, AppState, RelayMetrics, ServiceConfig};

pub const BOT_TOKEN: &str = "bot-test-token";
pub const WRIKE_TOKEN: &str = "wrike-test-token";
pub const ROUTED_FOLDER: &str = "FOLDER_ROUTED";
pub const ROOM_ID: &str = "ROOM_ENGINEERING";
pub const PRIORITY_FIELD: &str = "CF_PRIORITY";
pub const TECHNOLOGY_FIELD: &str = "CF_TECHNOLOGY";

// ============================================================================
// Upstream API doubles
// ============================================================================

/// Wiremock servers for both platforms.
pub struct Upstreams {
    pub wrike: MockServer,
    pub webex: MockServer,
}

#[allow(dead_code)]
impl Upstreams {
    pub async fn start() -> Self {
        Self {
            wrike: MockServer::start().await,
            webex: MockServer::start().await,
        }
    }

    /// Environment pointing the relay at these servers, catalogs disabled.
    pub fn environment(&self) -> HashMap<String, String> {
        [
            ("BOT_TOKEN", BOT_TOKEN.to_string()),
            ("WRIKE_TOKEN", WRIKE_TOKEN.to_string()),
            ("WRIKE_API_URL", self.wrike.uri()),
            ("WEBEX_API_URL", self.webex.uri()),
            ("FOLDER_TO_ROOM_MAP", format!("{}:{}", ROUTED_FOLDER, ROOM_ID)),
            ("PRIORITY_FIELD_ID", PRIORITY_FIELD.to_string()),
            ("TECHNOLOGY_FIELD_ID", TECHNOLOGY_FIELD.to_string()),
            ("LOAD_CATALOGS", "false".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    /// Serve a task from `GET /tasks/{id}`.
    pub async fn mount_task(&self, task: Value) {
        let id = task["id"].as_str().unwrap_or_default().to_string();
        Mock::given(method("GET"))
            .and(path(format!("/tasks/{}", id)))
            .and(header("authorization", format!("Bearer {}", WRIKE_TOKEN)))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope("tasks", vec![task])))
            .mount(&self.wrike)
            .await;
    }

    /// Answer `GET /tasks/{id}` with a status code.
    pub async fn fail_task(&self, task_id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/tasks/{}", task_id)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.wrike)
            .await;
    }

    /// Serve contacts for the given comma-joined id list.
    pub async fn mount_contacts(&self, ids: &str, contacts: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(format!("/contacts/{}", ids)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope("contacts", contacts)),
            )
            .mount(&self.wrike)
            .await;
    }

    /// Answer the contacts lookup with a status code.
    pub async fn fail_contacts(&self, ids: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/contacts/{}", ids)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.wrike)
            .await;
    }

    /// Serve a workflow for `GET /workflows/{customStatusId}`.
    pub async fn mount_workflow_lookup(&self, custom_status_id: &str, workflow: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/workflows/{}", custom_status_id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope("workflows", vec![workflow])),
            )
            .mount(&self.wrike)
            .await;
    }

    /// Accept every Webex message with the given status.
    pub async fn mount_webex(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("authorization", format!("Bearer {}", BOT_TOKEN)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"id": "MSG_1"})))
            .mount(&self.webex)
            .await;
    }

    /// JSON bodies of every message posted to Webex.
    pub async fn posted_messages(&self) -> Vec<Value> {
        self.webex
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == "/messages")
            .map(|request| request.body_json::<Value>().unwrap())
            .collect()
    }

    /// Paths of every request the Wrike double received.
    pub async fn wrike_paths(&self) -> Vec<String> {
        self.wrike
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }

    /// Total requests seen by both doubles.
    pub async fn outbound_calls(&self) -> usize {
        let wrike = self.wrike.received_requests().await.unwrap_or_default();
        let webex = self.webex.received_requests().await.unwrap_or_default();
        wrike.len() + webex.len()
    }
}

#[allow(dead_code)]
fn envelope(kind: &str, data: Vec<Value>) -> Value {
    json!({"kind": kind, "data": data})
}

// ============================================================================
// Application setup
// ============================================================================

/// Build the router from environment-style configuration.
#[allow(dead_code)]
pub async fn create_app(environment: HashMap<String, String>) -> (Router, Arc<RelayMetrics>) {
    let config = ServiceConfig::load_with(None, Some(environment)).unwrap();
    config.validate().unwrap();

    let relay = build_relay(&config).await.unwrap();
    let metrics = RelayMetrics::new().unwrap();
    let routed_folders = relay.settings().rooms.len();
    let state = AppState::new(config, relay, metrics.clone(), routed_folders);

    (create_router(state), metrics)
}

/// Build the router for the standard upstream environment.
#[allow(dead_code)]
pub async fn create_default_app(upstreams: &Upstreams) -> Router {
    create_app(upstreams.environment()).await.0
}

// ============================================================================
// Request and payload helpers
// ============================================================================

/// POST a webhook body to the default path.
#[allow(dead_code)]
pub fn webhook_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/wrike-webhook")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// A single-event Wrike batch.
#[allow(dead_code)]
pub fn event_payload(task_id: &str, event_type: &str) -> String {
    json!([{
        "taskId": task_id,
        "eventType": event_type,
        "webhookId": "WH_1",
        "lastUpdatedDate": "2026-01-01T00:00:00Z"
    }])
    .to_string()
}

/// A task in the routed folder with priority and technology values set.
#[allow(dead_code)]
pub fn routed_task(task_id: &str) -> Value {
    json!({
        "id": task_id,
        "title": "Checkout page times out",
        "status": "Active",
        "importance": "High",
        "parentIds": ["FOLDER_OTHER", ROUTED_FOLDER],
        "responsibleIds": [],
        "customFields": [
            {"id": PRIORITY_FIELD, "value": "High"},
            {"id": TECHNOLOGY_FIELD, "value": "Rust"}
        ],
        "permalink": format!("https://www.wrike.com/open.htm?id={}", task_id)
    })
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
