//! Recording test doubles for [`TaskSource`] and [`Notifier`].

use std::sync::Mutex;

use async_trait::async_trait;
use wrike_relay_sdk::wrike::{CustomFieldDefinition, Task, Workflow};
use wrike_relay_sdk::ApiError;

use crate::source::{Notifier, TaskSource};
use crate::{DeliveryError, RoomId, TaskId};

fn http_error(status: u16) -> ApiError {
    ApiError::HttpError {
        status,
        message: format!("stubbed failure {}", status),
    }
}

/// Canned Wrike answers. A `u16` error is turned into `ApiError::HttpError`.
#[derive(Default)]
pub(crate) struct StubSource {
    task: Option<Result<Option<Task>, u16>>,
    workflows: Option<Result<Vec<Workflow>, u16>>,
    contacts: Option<Result<Vec<String>, u16>>,
    custom_fields: Option<Result<Vec<CustomFieldDefinition>, u16>>,
    all_workflows: Option<Result<Vec<Workflow>, u16>>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubSource {
    pub fn with_task(mut self, task: Task) -> Self {
        self.task = Some(Ok(Some(task)));
        self
    }

    pub fn with_no_task(mut self) -> Self {
        self.task = Some(Ok(None));
        self
    }

    pub fn failing_task(mut self, status: u16) -> Self {
        self.task = Some(Err(status));
        self
    }

    pub fn with_workflows(mut self, workflows: Vec<Workflow>) -> Self {
        self.workflows = Some(Ok(workflows));
        self
    }

    pub fn failing_workflows(mut self, status: u16) -> Self {
        self.workflows = Some(Err(status));
        self
    }

    pub fn with_contacts(mut self, names: &[&str]) -> Self {
        self.contacts = Some(Ok(names.iter().map(|n| n.to_string()).collect()));
        self
    }

    pub fn failing_contacts(mut self, status: u16) -> Self {
        self.contacts = Some(Err(status));
        self
    }

    pub fn with_custom_fields(mut self, definitions: Vec<CustomFieldDefinition>) -> Self {
        self.custom_fields = Some(Ok(definitions));
        self
    }

    pub fn failing_custom_fields(mut self, status: u16) -> Self {
        self.custom_fields = Some(Err(status));
        self
    }

    pub fn with_all_workflows(mut self, workflows: Vec<Workflow>) -> Self {
        self.all_workflows = Some(Ok(workflows));
        self
    }

    pub fn failing_all_workflows(mut self, status: u16) -> Self {
        self.all_workflows = Some(Err(status));
        self
    }

    /// Names of the trait methods called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

fn reply<T: Clone>(canned: &Option<Result<T, u16>>, default: T) -> Result<T, ApiError> {
    match canned {
        Some(Ok(value)) => Ok(value.clone()),
        Some(Err(status)) => Err(http_error(*status)),
        None => Ok(default),
    }
}

#[async_trait]
impl TaskSource for StubSource {
    async fn fetch_task(&self, task_id: &TaskId) -> Result<Option<Task>, ApiError> {
        self.record(format!("fetch_task:{}", task_id));
        reply(&self.task, None)
    }

    async fn fetch_workflows(&self, custom_status_id: &str) -> Result<Vec<Workflow>, ApiError> {
        self.record(format!("fetch_workflows:{}", custom_status_id));
        reply(&self.workflows, Vec::new())
    }

    async fn fetch_contact_names(&self, contact_ids: &[String]) -> Result<Vec<String>, ApiError> {
        self.record(format!("fetch_contact_names:{}", contact_ids.join(",")));
        reply(&self.contacts, Vec::new())
    }

    async fn list_custom_fields(&self) -> Result<Vec<CustomFieldDefinition>, ApiError> {
        self.record("list_custom_fields");
        reply(&self.custom_fields, Vec::new())
    }

    async fn list_workflows(&self) -> Result<Vec<Workflow>, ApiError> {
        self.record("list_workflows");
        reply(&self.all_workflows, Vec::new())
    }
}

/// Records every posted message; optionally fails with a status.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    fail_with: Option<u16>,
    posted: Mutex<Vec<(RoomId, String)>>,
}

impl RecordingNotifier {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn posted(&self) -> Vec<(RoomId, String)> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn post_message(&self, room_id: &RoomId, markdown: &str) -> Result<(), DeliveryError> {
        self.posted
            .lock()
            .unwrap()
            .push((room_id.clone(), markdown.to_string()));

        match self.fail_with {
            Some(status) => Err(DeliveryError::Rejected {
                room_id: room_id.clone(),
                status,
                message: "stubbed rejection".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A task with the given parents and nothing else.
pub(crate) fn bare_task(id: &str, parent_ids: &[&str]) -> Task {
    Task {
        id: id.to_string(),
        title: None,
        status: None,
        importance: None,
        custom_status_id: None,
        parent_ids: parent_ids.iter().map(|p| p.to_string()).collect(),
        responsible_ids: Vec::new(),
        custom_fields: Vec::new(),
        metadata: Vec::new(),
        permalink: None,
    }
}
