//! Trait seams for the two platforms.
//!
//! The pipeline talks to Wrike through [`TaskSource`] and to Webex through
//! [`Notifier`]. Production implementations are in [`crate::adapters`]; tests
//! substitute recording doubles.

use async_trait::async_trait;
use wrike_relay_sdk::wrike::{CustomFieldDefinition, Task, Workflow};
use wrike_relay_sdk::ApiError;

use crate::{DeliveryError, RoomId, TaskId};

/// Read access to the task platform.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetch a task. `Ok(None)` when the platform returns no task for the id.
    async fn fetch_task(&self, task_id: &TaskId) -> Result<Option<Task>, ApiError>;

    /// Secondary status lookup keyed on a task's custom status id.
    async fn fetch_workflows(&self, custom_status_id: &str) -> Result<Vec<Workflow>, ApiError>;

    /// Display names for a batch of contacts, fetched in one call.
    async fn fetch_contact_names(&self, contact_ids: &[String]) -> Result<Vec<String>, ApiError>;

    /// Every custom field definition; used once at start-up.
    async fn list_custom_fields(&self) -> Result<Vec<CustomFieldDefinition>, ApiError>;

    /// Every workflow with its statuses; used once at start-up.
    async fn list_workflows(&self) -> Result<Vec<Workflow>, ApiError>;
}

/// Write access to the chat platform.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post a markdown message into a room.
    async fn post_message(&self, room_id: &RoomId, markdown: &str) -> Result<(), DeliveryError>;
}
