//! The relay pipeline for a single event.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};
use wrike_relay_sdk::wrike::Task;

use crate::assignees::resolve_assignees;
use crate::event::{validate_task_id, TaskEvent};
use crate::fields::{resolve_fields, resolve_item_type};
use crate::message::TaskNotification;
use crate::routing::route;
use crate::settings::RelaySettings;
use crate::source::{Notifier, TaskSource};
use crate::status::resolve_status;
use crate::{LookupError, RelayError, RoomId, TaskId};

/// Result of relaying one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelayOutcome {
    /// Exactly one message was posted.
    Delivered { task_id: TaskId, room_id: RoomId },

    /// None of the task's parent folders maps to a room; nothing was posted.
    NoRoute {
        task_id: TaskId,
        parent_ids: Vec<String>,
    },
}

/// Relays one webhook event to its destination.
#[async_trait]
pub trait EventRelay: Send + Sync {
    async fn relay(&self, event: &TaskEvent) -> Result<RelayOutcome, RelayError>;
}

/// Default [`EventRelay`]: Wrike lookup, enrichment, Webex post.
///
/// Events built outside [`extract_first_event`](crate::event::extract_first_event)
/// are checked again; a malformed task id fails with `RelayError::Validation`
/// before any upstream call.
///
/// Calls are sequential. Routing happens right after the task fetch so an
/// unrouted event costs a single upstream request.
pub struct TaskRelay {
    source: Arc<dyn TaskSource>,
    notifier: Arc<dyn Notifier>,
    settings: Arc<RelaySettings>,
}

impl TaskRelay {
    pub fn new(
        source: Arc<dyn TaskSource>,
        notifier: Arc<dyn Notifier>,
        settings: Arc<RelaySettings>,
    ) -> Self {
        Self {
            source,
            notifier,
            settings,
        }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    async fn fetch_task(&self, task_id: &TaskId) -> Result<Task, LookupError> {
        match self.source.fetch_task(task_id).await {
            Ok(Some(task)) => Ok(task),
            Ok(None) => Err(LookupError::TaskNotFound {
                task_id: task_id.clone(),
            }),
            Err(source) => Err(LookupError::Api {
                task_id: task_id.clone(),
                source,
            }),
        }
    }

    /// Resolve every displayed value of a routed task.
    pub async fn build_notification(&self, task: &Task, event: &TaskEvent) -> TaskNotification {
        let settings = &self.settings;

        let status = resolve_status(task, &settings.catalogs.statuses, self.source.as_ref()).await;
        let fields = resolve_fields(
            task,
            &settings.fields,
            &settings.catalogs.custom_fields,
            settings.vocabulary,
        );
        let item_type = resolve_item_type(task, &settings.item_types);
        let assignees = resolve_assignees(&task.responsible_ids, self.source.as_ref()).await;

        debug!(
            task_id = %task.id,
            status = ?status,
            priority = ?fields.priority,
            technology = ?fields.technology,
            type_field = ?fields.item_type,
            item_type = ?item_type,
            "Resolved notification fields"
        );

        TaskNotification {
            task_id: task.id.clone(),
            item_type: item_type.display(),
            event_type: event.event_type.clone(),
            title: task.title.clone(),
            status: status.display(),
            priority: fields.priority.display_priority(settings.vocabulary),
            assignees: assignees.display(),
            technology: fields.technology.display(),
            type_label: fields.item_type.display(),
            permalink: task.permalink.clone(),
        }
    }
}

#[async_trait]
impl EventRelay for TaskRelay {
    #[instrument(skip(self, event), fields(task_id = %event.task_id, event_type = ?event.event_type))]
    async fn relay(&self, event: &TaskEvent) -> Result<RelayOutcome, RelayError> {
        validate_task_id(event.task_id.as_str())?;
        let task = self.fetch_task(&event.task_id).await?;

        let Some((folder_id, room_id)) = route(&task.parent_ids, &self.settings.rooms) else {
            info!(parent_ids = ?task.parent_ids, "No room mapped for task folders");
            return Ok(RelayOutcome::NoRoute {
                task_id: event.task_id.clone(),
                parent_ids: task.parent_ids,
            });
        };

        let notification = self.build_notification(&task, event).await;
        let markdown = notification.render();

        self.notifier.post_message(&room_id, &markdown).await?;

        info!(
            folder_id = %folder_id,
            room_id = %room_id,
            "Notification delivered"
        );

        Ok(RelayOutcome::Delivered {
            task_id: event.task_id.clone(),
            room_id,
        })
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
