//! [`TaskSource`] backed by the Wrike REST client.

use async_trait::async_trait;
use wrike_relay_sdk::wrike::{CustomFieldDefinition, Task, WrikeClient, Workflow};
use wrike_relay_sdk::ApiError;

use crate::source::TaskSource;
use crate::TaskId;

#[async_trait]
impl TaskSource for WrikeClient {
    async fn fetch_task(&self, task_id: &TaskId) -> Result<Option<Task>, ApiError> {
        self.get_task(task_id.as_str()).await
    }

    async fn fetch_workflows(&self, custom_status_id: &str) -> Result<Vec<Workflow>, ApiError> {
        self.get_workflows(custom_status_id).await
    }

    async fn fetch_contact_names(&self, contact_ids: &[String]) -> Result<Vec<String>, ApiError> {
        let contacts = self.get_contacts(contact_ids).await?;
        Ok(contacts.iter().map(|contact| contact.display_name()).collect())
    }

    async fn list_custom_fields(&self) -> Result<Vec<CustomFieldDefinition>, ApiError> {
        WrikeClient::list_custom_fields(self).await
    }

    async fn list_workflows(&self) -> Result<Vec<Workflow>, ApiError> {
        WrikeClient::list_workflows(self).await
    }
}

#[cfg(test)]
#[path = "wrike_tests.rs"]
mod tests;
