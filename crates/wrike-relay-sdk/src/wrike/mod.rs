//! Wrike v4 API client.
//!
//! Read-only operations used to enrich webhook events. Every response is the
//! standard `{"data": [...]}` envelope; the client unwraps it and hands back
//! the typed items. Ids are percent-encoded so each one stays a single path
//! segment.

mod models;

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use urlencoding::encode;

use crate::auth::BearerToken;
use crate::client::{ensure_success, ClientConfig};
use crate::error::ApiError;

pub use models::{
    Contact, CustomFieldDefinition, CustomFieldValue, CustomStatus, DataEnvelope, MetadataEntry,
    Task, Workflow,
};

/// Wrike API client authenticated with a permanent access token.
#[derive(Clone)]
pub struct WrikeClient {
    http_client: reqwest::Client,
    token: BearerToken,
    config: ClientConfig,
}

impl WrikeClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be created.
    pub fn new(token: BearerToken, config: ClientConfig) -> Result<Self, ApiError> {
        let http_client = config.build_http_client()?;
        Ok(Self {
            http_client,
            token,
            config,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch a task by id.
    ///
    /// Returns the first element of the response's `data` array, or `None`
    /// when Wrike answers with an empty array.
    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: &str) -> Result<Option<Task>, ApiError> {
        let path = format!("/tasks/{}", path_segment(task_id)?);
        let tasks: Vec<Task> = self.get_data(&path).await?;
        Ok(tasks.into_iter().next())
    }

    /// Fetch workflows by id. The relay calls this with a task's custom status id.
    #[instrument(skip(self))]
    pub async fn get_workflows(&self, workflow_id: &str) -> Result<Vec<Workflow>, ApiError> {
        let path = format!("/workflows/{}", path_segment(workflow_id)?);
        self.get_data(&path).await
    }

    /// List every workflow in the account, including their custom statuses.
    #[instrument(skip(self))]
    pub async fn list_workflows(&self) -> Result<Vec<Workflow>, ApiError> {
        self.get_data("/workflows").await
    }

    /// List every custom field definition in the account.
    #[instrument(skip(self))]
    pub async fn list_custom_fields(&self) -> Result<Vec<CustomFieldDefinition>, ApiError> {
        self.get_data("/customfields").await
    }

    /// Fetch contacts in one batched call. No request is made for an empty id list.
    ///
    /// Each id is encoded on its own; the separating commas are sent as-is.
    #[instrument(skip(self))]
    pub async fn get_contacts(&self, contact_ids: &[String]) -> Result<Vec<Contact>, ApiError> {
        if contact_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = contact_ids
            .iter()
            .map(|id| path_segment(id))
            .collect::<Result<Vec<_>, _>>()?;
        self.get_data(&format!("/contacts/{}", ids.join(","))).await
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = self.config.url_for(path);
        debug!(url = %url, "GET Wrike resource");

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.token.authorization_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = ensure_success(response).await?;

        let envelope = response
            .json::<DataEnvelope<T>>()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                message: format!("Failed to parse Wrike response for {}: {}", path, e),
            })?;

        Ok(envelope.data)
    }
}

/// Percent-encode an id so it stays one path segment.
///
/// Dot segments survive encoding and would be resolved away by the URL
/// parser, so they are refused along with empty ids.
fn path_segment(id: &str) -> Result<Cow<'_, str>, ApiError> {
    if matches!(id, "" | "." | "..") {
        return Err(ApiError::InvalidRequest {
            message: format!("{:?} is not a usable Wrike id", id),
        });
    }
    Ok(encode(id))
}

impl std::fmt::Debug for WrikeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrikeClient")
            .field("config", &self.config)
            .field("token", &self.token)
            .finish()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
