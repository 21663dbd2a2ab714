//! Webex messaging client.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::auth::BearerToken;
use crate::client::{ensure_success, ClientConfig};
use crate::error::ApiError;

/// Request body for `POST /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    /// Destination room
    pub room_id: String,

    /// Message text, rendered as markdown by Webex
    pub markdown: String,
}

/// Webex client authenticated as a bot.
#[derive(Clone)]
pub struct WebexClient {
    http_client: reqwest::Client,
    token: BearerToken,
    config: ClientConfig,
}

impl WebexClient {
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

    /// Post a message into a room.
    ///
    /// Any 2xx answer counts as delivered; the response body is not inspected.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for non-2xx responses and transport failures.
    #[instrument(skip(self, request), fields(room_id = %request.room_id))]
    pub async fn create_message(&self, request: &CreateMessageRequest) -> Result<(), ApiError> {
        let url = self.config.url_for("/messages");
        debug!(url = %url, "POST Webex message");

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.token.authorization_header())
            .json(request)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

impl std::fmt::Debug for WebexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebexClient")
            .field("config", &self.config)
            .field("token", &self.token)
            .finish()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
