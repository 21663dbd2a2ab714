//! [`Notifier`] backed by the Webex messaging client.

use async_trait::async_trait;
use wrike_relay_sdk::webex::{CreateMessageRequest, WebexClient};

use crate::source::Notifier;
use crate::{DeliveryError, RoomId};

#[async_trait]
impl Notifier for WebexClient {
    async fn post_message(&self, room_id: &RoomId, markdown: &str) -> Result<(), DeliveryError> {
        let request = CreateMessageRequest {
            room_id: room_id.to_string(),
            markdown: markdown.to_string(),
        };

        self.create_message(&request)
            .await
            .map_err(|e| DeliveryError::from_api(room_id.clone(), e))
    }
}

#[cfg(test)]
#[path = "webex_tests.rs"]
mod tests;
