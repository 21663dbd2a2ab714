//! Error taxonomy for the relay pipeline.
//!
//! | Error | Cause | HTTP outcome |
//! |-------|-------|--------------|
//! | [`ValidationError`] | malformed or missing inbound payload | 400 |
//! | [`LookupError`] | the task itself could not be fetched | 500 |
//! | [`DeliveryError`] | the Webex message post failed | 500 |
//!
//! A missing destination room is not an error; it is reported as
//! [`RelayOutcome::NoRoute`](crate::relay::RelayOutcome::NoRoute). Failures of
//! optional enrichment calls (workflow name, contact names) are recovered
//! where they happen and never reach this module.

use crate::{RoomId, TaskId};
use wrike_relay_sdk::ApiError;

/// Input validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' has invalid format: {message}")]
    InvalidFormat { field: String, message: String },
}

/// The task referenced by an event could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Wrike answered, but the `data` array was empty.
    #[error("Task {task_id} not found")]
    TaskNotFound { task_id: TaskId },

    #[error("Failed to fetch task {task_id}: {source}")]
    Api {
        task_id: TaskId,
        #[source]
        source: ApiError,
    },
}

/// The notification could not be posted.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The chat platform answered with a non-2xx status.
    #[error("Message to room {room_id} rejected with status {status}: {message}")]
    Rejected {
        room_id: RoomId,
        status: u16,
        message: String,
    },

    /// The request never got an answer.
    #[error("Message to room {room_id} could not be sent: {message}")]
    Transport { room_id: RoomId, message: String },
}

impl DeliveryError {
    /// Classify a Webex client error for the given room.
    pub fn from_api(room_id: RoomId, error: ApiError) -> Self {
        match error.status() {
            Some(status) => Self::Rejected {
                room_id,
                status,
                message: error.to_string(),
            },
            None => Self::Transport {
                room_id,
                message: error.to_string(),
            },
        }
    }
}

/// Top-level error type for relaying one event
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid webhook payload: {0}")]
    Validation(#[from] ValidationError),

    #[error("Task lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl RelayError {
    /// True when the sender of the webhook is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when an upstream platform was temporarily unavailable.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Lookup(LookupError::TaskNotFound { .. }) => false,
            Self::Lookup(LookupError::Api { source, .. }) => source.is_transient(),
            Self::Delivery(DeliveryError::Rejected { status, .. }) => {
                ApiError::is_transient_status(*status)
            }
            Self::Delivery(DeliveryError::Transport { .. }) => true,
        }
    }

    /// Short label for metrics and logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Lookup(_) => "lookup",
            Self::Delivery(_) => "delivery",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
