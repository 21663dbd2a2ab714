//! Inbound webhook payload handling.
//!
//! Wrike delivers a JSON array of events. Some deployments wrap the array
//! as `{"data": [...]}`; both shapes are accepted. Only the first event is
//! relayed, the remainder of a batch is dropped.

use serde::Serialize;
use serde_json::Value;

use crate::{TaskId, ValidationError};

/// The event the relay acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEvent {
    pub task_id: TaskId,

    /// Wrike event type, e.g. `TaskStatusChanged`
    pub event_type: Option<String>,
}

/// First event of a payload plus how many others were ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEvent {
    pub event: TaskEvent,
    pub dropped: usize,
}

/// Parse a raw webhook body and extract its first event.
///
/// # Errors
///
/// - `ValidationError::Required { field: "body" }` - empty body
/// - `ValidationError::InvalidFormat { field: "body" }` - not JSON, or neither
///   an array nor an object with a `data` array
/// - `ValidationError::Required { field: "events" }` - empty event list
/// - `ValidationError::InvalidFormat { field: "event" }` - first event is not an object
/// - `ValidationError::Required { field: "taskId" }` - first event lacks a task id
/// - `ValidationError::InvalidFormat { field: "taskId" }` - task id is not a plain
///   Wrike id (see [`validate_task_id`])
pub fn extract_first_event(body: &[u8]) -> Result<ExtractedEvent, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::Required {
            field: "body".to_string(),
        });
    }

    let payload: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::InvalidFormat {
            field: "body".to_string(),
            message: format!("not valid JSON: {}", e),
        })?;

    let events = event_list(&payload)?;
    let first = events.first().ok_or_else(|| ValidationError::Required {
        field: "events".to_string(),
    })?;

    Ok(ExtractedEvent {
        event: parse_event(first)?,
        dropped: events.len() - 1,
    })
}

fn event_list(payload: &Value) -> Result<&Vec<Value>, ValidationError> {
    match payload {
        Value::Array(events) => Ok(events),
        Value::Object(object) => match object.get("data") {
            Some(Value::Array(events)) => Ok(events),
            _ => Err(ValidationError::InvalidFormat {
                field: "body".to_string(),
                message: "object payload must carry a `data` array".to_string(),
            }),
        },
        _ => Err(ValidationError::InvalidFormat {
            field: "body".to_string(),
            message: "expected an array of events".to_string(),
        }),
    }
}

fn parse_event(value: &Value) -> Result<TaskEvent, ValidationError> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "event".to_string(),
            message: "event must be a JSON object".to_string(),
        })?;

    let task_id = object
        .get("taskId")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ValidationError::Required {
            field: "taskId".to_string(),
        })?;
    validate_task_id(task_id)?;

    let event_type = object
        .get("eventType")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string);

    Ok(TaskEvent {
        task_id: TaskId::from(task_id),
        event_type,
    })
}

/// Check that a task id is a plain Wrike id.
///
/// The id becomes a path segment of an authenticated Wrike request, so only
/// ASCII letters, digits, `-` and `_` are accepted.
///
/// # Errors
///
/// `ValidationError::InvalidFormat { field: "taskId" }` for anything else.
pub fn validate_task_id(task_id: &str) -> Result<(), ValidationError> {
    let plain = !task_id.is_empty()
        && task_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if plain {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: "taskId".to_string(),
            message: format!("not a Wrike task id: {:?}", task_id),
        })
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
