//! Wrike v4 wire models.
//!
//! Only the fields the relay reads are modelled; unknown fields are ignored.
//! Every collection defaults to empty so partially populated resources still
//! deserialize.

use serde::{Deserialize, Serialize};

/// Standard Wrike response wrapper: `{"kind": "...", "data": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Wrike task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task identifier
    pub id: String,

    /// Task title
    #[serde(default)]
    pub title: Option<String>,

    /// Built-in status group ("Active", "Completed", ...)
    #[serde(default)]
    pub status: Option<String>,

    /// Built-in importance ("High", "Normal", "Low")
    #[serde(default)]
    pub importance: Option<String>,

    /// Workflow custom status identifier
    #[serde(default)]
    pub custom_status_id: Option<String>,

    /// Parent folder identifiers, in Wrike's order
    #[serde(default)]
    pub parent_ids: Vec<String>,

    /// Assignee contact identifiers
    #[serde(default)]
    pub responsible_ids: Vec<String>,

    #[serde(default)]
    pub custom_fields: Vec<CustomFieldValue>,

    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,

    /// Link to the task in the Wrike web UI
    #[serde(default)]
    pub permalink: Option<String>,
}

/// A custom field value attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub id: String,

    /// Wrike sends strings, but numeric or structured values are tolerated.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl CustomFieldValue {
    /// Value as display text; `None` for null or blank values.
    pub fn value_text(&self) -> Option<String> {
        match &self.value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A key/value metadata entry attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Custom field definition from `GET /customfields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldDefinition {
    pub id: String,
    pub title: String,
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
}

/// Workflow from `GET /workflows`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub custom_statuses: Vec<CustomStatus>,
}

/// A status within a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStatus {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Wrike user or group contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Contact {
    /// "First Last", trimmed. Falls back to the contact id when neither part is set.
    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let name = name.trim();
        if name.is_empty() {
            self.id.clone()
        } else {
            name.to_string()
        }
    }
}
