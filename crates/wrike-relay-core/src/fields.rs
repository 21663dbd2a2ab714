//! Custom field and item type resolution.
//!
//! Each semantic role is resolved by an ordered list of strategies and the
//! winning strategy is kept in the result, so callers and tests can tell a
//! configured-id hit from a name match or a fallback.

use std::fmt;
use std::str::FromStr;

use wrike_relay_sdk::wrike::Task;

use crate::catalog::CustomFieldCatalog;
use crate::mapping::{FieldNameMap, FolderItemTypeMap};
use crate::{FolderId, ValidationError};

/// Placeholder for a role with no value.
pub const NO_VALUE: &str = "(None)";

/// Item type used when neither metadata nor the folder map supply one.
pub const DEFAULT_ITEM_TYPE: &str = "Task";

/// Metadata key carrying an explicit item type.
pub const ITEM_TYPE_METADATA_KEY: &str = "Item type";

// ============================================================================
// Roles and bindings
// ============================================================================

/// Semantic roles rendered in a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Priority,
    Technology,
    Type,
}

impl FieldRole {
    /// Label used for name matching and in `CUSTOM_FIELD_MAP`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::Technology => "Technology",
            Self::Type => "Type",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configured field id for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub role: FieldRole,
    pub field_id: Option<String>,
}

impl FieldBinding {
    /// An explicit id wins over a label entry in the name map. Blank ids are ignored.
    pub fn new(role: FieldRole, explicit_id: Option<&str>, names: &FieldNameMap) -> Self {
        let field_id = explicit_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or_else(|| names.field_id(role.label()))
            .map(str::to_string);

        Self { role, field_id }
    }

    /// Binding with no configured id; only name matching applies.
    pub fn unbound(role: FieldRole) -> Self {
        Self {
            role,
            field_id: None,
        }
    }
}

/// Bindings for every role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBindings {
    pub priority: FieldBinding,
    pub technology: FieldBinding,
    pub item_type: FieldBinding,
}

impl FieldBindings {
    pub fn new(
        priority_id: Option<&str>,
        technology_id: Option<&str>,
        type_id: Option<&str>,
        names: &FieldNameMap,
    ) -> Self {
        Self {
            priority: FieldBinding::new(FieldRole::Priority, priority_id, names),
            technology: FieldBinding::new(FieldRole::Technology, technology_id, names),
            item_type: FieldBinding::new(FieldRole::Type, type_id, names),
        }
    }
}

impl Default for FieldBindings {
    fn default() -> Self {
        Self {
            priority: FieldBinding::unbound(FieldRole::Priority),
            technology: FieldBinding::unbound(FieldRole::Technology),
            item_type: FieldBinding::unbound(FieldRole::Type),
        }
    }
}

// ============================================================================
// Priority vocabulary
// ============================================================================

/// Display labels for priority values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityVocabulary {
    /// High / Medium / Low
    #[default]
    Severity,

    /// Wrike's native Urgent / High / Normal / Low
    Importance,
}

impl PriorityVocabulary {
    /// Decorate a raw value. Matching is exact; unknown values pass through.
    pub fn display(&self, value: &str) -> String {
        let label = match (self, value) {
            (Self::Severity, "High") => "🔴 High",
            (Self::Severity, "Medium") => "🟡 Medium",
            (Self::Severity, "Low") => "🟢 Low",
            (Self::Importance, "Urgent") => "🔴 Urgent",
            (Self::Importance, "High") => "🟠 High",
            (Self::Importance, "Normal") => "🟡 Normal",
            (Self::Importance, "Low") => "🟢 Low",
            _ => value,
        };
        label.to_string()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::Importance => "importance",
        }
    }
}

impl FromStr for PriorityVocabulary {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "severity" => Ok(Self::Severity),
            "importance" => Ok(Self::Importance),
            other => Err(ValidationError::InvalidFormat {
                field: "PRIORITY_VOCABULARY".to_string(),
                message: format!("expected 'severity' or 'importance', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for PriorityVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Field resolution
// ============================================================================

/// How a role's value was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldResolution {
    /// Task custom field with the configured id
    ById(String),

    /// Task custom field whose catalog title matches the role label
    ByName(String),

    /// The task's native importance (priority under the importance vocabulary)
    FromTask(String),

    /// Nothing found
    Default,
}

impl FieldResolution {
    /// Raw resolved value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::ById(v) | Self::ByName(v) | Self::FromTask(v) => Some(v),
            Self::Default => None,
        }
    }

    /// Value for display, `"(None)"` when unresolved.
    pub fn display(&self) -> String {
        self.value().unwrap_or(NO_VALUE).to_string()
    }

    /// Priority value for display under a vocabulary.
    pub fn display_priority(&self, vocabulary: PriorityVocabulary) -> String {
        match self.value() {
            Some(value) => vocabulary.display(value),
            None => NO_VALUE.to_string(),
        }
    }
}

/// Resolve one role against a task.
pub fn resolve_field(
    task: &Task,
    binding: &FieldBinding,
    catalog: &CustomFieldCatalog,
    vocabulary: PriorityVocabulary,
) -> FieldResolution {
    if let Some(field_id) = binding.field_id.as_deref() {
        let value = task
            .custom_fields
            .iter()
            .filter(|field| field.id == field_id)
            .find_map(|field| field.value_text());
        if let Some(value) = value {
            return FieldResolution::ById(value);
        }
    }

    let label = binding.role.label();
    let value = task
        .custom_fields
        .iter()
        .filter(|field| {
            catalog
                .title(&field.id)
                .is_some_and(|title| title.trim().eq_ignore_ascii_case(label))
        })
        .find_map(|field| field.value_text());
    if let Some(value) = value {
        return FieldResolution::ByName(value);
    }

    if binding.role == FieldRole::Priority && vocabulary == PriorityVocabulary::Importance {
        if let Some(importance) = non_blank(task.importance.as_deref()) {
            return FieldResolution::FromTask(importance.to_string());
        }
    }

    FieldResolution::Default
}

/// Resolved values for every role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFields {
    pub priority: FieldResolution,
    pub technology: FieldResolution,
    pub item_type: FieldResolution,
}

/// Resolve every role against a task.
pub fn resolve_fields(
    task: &Task,
    bindings: &FieldBindings,
    catalog: &CustomFieldCatalog,
    vocabulary: PriorityVocabulary,
) -> ResolvedFields {
    ResolvedFields {
        priority: resolve_field(task, &bindings.priority, catalog, vocabulary),
        technology: resolve_field(task, &bindings.technology, catalog, vocabulary),
        item_type: resolve_field(task, &bindings.item_type, catalog, vocabulary),
    }
}

// ============================================================================
// Item type
// ============================================================================

/// How the notification's item type was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemTypeResolution {
    Metadata(String),
    FolderMap(String),
    Default,
}

impl ItemTypeResolution {
    pub fn display(&self) -> String {
        match self {
            Self::Metadata(v) | Self::FolderMap(v) => v.clone(),
            Self::Default => DEFAULT_ITEM_TYPE.to_string(),
        }
    }
}

/// Resolve the item type from task metadata, then the parent folders.
pub fn resolve_item_type(task: &Task, folders: &FolderItemTypeMap) -> ItemTypeResolution {
    let from_metadata = task
        .metadata
        .iter()
        .filter(|entry| entry.key == ITEM_TYPE_METADATA_KEY)
        .find_map(|entry| non_blank(entry.value.as_deref()));
    if let Some(value) = from_metadata {
        return ItemTypeResolution::Metadata(value.to_string());
    }

    let from_folder = task
        .parent_ids
        .iter()
        .find_map(|parent| folders.get(&FolderId::from(parent.as_str())));
    if let Some(value) = from_folder {
        return ItemTypeResolution::FolderMap(value.to_string());
    }

    ItemTypeResolution::Default
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
