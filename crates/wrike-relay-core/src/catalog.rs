//! Start-up catalogs loaded from Wrike metadata endpoints.
//!
//! Both catalogs are filled once, before the server accepts traffic, and are
//! read-only afterwards. A failing load leaves the catalog empty; resolution
//! then falls through to the next strategy.

use std::collections::HashMap;

use tracing::{info, warn};
use wrike_relay_sdk::wrike::{CustomFieldDefinition, Workflow};

use crate::source::TaskSource;

/// Custom field id → title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldCatalog {
    titles: HashMap<String, String>,
}

impl CustomFieldCatalog {
    pub fn from_definitions(definitions: impl IntoIterator<Item = CustomFieldDefinition>) -> Self {
        Self {
            titles: definitions
                .into_iter()
                .map(|definition| (definition.id, definition.title))
                .collect(),
        }
    }

    pub fn title(&self, field_id: &str) -> Option<&str> {
        self.titles.get(field_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Workflow custom status id → status name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCatalog {
    names: HashMap<String, String>,
}

impl StatusCatalog {
    /// Flatten every workflow's custom statuses. Statuses without a name are skipped.
    pub fn from_workflows(workflows: impl IntoIterator<Item = Workflow>) -> Self {
        let names = workflows
            .into_iter()
            .flat_map(|workflow| workflow.custom_statuses)
            .filter_map(|status| status.name.map(|name| (status.id, name)))
            .collect();
        Self { names }
    }

    pub fn name(&self, custom_status_id: &str) -> Option<&str> {
        self.names.get(custom_status_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Both start-up catalogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub custom_fields: CustomFieldCatalog,
    pub statuses: StatusCatalog,
}

impl Catalogs {
    /// Load both catalogs. Never fails; see the module docs.
    pub async fn load(source: &dyn TaskSource) -> Self {
        let custom_fields = match source.list_custom_fields().await {
            Ok(definitions) => CustomFieldCatalog::from_definitions(definitions),
            Err(e) => {
                warn!(error = %e, "Failed to load custom field definitions; name-based field resolution disabled");
                CustomFieldCatalog::default()
            }
        };

        let statuses = match source.list_workflows().await {
            Ok(workflows) => StatusCatalog::from_workflows(workflows),
            Err(e) => {
                warn!(error = %e, "Failed to load workflow statuses; falling back to per-request lookups");
                StatusCatalog::default()
            }
        };

        info!(
            custom_fields = custom_fields.len(),
            statuses = statuses.len(),
            "Loaded Wrike catalogs"
        );

        Self {
            custom_fields,
            statuses,
        }
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
