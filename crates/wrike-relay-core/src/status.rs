//! Workflow status resolution.

use tracing::{debug, warn};
use wrike_relay_sdk::wrike::{Task, Workflow};

use crate::catalog::StatusCatalog;
use crate::fields::non_blank;
use crate::source::TaskSource;

/// Placeholder when a task carries no status at all.
pub const NO_STATUS: &str = "(No status)";

/// How a task's status name was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusResolution {
    /// Start-up status catalog hit
    Catalog(String),

    /// Per-request `GET /workflows/{customStatusId}` lookup
    WorkflowLookup(String),

    /// The task's built-in status string
    Raw(String),

    Default,
}

impl StatusResolution {
    pub fn display(&self) -> String {
        match self {
            Self::Catalog(v) | Self::WorkflowLookup(v) | Self::Raw(v) => v.clone(),
            Self::Default => NO_STATUS.to_string(),
        }
    }
}

/// Resolve the display status of a task.
///
/// Falls through catalog, workflow lookup, raw status and placeholder in that
/// order. A failing workflow lookup is logged and skipped.
pub async fn resolve_status(
    task: &Task,
    catalog: &StatusCatalog,
    source: &dyn TaskSource,
) -> StatusResolution {
    if let Some(custom_status_id) = non_blank(task.custom_status_id.as_deref()) {
        if let Some(name) = non_blank(catalog.name(custom_status_id)) {
            return StatusResolution::Catalog(name.to_string());
        }

        match source.fetch_workflows(custom_status_id).await {
            Ok(workflows) => {
                if let Some(name) = workflow_status_name(&workflows, custom_status_id) {
                    return StatusResolution::WorkflowLookup(name);
                }
                debug!(
                    task_id = %task.id,
                    custom_status_id,
                    "Workflow lookup returned no usable name"
                );
            }
            Err(e) => {
                warn!(
                    task_id = %task.id,
                    custom_status_id,
                    error = %e,
                    "Workflow lookup failed; using raw status"
                );
            }
        }
    }

    match non_blank(task.status.as_deref()) {
        Some(status) => StatusResolution::Raw(status.to_string()),
        None => StatusResolution::Default,
    }
}

/// Name of the matching custom status, else the first workflow's name.
fn workflow_status_name(workflows: &[Workflow], custom_status_id: &str) -> Option<String> {
    let matching = workflows
        .iter()
        .flat_map(|workflow| workflow.custom_statuses.iter())
        .find(|status| status.id == custom_status_id)
        .and_then(|status| non_blank(status.name.as_deref()));

    matching
        .or_else(|| {
            workflows
                .first()
                .and_then(|workflow| non_blank(workflow.name.as_deref()))
        })
        .map(str::to_string)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
