//! Assignee name resolution.

use tracing::warn;

use crate::source::TaskSource;

pub const UNASSIGNED: &str = "(Unassigned)";
pub const LOOKUP_FAILED: &str = "(Lookup failed)";

/// Assignees of a task as shown in a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignees {
    Named(Vec<String>),
    Unassigned,

    /// The contact lookup failed; the failure is logged, never surfaced.
    LookupFailed,
}

impl Assignees {
    /// Names joined by `", "`, or the matching placeholder.
    pub fn display(&self) -> String {
        match self {
            Self::Named(names) if names.is_empty() => UNASSIGNED.to_string(),
            Self::Named(names) => names.join(", "),
            Self::Unassigned => UNASSIGNED.to_string(),
            Self::LookupFailed => LOOKUP_FAILED.to_string(),
        }
    }
}

/// Resolve contact ids to names with one batched lookup.
pub async fn resolve_assignees(responsible_ids: &[String], source: &dyn TaskSource) -> Assignees {
    if responsible_ids.is_empty() {
        return Assignees::Unassigned;
    }

    match source.fetch_contact_names(responsible_ids).await {
        Ok(names) => Assignees::Named(names),
        Err(e) => {
            warn!(
                contacts = responsible_ids.len(),
                error = %e,
                "Failed to resolve assignee names"
            );
            Assignees::LookupFailed
        }
    }
}

#[cfg(test)]
#[path = "assignees_tests.rs"]
mod tests;
