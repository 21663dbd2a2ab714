//! Notification rendering.
//!
//! The output is a pure function of the [`TaskNotification`]; identical input
//! always produces byte-identical markdown.

use serde::Serialize;

/// Placeholder for a task without a title.
pub const NO_TITLE: &str = "(No title)";

/// Placeholder for an event without a type.
pub const UNKNOWN_EVENT: &str = "(Unknown event)";

/// Base for links built when Wrike supplies no permalink.
pub const WRIKE_OPEN_URL: &str = "https://www.wrike.com/open.htm?id=";

/// Every value shown in a notification, already resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskNotification {
    pub task_id: String,
    pub item_type: String,
    pub event_type: Option<String>,
    pub title: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignees: String,
    pub technology: String,
    pub type_label: String,
    pub permalink: Option<String>,
}

impl TaskNotification {
    /// Link back to the task in Wrike.
    pub fn link(&self) -> String {
        match present(self.permalink.as_deref()) {
            Some(permalink) => permalink.to_string(),
            None => format!("{}{}", WRIKE_OPEN_URL, self.task_id),
        }
    }

    /// Render the markdown message.
    pub fn render(&self) -> String {
        let lines = [
            format!(
                "📌 {} - {}",
                self.item_type,
                present(self.event_type.as_deref()).unwrap_or(UNKNOWN_EVENT)
            ),
            format!(
                "• 📝 Name: {}",
                present(self.title.as_deref()).unwrap_or(NO_TITLE)
            ),
            format!("• 🔄 Status: {}", self.status),
            format!("• 🔺 Priority: {}", self.priority),
            format!("• 👤 Assignees: {}", self.assignees),
            format!("• 🧪 Technology: {}", self.technology),
            format!("• 🏷️ Type: {}", self.type_label),
            format!("• 🔗 [Open in Wrike]({})", self.link()),
        ];
        lines.join("\n")
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
