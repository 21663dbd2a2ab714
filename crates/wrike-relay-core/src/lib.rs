//! # Wrike Relay Core
//!
//! Domain logic for relaying Wrike task-change webhooks into Webex rooms.
//!
//! ## Architecture
//!
//! The pipeline in [`relay::TaskRelay`] is strictly linear per event:
//!
//! 1. fetch the full task ([`source::TaskSource::fetch_task`])
//! 2. pick the destination room from the task's parent folders ([`routing`])
//! 3. resolve status, custom fields, item type and assignees
//!    ([`status`], [`fields`], [`assignees`])
//! 4. render the notification ([`message`])
//! 5. post it ([`source::Notifier::post_message`])
//!
//! Business logic depends only on the [`source::TaskSource`] and
//! [`source::Notifier`] traits; the Wrike and Webex implementations live in
//! [`adapters`]. Static lookup tables are parsed once into
//! [`settings::RelaySettings`] and injected, never held in globals.
//!
//! ## Usage
//!
//! ```rust
//! use wrike_relay_core::{FolderId, RoomId, mapping::FolderRoomMap};
//!
//! let rooms = FolderRoomMap::parse("IEAAA:room-1, IEBBB:room-2");
//! assert_eq!(rooms.get(&FolderId::from("IEAAA")), Some(&RoomId::from("room-1")));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod adapters;
pub mod assignees;
pub mod catalog;
pub mod error;
pub mod event;
pub mod fields;
pub mod mapping;
pub mod message;
pub mod relay;
pub mod routing;
pub mod settings;
pub mod source;
pub mod status;

pub use error::{DeliveryError, LookupError, RelayError, ValidationError};
pub use event::TaskEvent;
pub use relay::{EventRelay, RelayOutcome, TaskRelay};
pub use settings::RelaySettings;
pub use source::{Notifier, TaskSource};

// ============================================================================
// Domain Identifier Types
// ============================================================================

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, rejecting blank values.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::Required {
                        field: stringify!($name).to_string(),
                    });
                }
                Ok(Self(value))
            }

            /// Get string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_identifier!(
    /// Wrike task identifier
    TaskId
);

string_identifier!(
    /// Wrike folder (or project) identifier
    FolderId
);

string_identifier!(
    /// Webex room identifier
    RoomId
);

#[cfg(test)]
mod test_doubles;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
