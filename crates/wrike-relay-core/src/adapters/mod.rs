//! # Platform Adapters
//!
//! [`TaskSource`](crate::source::TaskSource) and
//! [`Notifier`](crate::source::Notifier) implementations backed by the SDK
//! clients.

pub mod webex;
pub mod wrike;
