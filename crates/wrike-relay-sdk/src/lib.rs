//! # Wrike Relay SDK
//!
//! Thin, typed REST clients for the two platforms the relay talks to:
//!
//! - [`wrike::WrikeClient`] reads tasks, workflows, custom-field definitions
//!   and contacts from the Wrike v4 API.
//! - [`webex::WebexClient`] posts markdown messages into Webex rooms.
//!
//! Both clients authenticate with a static [`BearerToken`] and share the
//! [`ClientConfig`] type for base URL, user agent and timeout settings.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wrike_relay_sdk::{BearerToken, ClientConfig, wrike::WrikeClient};
//!
//! # async fn example() -> Result<(), wrike_relay_sdk::ApiError> {
//! let client = WrikeClient::new(BearerToken::new("wrike-token"), ClientConfig::wrike())?;
//! if let Some(task) = client.get_task("IEAAAAAQKQAAAAAA").await? {
//!     println!("{:?}", task.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod webex;
pub mod wrike;

pub use auth::BearerToken;
pub use client::{ClientConfig, DEFAULT_WEBEX_API_URL, DEFAULT_WRIKE_API_URL};
pub use error::ApiError;
