//! Configuration types for the HTTP service
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. `config/relay.{yaml,json,toml}` if present
//! 2. the file named by `RELAY_CONFIG_FILE`, which must exist when set
//! 3. process environment variables, unprefixed (`BOT_TOKEN`, `PORT`, ...)
//!
//! Keys are case-insensitive, so `port: 8080` in a file and `PORT=8080` in the
//! environment address the same setting.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};
use wrike_relay_core::fields::{FieldBindings, PriorityVocabulary};
use wrike_relay_core::mapping::{FieldNameMap, FolderItemTypeMap, FolderRoomMap};
use wrike_relay_core::RelaySettings;
use wrike_relay_sdk::{BearerToken, ClientConfig, DEFAULT_WEBEX_API_URL, DEFAULT_WRIKE_API_URL};

use crate::errors::ConfigError;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_FILE_ENV: &str = "RELAY_CONFIG_FILE";

/// Optional deployment-local configuration file, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "config/relay";

/// Paths served by the router itself; the webhook path may not shadow them.
const RESERVED_PATHS: [&str; 2] = ["/health", "/metrics"];

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Webex bot token
    pub bot_token: Option<BearerToken>,

    /// Wrike permanent access token
    pub wrike_token: Option<BearerToken>,

    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Webhook endpoint path
    pub webhook_path: String,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,

    /// `folderId:roomId` pairs
    pub folder_to_room_map: String,

    /// `folderId:Item type` pairs
    pub folder_to_item_type_map: String,

    /// `Field name:fieldId` pairs
    pub custom_field_map: String,

    pub priority_field_id: Option<String>,
    pub technology_field_id: Option<String>,
    pub type_field_id: Option<String>,

    /// `severity` or `importance`
    pub priority_vocabulary: String,

    pub wrike_api_url: String,
    pub webex_api_url: String,

    /// Upstream request timeout; unset means no timeout
    pub upstream_timeout_seconds: Option<u64>,

    /// Load the custom field and workflow catalogs at start-up
    pub load_catalogs: bool,

    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            wrike_token: None,
            host: "0.0.0.0".to_string(),
            port: 3000,
            webhook_path: "/wrike-webhook".to_string(),
            shutdown_timeout_seconds: 30,
            folder_to_room_map: String::new(),
            folder_to_item_type_map: String::new(),
            custom_field_map: String::new(),
            priority_field_id: None,
            technology_field_id: None,
            type_field_id: None,
            priority_vocabulary: PriorityVocabulary::default().to_string(),
            wrike_api_url: DEFAULT_WRIKE_API_URL.to_string(),
            webex_api_url: DEFAULT_WEBEX_API_URL.to_string(),
            upstream_timeout_seconds: None,
            load_catalogs: true,
            log_format: LogFormat::Text,
        }
    }
}

impl ServiceConfig {
    /// Load from the standard sources and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit_file = std::env::var(CONFIG_FILE_ENV)
            .ok()
            .filter(|path| !path.trim().is_empty());
        Self::load_with(explicit_file.as_deref(), None)
    }

    /// Load with an optional explicit file. When `environment` is given it
    /// replaces the process environment.
    pub fn load_with(
        explicit_file: Option<&str>,
        environment: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Some(path) = explicit_file {
            info!(path = %path, "Loading configuration from explicit path");
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::default().source(environment))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check the loaded values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bot_token()?;
        self.wrike_token()?;

        if self.port == 0 {
            return Err(ConfigError::Invalid {
                message: "PORT must be between 1 and 65535".to_string(),
            });
        }

        if !self.webhook_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                message: format!("WEBHOOK_PATH must start with '/': {}", self.webhook_path),
            });
        }

        if RESERVED_PATHS.contains(&self.webhook_path.as_str()) {
            return Err(ConfigError::Invalid {
                message: format!("WEBHOOK_PATH may not be {}", self.webhook_path),
            });
        }

        self.vocabulary()?;

        if self.upstream_timeout_seconds == Some(0) {
            return Err(ConfigError::Invalid {
                message: "UPSTREAM_TIMEOUT_SECONDS must be positive when set".to_string(),
            });
        }

        Ok(())
    }

    pub fn bot_token(&self) -> Result<&BearerToken, ConfigError> {
        required_token(&self.bot_token, "BOT_TOKEN")
    }

    pub fn wrike_token(&self) -> Result<&BearerToken, ConfigError> {
        required_token(&self.wrike_token, "WRIKE_TOKEN")
    }

    pub fn vocabulary(&self) -> Result<PriorityVocabulary, ConfigError> {
        self.priority_vocabulary
            .parse()
            .map_err(|e: wrike_relay_core::ValidationError| ConfigError::Invalid {
                message: e.to_string(),
            })
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_seconds.map(Duration::from_secs)
    }

    pub fn wrike_client_config(&self) -> ClientConfig {
        ClientConfig::wrike()
            .with_api_url(self.wrike_api_url.as_str())
            .with_timeout(self.upstream_timeout())
    }

    pub fn webex_client_config(&self) -> ClientConfig {
        ClientConfig::webex()
            .with_api_url(self.webex_api_url.as_str())
            .with_timeout(self.upstream_timeout())
    }

    /// Parse the lookup tables. Catalogs are left empty.
    pub fn relay_settings(&self) -> Result<RelaySettings, ConfigError> {
        let rooms = FolderRoomMap::parse(&self.folder_to_room_map);
        let item_types = FolderItemTypeMap::parse(&self.folder_to_item_type_map);
        let names = FieldNameMap::parse(&self.custom_field_map);

        report_rejected("FOLDER_TO_ROOM_MAP", rooms.rejected());
        report_rejected("FOLDER_TO_ITEM_TYPE_MAP", item_types.rejected());
        report_rejected("CUSTOM_FIELD_MAP", names.rejected());

        if rooms.is_empty() {
            warn!("FOLDER_TO_ROOM_MAP is empty; every event will be acknowledged without a notification");
        }

        let fields = FieldBindings::new(
            self.priority_field_id.as_deref(),
            self.technology_field_id.as_deref(),
            self.type_field_id.as_deref(),
            &names,
        );

        info!(
            routed_folders = rooms.len(),
            item_type_folders = item_types.len(),
            priority_field = ?fields.priority.field_id,
            technology_field = ?fields.technology.field_id,
            type_field = ?fields.item_type.field_id,
            "Parsed relay lookup tables"
        );

        Ok(RelaySettings::new(rooms)
            .with_item_types(item_types)
            .with_fields(fields)
            .with_vocabulary(self.vocabulary()?))
    }
}

fn required_token<'a>(
    token: &'a Option<BearerToken>,
    key: &str,
) -> Result<&'a BearerToken, ConfigError> {
    match token {
        Some(token) if !token.is_blank() => Ok(token),
        _ => Err(ConfigError::Missing {
            key: key.to_string(),
        }),
    }
}

fn report_rejected(key: &str, rejected: &[String]) {
    for entry in rejected {
        warn!(key = key, entry = %entry, "Skipping malformed mapping entry");
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
