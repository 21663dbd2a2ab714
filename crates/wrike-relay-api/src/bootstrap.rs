//! Start-up wiring: platform clients, catalogs, relay.

use std::sync::Arc;

use tracing::info;
use wrike_relay_core::catalog::Catalogs;
use wrike_relay_core::TaskRelay;
use wrike_relay_sdk::webex::WebexClient;
use wrike_relay_sdk::wrike::WrikeClient;

use crate::config::ServiceConfig;
use crate::errors::ConfigError;

/// Build the relay described by a validated configuration.
///
/// Loads the Wrike catalogs first when `LOAD_CATALOGS` is set. Catalog
/// failures are logged and tolerated; only client construction errors abort.
pub async fn build_relay(config: &ServiceConfig) -> Result<Arc<TaskRelay>, ConfigError> {
    let wrike = WrikeClient::new(config.wrike_token()?.clone(), config.wrike_client_config())
        .map_err(client_error)?;
    let webex = WebexClient::new(config.bot_token()?.clone(), config.webex_client_config())
        .map_err(client_error)?;

    let mut settings = config.relay_settings()?;

    if config.load_catalogs {
        settings = settings.with_catalogs(Catalogs::load(&wrike).await);
    } else {
        info!("Catalog bootstrap disabled; field names and statuses resolve per request");
    }

    Ok(Arc::new(TaskRelay::new(
        Arc::new(wrike),
        Arc::new(webex),
        Arc::new(settings),
    )))
}

fn client_error(error: wrike_relay_sdk::ApiError) -> ConfigError {
    ConfigError::Invalid {
        message: error.to_string(),
    }
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
