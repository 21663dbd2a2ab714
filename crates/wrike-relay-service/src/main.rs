//! # Wrike Relay Service
//!
//! Binary entry point for the Wrike to Webex relay.
//!
//! This executable:
//! - Loads configuration from files and the environment
//! - Initializes logging
//! - Builds the platform clients and loads the Wrike catalogs
//! - Starts the HTTP server from wrike-relay-api
//!
//! Exit codes: 1 bind failure, 2 server failure, 3 configuration error.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wrike_relay_api::{build_relay, start_server, LogFormat, ServiceConfig};

const DEFAULT_LOG_FILTER: &str =
    "wrike_relay_service=info,wrike_relay_api=info,wrike_relay_core=info,tower_http=info";

#[tokio::main]
async fn main() {
    // Logging depends on LOG_FORMAT, so configuration is loaded first.
    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            error!(error = %e, "Failed to load configuration; aborting");
            std::process::exit(3);
        }
    };

    init_tracing(config.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Wrike relay");

    if let Err(e) = config.validate() {
        error!(error = %e, "Service configuration is invalid; aborting");
        std::process::exit(3);
    }

    let relay = match build_relay(&config).await {
        Ok(relay) => relay,
        Err(e) => {
            error!(error = %e, "Failed to build relay; aborting");
            std::process::exit(3);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        webhook_path = %config.webhook_path,
        "Starting HTTP server"
    );

    if let Err(e) = start_server(config, relay).await {
        error!("Server stopped: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
