//! hubchatd - hubchat server daemon
//!
//! A channel-based chat server speaking a line-oriented text protocol, with
//! direct messages and per-channel file sharing.

mod config;
mod error;
mod network;
mod state;
mod telemetry;

use anyhow::Context;
use tracing::{error, info};

use crate::config::Config;
use crate::network::Gateway;
use crate::state::Hub;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration; logging is configured from it, so it comes first.
    let config_path = std::env::args().nth(1);
    let config = Config::resolve(config_path.as_deref()).with_context(|| {
        format!(
            "failed to load config from {}",
            config_path
                .as_deref()
                .unwrap_or(config::DEFAULT_CONFIG_PATH)
        )
    })?;

    telemetry::init(config.log.format);

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        listen = %config.listen.address,
        "Starting hubchat"
    );

    let (hub, hub_task) = Hub::spawn(config.limits.hub_queue_capacity);
    let gateway = Gateway::bind(config.listen.address, hub, config.limits.clone()).await?;

    tokio::select! {
        result = gateway.run() => {
            if let Err(e) = result {
                error!(error = %e, "Gateway error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    hub_task.abort();
    info!("Server shutdown complete");
    Ok(())
}
