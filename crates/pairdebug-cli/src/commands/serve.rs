//! Serve command.

use super::load_config;
use clap::Args;
use pairdebug_core::config::BindMode;
use pairdebug_gateway::Gateway;
use pairdebug_providers::HuggingFaceProvider;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Serve command arguments.
#[derive(Args)]
pub struct ServeArgs {
    /// Bind mode (loopback, lan)
    #[arg(short, long)]
    pub bind: Option<BindMode>,

    /// Port number (overrides PORT and the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Disable the CORS layer
    #[arg(long)]
    pub no_cors: bool,
}

/// Run the serve command.
pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(bind) = args.bind {
        config.gateway.bind = bind;
    }
    if let Some(port) = args.port {
        config.gateway.port = port;
    }
    if args.no_cors {
        config.gateway.cors = false;
    }

    let provider = HuggingFaceProvider::from_config(&config.completion)?;
    info!("Using completion endpoint {}", provider.endpoint());

    let gateway = Gateway::new(config.gateway, Arc::new(provider));
    gateway
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
