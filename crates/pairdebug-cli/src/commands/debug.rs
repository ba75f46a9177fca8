//! One-shot debug command.

use super::load_config;
use anyhow::Context;
use clap::Args;
use pairdebug_gateway::{Debugger, GatewayError};
use pairdebug_providers::HuggingFaceProvider;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Debug command arguments.
#[derive(Args)]
pub struct DebugArgs {
    /// Source file to analyze
    pub file: PathBuf,

    /// Print the result as the JSON body the server would return
    #[arg(long)]
    pub json: bool,
}

/// Run the debug command.
pub async fn run(args: DebugArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let code = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let provider = HuggingFaceProvider::from_config(&config.completion)?;
    let debugger = Debugger::new(Arc::new(provider));

    match debugger.debug(&code).await {
        Ok(result) => {
            if args.json {
                println!("{}", serde_json::json!({ "debugResult": result }));
            } else {
                println!("{}", result);
            }
            Ok(())
        }
        Err(e) => {
            let (status, body) = GatewayError::from(e).to_http();
            if args.json {
                println!("{}", serde_json::to_string(&body)?);
            }
            anyhow::bail!("{} ({}): {}", body.error, status.as_u16(), body.details)
        }
    }
}
