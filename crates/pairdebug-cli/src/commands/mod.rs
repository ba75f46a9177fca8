//! CLI command implementations.

pub mod debug;
pub mod serve;
pub mod status;

use anyhow::Context;
use pairdebug_core::{env, Config};
use std::path::Path;
use tracing::{debug, warn};

/// Load configuration for a command.
///
/// Order: `.env` in the working directory, then the config file (an explicit
/// path must exist; the default path may be absent), then environment
/// overrides. The result is validated.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match env::load_dotenv() {
        Ok(0) => {}
        Ok(n) => debug!("Loaded {} variable(s) from .env", n),
        Err(e) => warn!("Failed to read .env: {}", e),
    }

    let mut config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };

    config.apply_env();
    config.validate()?;
    Ok(config)
}
