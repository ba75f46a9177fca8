//! Path resolution utilities.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the pairdebug base directory (~/.pairdebug).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".pairdebug"))
}

/// Get the main config file path (~/.pairdebug/pairdebug.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("pairdebug.json5"))
}
