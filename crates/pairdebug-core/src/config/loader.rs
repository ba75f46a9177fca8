//! Configuration loading, environment overrides, and persistence.

use super::Config;
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use crate::secret::SecretString;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load from the default path, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        match Self::load_default() {
            Ok(config) => config,
            Err(ConfigError::NotFound(path)) => {
                debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Apply `PORT`, `HUGGINGFACE_API_KEY` and `PAIRDEBUG_COMPLETION_URL`.
    pub fn apply_env(&mut self) {
        if let Some(port) = env::get_u16(env::PORT) {
            self.gateway.port = port;
        } else if let Some(raw) = env::get_var(env::PORT) {
            warn!("Ignoring unparsable {}={}", env::PORT, raw);
        }

        if let Some(key) = env::get_var(env::HUGGINGFACE_API_KEY) {
            self.completion.api_key = Some(SecretString::new(key));
        }

        if let Some(url) = env::get_var(env::COMPLETION_URL) {
            self.completion.endpoint = url;
        }
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.gateway.port == 0 {
            errors.push("Gateway port cannot be 0".to_string());
        }

        if let Err(e) = url::Url::parse(&self.completion.endpoint) {
            errors.push(format!(
                "Invalid completion endpoint '{}': {}",
                self.completion.endpoint, e
            ));
        }

        if self.completion.max_new_tokens == 0 {
            errors.push("Completion max_new_tokens must be greater than 0".to_string());
        }

        if !(0.0..=2.0).contains(&self.completion.temperature) {
            errors.push(format!(
                "Completion temperature must be 0.0-2.0, got {}",
                self.completion.temperature
            ));
        }

        if !(0.0..=1.0).contains(&self.completion.top_p) {
            errors.push(format!(
                "Completion top_p must be 0.0-1.0, got {}",
                self.completion.top_p
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}
