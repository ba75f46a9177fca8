//! Environment variable handling.

use std::env;
use std::path::Path;

/// Port the server binds to.
pub const PORT: &str = "PORT";

/// Credential for the completion service.
pub const HUGGINGFACE_API_KEY: &str = "HUGGINGFACE_API_KEY";

/// Override for the completion service endpoint.
pub const COMPLETION_URL: &str = "PAIRDEBUG_COMPLETION_URL";

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable as a u16 (e.g., for ports).
pub fn get_u16(name: &str) -> Option<u16> {
    get_var(name).and_then(|v| v.parse().ok())
}

/// Load environment variables from `.env` in the working directory.
pub fn load_dotenv() -> Result<usize, std::io::Error> {
    load_dotenv_from(Path::new(".env"))
}

/// Load environment variables from a dotenv-style file.
///
/// Variables that are already set are left untouched. Returns the number of
/// variables that were set from the file.
pub fn load_dotenv_from(path: &Path) -> Result<usize, std::io::Error> {
    if !path.exists() {
        return Ok(0);
    }

    let content = std::fs::read_to_string(path)?;
    let mut loaded = 0;
    for (key, value) in parse_dotenv(&content) {
        if env::var(&key).is_err() {
            env::set_var(&key, value);
            loaded += 1;
        }
    }
    Ok(loaded)
}

/// Parse `KEY=value` lines, skipping comments and blank lines.
fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();

            // Remove quotes if present
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);

            if !key.is_empty() {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
    }
    pairs
}
