//! Code debugging through the completion service.

use pairdebug_providers::{CompletionProvider, ProviderError};
use std::sync::Arc;
use tracing::{debug, info};

/// Text placed before the submitted code.
pub const PROMPT_PREAMBLE: &str =
    "Analyze and debug this code. Explain any errors and suggest fixes:\n    \n";

/// Returned when the completion service produced no usable text.
pub const NO_ISSUES_PLACEHOLDER: &str = "No issues found or unable to analyze the code.";

/// Build the completion prompt for a code snippet.
///
/// The code is embedded verbatim.
pub fn build_prompt(code: &str) -> String {
    format!("{}{}", PROMPT_PREAMBLE, code)
}

/// Stateless debug service over a completion provider.
#[derive(Clone)]
pub struct Debugger {
    provider: Arc<dyn CompletionProvider>,
}

impl Debugger {
    /// Create a debugger backed by `provider`.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Name of the backing provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Analyze `code` and return the model's explanation.
    ///
    /// Empty input is forwarded as-is; rejecting it is left to the client.
    pub async fn debug(&self, code: &str) -> Result<String, ProviderError> {
        let prompt = build_prompt(code);
        debug!(
            "Debug request: {} code chars via {}",
            code.len(),
            self.provider.name()
        );

        let result = self.provider.complete(&prompt).await?;
        if result.is_empty() {
            info!("Completion was empty, returning placeholder");
            return Ok(NO_ISSUES_PLACEHOLDER.to_string());
        }

        Ok(result)
    }
}
