//! Request types shared by completion providers.

use pairdebug_core::config::CompletionConfig;
use serde::Serialize;

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    /// Maximum number of tokens to generate.
    pub max_new_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Nucleus sampling threshold.
    pub top_p: f32,

    /// Enable sampling.
    pub do_sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 1024,
            temperature: 0.7,
            top_p: 0.95,
            do_sample: true,
        }
    }
}

impl From<&CompletionConfig> for GenerationParams {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            do_sample: config.do_sample,
        }
    }
}

/// Text-generation request body.
#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    /// Full prompt text.
    pub inputs: &'a str,

    /// Sampling parameters.
    pub parameters: &'a GenerationParams,
}
