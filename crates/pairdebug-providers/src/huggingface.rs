//! Hugging Face hosted inference provider.
//!
//! Sends a single text-generation request per completion with no retry and
//! the transport's default timeout.

use crate::normalize::{normalize_completion, parse_payload};
use crate::types::{GenerationParams, InferenceRequest};
use crate::{CompletionProvider, ProviderError, Result};
use async_trait::async_trait;
use pairdebug_core::config::CompletionConfig;
use pairdebug_core::SecretString;
use reqwest::Client;
use tracing::{debug, warn};

/// Hugging Face inference API provider.
pub struct HuggingFaceProvider {
    /// HTTP client.
    client: Client,

    /// Bearer credential.
    api_key: SecretString,

    /// Full model endpoint URL.
    endpoint: String,

    /// Sampling parameters.
    params: GenerationParams,
}

impl HuggingFaceProvider {
    /// Create a provider for a model endpoint.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<SecretString>) -> Result<Self> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| ProviderError::config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint,
            params: GenerationParams::default(),
        })
    }

    /// Create a provider from the completion section of the config.
    ///
    /// A missing API key is not an error here: requests go out with an empty
    /// bearer token and the upstream's 401 is mirrored to the caller.
    pub fn from_config(config: &CompletionConfig) -> Result<Self> {
        let api_key = config.api_key.clone().unwrap_or_else(|| {
            warn!("No completion API key configured; upstream will reject requests");
            SecretString::default()
        });

        Ok(Self::new(config.endpoint.clone(), api_key)?.with_params(GenerationParams::from(config)))
    }

    /// Set the sampling parameters.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Endpoint this provider posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: &self.params,
        };

        debug!("Sending completion request: {} prompt chars", prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) => parse_payload(text),
                Err(e) => {
                    warn!("Failed to read upstream error body: {}", e);
                    serde_json::Value::Null
                }
            };
            warn!("Completion service returned {}", status);
            return Err(ProviderError::upstream(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::unavailable(e.to_string()))?;

        Ok(normalize_completion(&parse_payload(body), prompt))
    }
}
