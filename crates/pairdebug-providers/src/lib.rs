//! Completion service clients for pairdebug.
//!
//! A [`CompletionProvider`] takes a fully built prompt and returns the
//! service's reply reduced to one string. Response-shape handling lives in
//! [`normalize`] so every provider reports text the same way.
//!
//! # Example
//!
//! ```rust,ignore
//! use pairdebug_providers::{CompletionProvider, HuggingFaceProvider};
//!
//! let provider = HuggingFaceProvider::new(
//!     "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-beta",
//!     "hf_...",
//! )?;
//! let text = provider.complete("Explain this error: ...").await?;
//! ```

mod error;
pub mod huggingface;
pub mod normalize;
mod types;

pub use error::{ProviderError, Result};
pub use huggingface::HuggingFaceProvider;
pub use types::{GenerationParams, InferenceRequest};

use async_trait::async_trait;

/// A hosted text-completion service.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get provider name.
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`.
    ///
    /// The returned text has any leading echo of the prompt removed.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
