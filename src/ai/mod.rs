//! Generative-language provider integration
//!
//! Text generation and image question answering are delegated to Gemini's
//! `generateContent` API. Callers depend on [`GenerationService`] so the
//! provider can be swapped for [`MockGenerationClient`] in tests.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::MockGenerationClient;

use crate::media::DecodedMedia;
use crate::prompts::Prompt;
use crate::Result;
use async_trait::async_trait;

/// Sampling parameters forwarded to the provider. `None` leaves the
/// provider default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerationParams {
    pub fn research() -> Self {
        Self {
            temperature: Some(0.7),
            top_p: Some(0.9),
            max_output_tokens: Some(4096),
        }
    }

    pub fn summary() -> Self {
        Self {
            temperature: Some(0.2),
            top_p: None,
            max_output_tokens: Some(200),
        }
    }

    pub fn image_analysis() -> Self {
        Self {
            temperature: Some(0.4),
            top_p: Some(1.0),
            max_output_tokens: Some(2048),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate text for a system instruction plus a single user turn.
    async fn generate(&self, prompt: &Prompt, params: &GenerationParams) -> Result<String>;

    /// Answer `instruction` about an inline image.
    async fn describe_image(
        &self,
        instruction: &str,
        image: &DecodedMedia,
        params: &GenerationParams,
    ) -> Result<String>;
}
