//! Port traits for external systems.

use async_trait::async_trait;

/// Parameters for rendering a single icon image.
#[derive(Debug, Clone)]
pub struct IconRender {
    pub prompt: String,
    /// Seed forwarded verbatim to the provider; `None` lets the provider
    /// pick its own randomness.
    pub seed: Option<i64>,
}

impl IconRender {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ImageGenError {
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
    #[error("No image generated")]
    NoImageProduced,
    #[error("Image generation timed out. Please try again.")]
    Timeout,
}

/// Image generation capability: one prompt in, one image URL out.
#[async_trait]
pub trait ImageGenPort: Send + Sync {
    async fn generate(&self, render: IconRender) -> Result<String, ImageGenError>;
}
