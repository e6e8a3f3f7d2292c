//! Resilient image generation wrapper.
//!
//! Wraps any ImageGenPort implementation with two independent policies:
//! bounded retry with exponential backoff for transient failures, and a
//! single overall deadline for the whole retry sequence of one prompt.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{IconRender, ImageGenError, ImageGenPort};

/// Overall per-prompt deadline. Flux predictions usually finish in 30-60s.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(90);

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries, just the initial attempt)
    pub max_retries: u32,
    /// Base delay in milliseconds before first retry
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds (caps exponential growth)
    pub max_delay_ms: u64,
    /// Jitter factor (0.0-1.0) for randomizing delays to prevent thundering herd
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 2000,
            max_delay_ms: 30000,
            jitter_factor: 0.2,
        }
    }
}

/// Wrapper that adds retry and deadline policies to any image generator.
pub struct ResilientImageGen {
    inner: Arc<dyn ImageGenPort>,
    config: RetryConfig,
    deadline: Duration,
}

impl ResilientImageGen {
    pub fn new(inner: Arc<dyn ImageGenPort>, config: RetryConfig) -> Self {
        Self {
            inner,
            config,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Override the overall deadline (used by tests).
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Calculate delay for a given attempt number using exponential backoff with jitter
    fn calculate_delay(&self, attempt: u32) -> u64 {
        let base = self.config.base_delay_ms;
        // Exponential: base * 2^(attempt-1)
        let exponential = base.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exponential.min(self.config.max_delay_ms);

        let jitter_range = (capped as f64 * self.config.jitter_factor) as i64;
        if jitter_range > 0 {
            let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
            (capped as i64 + jitter).max(0) as u64
        } else {
            capped
        }
    }

    /// Determine if an error is retryable.
    ///
    /// A failure message that mentions invalid or required input points at a
    /// malformed request; retrying it cannot succeed.
    fn is_retryable(error: &ImageGenError) -> bool {
        match error {
            ImageGenError::GenerationFailed(msg) => {
                let msg = msg.to_lowercase();
                !msg.contains("invalid") && !msg.contains("required")
            }
            // An empty provider result is typically a transient hiccup.
            ImageGenError::NoImageProduced => true,
            ImageGenError::Timeout => false,
        }
    }

    async fn execute_with_retry(&self, render: &IconRender) -> Result<String, ImageGenError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.inner.generate(render.clone()).await {
                Ok(url) => {
                    if attempt > 0 {
                        tracing::info!(
                            attempt = attempt + 1,
                            "Image generation succeeded after retry"
                        );
                    }
                    return Ok(url);
                }
                Err(e) => {
                    let is_retryable = Self::is_retryable(&e);

                    if attempt < self.config.max_retries && is_retryable {
                        let delay = self.calculate_delay(attempt + 1);
                        tracing::warn!(
                            attempt = attempt + 1,
                            max_retries = self.config.max_retries,
                            delay_ms = delay,
                            error = %e,
                            "Image generation failed, retrying..."
                        );
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    } else if !is_retryable {
                        tracing::error!(
                            error = %e,
                            "Image generation failed with non-retryable error"
                        );
                        return Err(e);
                    }

                    last_error = Some(e);
                }
            }
        }

        let error = last_error
            .unwrap_or_else(|| ImageGenError::GenerationFailed("Unknown error".to_string()));
        tracing::error!(
            attempts = self.config.max_retries + 1,
            error = %error,
            "Image generation failed after all retry attempts"
        );
        Err(error)
    }
}

#[async_trait]
impl ImageGenPort for ResilientImageGen {
    async fn generate(&self, render: IconRender) -> Result<String, ImageGenError> {
        // The deadline bounds the whole retry sequence, however many
        // attempts remain when it fires.
        match tokio::time::timeout(self.deadline, self.execute_with_retry(&render)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    deadline_ms = self.deadline.as_millis() as u64,
                    "Image generation exceeded overall deadline"
                );
                Err(ImageGenError::Timeout)
            }
        }
    }
}
