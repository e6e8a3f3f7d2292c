//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::ImageGenPort;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    /// Image generation capability (Replicate behind the resilience wrapper).
    pub image_gen: Arc<dyn ImageGenPort>,
    /// Plain HTTP client used by the image download proxy.
    pub http: reqwest::Client,
}

impl App {
    pub fn new(image_gen: Arc<dyn ImageGenPort>) -> Self {
        Self {
            image_gen,
            http: reqwest::Client::new(),
        }
    }
}
