//! Replicate image generation client.
//!
//! Implements the ImageGenPort trait against Replicate's predictions API
//! using the `black-forest-labs/flux-schnell` model.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::infrastructure::ports::{IconRender, ImageGenError, ImageGenPort};

const MODEL: &str = "black-forest-labs/flux-schnell";

/// Client for the Replicate HTTP API.
#[derive(Clone)]
pub struct ReplicateClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl ReplicateClient {
    pub fn new(base_url: &str, api_token: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        }
    }

    /// Create a prediction for one prompt.
    async fn create_prediction(
        &self,
        render: &IconRender,
    ) -> Result<PredictionResponse, ImageGenError> {
        let request = CreatePredictionRequest {
            input: FluxInput {
                prompt: render.prompt.clone(),
                width: 512,
                height: 512,
                num_outputs: 1,
                aspect_ratio: "1:1",
                output_format: "png",
                output_quality: 90,
                seed: render.seed,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/models/{}/predictions",
                self.base_url, MODEL
            ))
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ImageGenError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImageGenError::GenerationFailed(error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ImageGenError::GenerationFailed(e.to_string()))
    }

    /// Fetch the current state of a prediction.
    async fn get_prediction(&self, id: &str) -> Result<PredictionResponse, ImageGenError> {
        let response = self
            .client
            .get(format!("{}/v1/predictions/{}", self.base_url, id))
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| ImageGenError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImageGenError::GenerationFailed(error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ImageGenError::GenerationFailed(e.to_string()))
    }

    /// Poll a prediction until it reaches a terminal status and return the
    /// first output URL.
    async fn wait_for_completion(&self, id: &str) -> Result<String, ImageGenError> {
        const MAX_ATTEMPTS: u32 = 120;
        const POLL_INTERVAL: Duration = Duration::from_secs(1);

        for _ in 0..MAX_ATTEMPTS {
            let prediction = self.get_prediction(id).await?;

            match prediction.status {
                PredictionStatus::Succeeded => {
                    return prediction
                        .output
                        .and_then(|urls| urls.into_iter().next())
                        .ok_or(ImageGenError::NoImageProduced);
                }
                PredictionStatus::Failed | PredictionStatus::Canceled => {
                    return Err(ImageGenError::GenerationFailed(
                        prediction
                            .error
                            .unwrap_or_else(|| "Prediction failed".to_string()),
                    ));
                }
                PredictionStatus::Starting | PredictionStatus::Processing => {}
            }

            sleep(POLL_INTERVAL).await;
        }

        Err(ImageGenError::GenerationFailed(
            "Prediction polling exceeded attempt budget".to_string(),
        ))
    }
}

#[async_trait]
impl ImageGenPort for ReplicateClient {
    async fn generate(&self, render: IconRender) -> Result<String, ImageGenError> {
        let prediction = self.create_prediction(&render).await?;

        // A blocking-capable deployment may return the output immediately.
        if matches!(prediction.status, PredictionStatus::Succeeded) {
            return prediction
                .output
                .and_then(|urls| urls.into_iter().next())
                .ok_or(ImageGenError::NoImageProduced);
        }

        self.wait_for_completion(&prediction.id).await
    }
}

// =============================================================================
// Replicate API types
// =============================================================================

#[derive(Debug, Serialize)]
struct CreatePredictionRequest {
    input: FluxInput,
}

#[derive(Debug, Serialize)]
struct FluxInput {
    prompt: String,
    width: u32,
    height: u32,
    num_outputs: u32,
    aspect_ratio: &'static str,
    output_format: &'static str,
    output_quality: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    id: String,
    status: PredictionStatus,
    output: Option<Vec<String>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}
