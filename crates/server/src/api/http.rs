//! HTTP routes.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::App;
use crate::prompts::build_icon_prompts;
use crate::styles::{style_by_id, StylePreset, STYLE_PRESETS};
use crate::use_cases::generate_icon_set;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/styles", get(list_styles))
        .route("/api/generate", post(generate_icons))
        .route("/api/proxy-image", get(proxy_image))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_styles() -> Json<&'static [StylePreset; 5]> {
    Json(&STYLE_PRESETS)
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    success: bool,
    images: Vec<String>,
    prompt: String,
    style: &'static str,
}

/// Generate four icons for a theme in one of the preset styles.
///
/// The body is validated field by field so that each malformed shape gets
/// its own exact error message; a typed extractor would collapse them into
/// one generic deserialization failure.
async fn generate_icons(
    State(app): State<Arc<App>>,
    Json(body): Json<Value>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let theme = match body.get("prompt").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => return Err(ApiError::BadRequest("Prompt is required")),
    };

    let style_id = match body.get("styleId").and_then(Value::as_f64) {
        Some(n) if n != 0.0 => n,
        _ => return Err(ApiError::BadRequest("Style ID is required")),
    };
    let style = (style_id.fract() == 0.0 && style_id > 0.0)
        .then(|| style_by_id(style_id as u32))
        .flatten()
        .ok_or(ApiError::BadRequest("Invalid style ID"))?;

    let colors = match body.get("colors") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect(),
        Some(_) => return Err(ApiError::BadRequest("Colors must be an array")),
    };

    let prompts = build_icon_prompts(&theme, style, &colors);
    tracing::info!(theme = %theme, style = style.name, "Generating icons");
    tracing::debug!(?prompts, "Composed icon prompts");

    let images = generate_icon_set(&app.image_gen, &prompts, None)
        .await
        .map_err(|e| ApiError::Generation(e.to_string()))?;

    Ok(Json(GenerateResponse {
        success: true,
        images,
        prompt: theme,
        style: style.name,
    }))
}

#[derive(Debug, Deserialize)]
struct ProxyImageParams {
    url: Option<String>,
}

/// Fetch an image server-side and stream it back as a download.
///
/// Generated image URLs live on a foreign origin, so the browser cannot
/// download them directly; this endpoint re-serves them with an attachment
/// disposition.
async fn proxy_image(
    State(app): State<Arc<App>>,
    Query(params): Query<ProxyImageParams>,
) -> Result<Response, ApiError> {
    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::BadRequest("URL is required"))?;

    let upstream = app.http.get(&url).send().await.map_err(|e| {
        tracing::error!(error = %e, url = %url, "Image proxy fetch failed");
        ApiError::ProxyFetch
    })?;

    if !upstream.status().is_success() {
        tracing::error!(status = %upstream.status(), url = %url, "Image proxy got error status");
        return Err(ApiError::ProxyFetch);
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/png")
        .to_string();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=icon.png",
        )
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|_| ApiError::ProxyFetch)
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    Generation(String),
    ProxyFetch,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": msg })),
            )
                .into_response(),
            ApiError::Generation(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to generate icons",
                    "message": message,
                })),
            )
                .into_response(),
            ApiError::ProxyFetch => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch image" })),
            )
                .into_response(),
        }
    }
}
