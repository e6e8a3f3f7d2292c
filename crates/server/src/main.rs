//! IconForge Server - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iconforge_server::api;
use iconforge_server::infrastructure::replicate::ReplicateClient;
use iconforge_server::infrastructure::resilient_image_gen::{ResilientImageGen, RetryConfig};
use iconforge_server::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from the repo root (the binary may run from `crates/server`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iconforge_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting IconForge Server");

    // Load configuration
    let api_token = std::env::var("REPLICATE_API_TOKEN")
        .map_err(|_| anyhow::anyhow!("REPLICATE_API_TOKEN must be set"))?;
    let replicate_url = std::env::var("REPLICATE_BASE_URL")
        .unwrap_or_else(|_| "https://api.replicate.com".into());
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3001".into())
        .parse()
        .unwrap_or(3001);

    // Create infrastructure clients
    let replicate = Arc::new(ReplicateClient::new(&replicate_url, &api_token));
    let retry_config = RetryConfig::default();
    tracing::info!(
        "Image client configured with retry: max_retries={}, base_delay_ms={}",
        retry_config.max_retries,
        retry_config.base_delay_ms
    );
    let image_gen = Arc::new(ResilientImageGen::new(replicate, retry_config));

    // Create application
    let app = Arc::new(App::new(image_gen));

    // Build the router
    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let Some(allowed_origins) = allowed_origins else {
        return None;
    };

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
