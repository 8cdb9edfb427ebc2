mod analysis;
mod config;
mod errors;
mod extraction;
mod gemini_client;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::provider::GeminiAnalysisProvider;
use crate::config::Config;
use crate::gemini_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; analysis requests will be rejected upstream");
    }

    let gemini = GeminiClient::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
        Duration::from_secs(config.gemini_timeout_secs),
    )
    .context("Failed to build Gemini HTTP client")?;
    info!(
        "Gemini client initialized (endpoint: {}, timeout: {}s)",
        gemini.api_url(),
        config.gemini_timeout_secs
    );

    let state = AppState {
        provider: Arc::new(GeminiAnalysisProvider(gemini)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
