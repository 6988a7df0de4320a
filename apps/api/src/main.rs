mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::pipeline::ResumePipeline;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize upstream client
    let gemini = GeminiClient::new(&config.gemini_settings())
        .context("Failed to build the Gemini HTTP client")?;
    info!(
        model = %config.gemini_model,
        timeout_secs = config.gemini_timeout.as_secs(),
        "Gemini client initialized"
    );

    // Initialize pipeline (page layout, bullet glyphs, ATS keywords)
    let options = config.pipeline_options();
    info!(
        page_width = options.layout.page_size.width_pt,
        page_height = options.layout.page_size.height_pt,
        font = ?config.font_family,
        keywords = options.keywords.len(),
        "Pipeline configured"
    );
    let pipeline = Arc::new(ResumePipeline::new(Arc::new(gemini), options));

    let state = AppState { pipeline };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
