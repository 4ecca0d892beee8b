mod config;
mod errors;
mod llm_client;
mod models;
mod pipeline;
mod relevance;
mod routes;
mod search;
mod state;
mod usage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::AnthropicClient;
use crate::models::profile::Profile;
use crate::pipeline::Pipeline;
use crate::routes::build_router;
use crate::search::TavilyClient;
use crate::state::AppState;
use crate::usage::InMemoryUsageRecorder;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobScout API v{}", env!("CARGO_PKG_VERSION"));

    // External collaborators
    let search = Arc::new(TavilyClient::new(config.tavily_api_key.clone()));
    let llm = Arc::new(AnthropicClient::new(config.anthropic_api_key.clone()));
    info!("reasoning client initialized (model: {})", llm_client::MODEL);

    // Candidate profile is process-wide and read-only
    let profile = Arc::new(Profile::default_candidate());

    // Usage recording is caller-owned; the pipeline only gets the capability
    let usage = Arc::new(InMemoryUsageRecorder::new());

    let pipeline = Arc::new(Pipeline::new(
        search,
        llm,
        profile.clone(),
        usage.clone(),
        config.pipeline.clone(),
    ));

    let state = AppState {
        profile,
        pipeline,
        usage,
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
