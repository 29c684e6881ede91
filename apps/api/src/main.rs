mod config;
mod document;
mod errors;
mod llm_client;
mod routes;
mod state;
mod theme;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::theme::analyzer::{LlmPaletteAnalyzer, PaletteAnalyzer};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Crate name is hyphenated; tracing targets use underscores
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vellum Theme API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the palette analyzer when credentials allow. The pipeline
    // is fully functional without it.
    let analyzer: Option<Arc<dyn PaletteAnalyzer>> =
        match (&config.anthropic_api_key, config.analyzer_enabled) {
            (Some(key), true) => {
                info!(
                    "Palette analyzer enabled (timeout: {}ms)",
                    config.analyzer_timeout_ms
                );
                Some(Arc::new(LlmPaletteAnalyzer::new(
                    LlmClient::new(key.clone()),
                    Duration::from_millis(config.analyzer_timeout_ms),
                )))
            }
            _ => {
                info!("Palette analyzer disabled, running fully local");
                None
            }
        };

    // Build app state
    let state = AppState { analyzer };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
