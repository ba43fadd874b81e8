mod config;
mod errors;
mod journal;
mod llm_client;
mod logging;
mod mood;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::journal::store::EntryStore;
use crate::llm_client::LlmClient;
use crate::logging::create_log_writer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // The log file is best effort: if it cannot be opened we keep console logging.
    let (file_writer, _log_guard, log_error) = match create_log_writer(&config.log_path) {
        Ok((writer, guard)) => (Some(writer), Some(guard), None),
        Err(e) => (None, None, Some(e)),
    };
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
    });

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = log_error {
        warn!("Diagnostic log file unavailable, logging to console only: {e:#}");
    }

    info!("Starting journal v{}", env!("CARGO_PKG_VERSION"));

    let store = EntryStore::load(&config.journal_path);
    info!(
        "Journal store at {} ({} entries)",
        store.path().display(),
        store.len()
    );

    let llm = LlmClient::new(
        config.openai_api_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model_label());

    // Warm-up never blocks startup and its failure is only logged.
    let warm_up = llm.clone();
    tokio::spawn(async move {
        match warm_up.warm_up().await {
            Ok(()) => info!(
                "LLM connection warmed up using model: {}",
                warm_up.model_label()
            ),
            Err(e) => warn!("Warm-up error: {e}"),
        }
    });

    let state = AppState::new(store, Arc::new(llm));

    // The front end is served from a different origin (webview / file://).
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
