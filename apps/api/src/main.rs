mod clients;
mod config;
mod db;
mod errors;
mod ingest;
mod models;
mod persistence;
mod prefill;
mod routes;
mod state;
mod synthesis;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clients::analysis::HttpAnalysisService;
use crate::clients::export::ExportClient;
use crate::clients::parsing::HttpParsingService;
use crate::clients::profile::HttpProfileSource;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::session::new_session_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Assembly API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (backs the persistence collaborator)
    let db = create_pool(&config.database_url).await?;

    // Remote collaborator clients
    let profile = Arc::new(HttpProfileSource::new(config.profile_service_url.clone()));
    let parser = Arc::new(HttpParsingService::new(config.parser_service_url.clone()));
    let analyzer = Arc::new(HttpAnalysisService::new(config.analysis_service_url.clone()));
    let export = ExportClient::new(config.export_service_url.clone());
    info!("Collaborator clients initialized");

    // Build app state
    let state = AppState {
        db,
        profile,
        parser,
        analyzer,
        export,
        sessions: new_session_store(),
    };

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
