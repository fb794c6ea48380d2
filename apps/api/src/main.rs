mod config;
mod errors;
mod extractor;
mod generation;
mod llm_client;
mod models;
mod render;
mod router;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::ProposalClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::file::FileStore;
use crate::store::{migrate_legacy_keys, CredentialStore, ProfileStore, SettingsStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting proposal API v{}", env!("CARGO_PKG_VERSION"));

    // Open the settings store and normalize legacy keys once, up front.
    let store: Arc<dyn SettingsStore> = Arc::new(FileStore::open(&config.storage_path).await?);
    migrate_legacy_keys(store.as_ref()).await?;

    let llm = ProposalClient::new(Duration::from_secs(config.generation_timeout_secs))?;
    info!(
        "Proposal client initialized (timeout: {}s)",
        config.generation_timeout_secs
    );

    let state = AppState {
        credentials: CredentialStore::new(store.clone()),
        profiles: ProfileStore::new(store),
        llm,
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
