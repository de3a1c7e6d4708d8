//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging; the workspace's main `haven-run`
//! binary is the deployment entrypoint and also loads `.env` configuration.

use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use haven_core::{db_path_from_env_value, CoreConfig, ShelterService, Store};

/// Main entry point for the Haven REST API server.
///
/// # Environment Variables
/// - `HAVEN_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `HAVEN_DB_PATH`: SQLite database file (default: "data/shelter.db")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the database cannot be opened, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("HAVEN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = CoreConfig::new(db_path_from_env_value(std::env::var("HAVEN_DB_PATH").ok()));

    if let Some(parent) = cfg.db_path().parent().filter(|p| *p != Path::new("")) {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("-- Starting Haven REST API on {}", addr);
    tracing::info!("-- Using database at {}", cfg.db_path().display());

    let store = Arc::new(Store::open(cfg.db_path())?);
    let app = router(AppState {
        service: ShelterService::new(store),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
